// lib.rs

/// Contains the shared definitions, the decoded geometry interface, and the in-memory mesh.
pub mod core;

/// Defines the decode pipeline: header classification, the external decoder interface,
/// and the orchestration from raw bytes to a `GeometryBuffer`.
pub mod decode;

/// Converts a decoded geometry into flat, renderer-ready buffers.
pub mod convert;

/// Asynchronous retrieval of the raw compressed bytes.
pub mod fetch;

/// The user facing loader that ties fetching and decoding together.
pub mod loader;

/// Status reporting sinks injected into the loader.
pub mod report;

/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::attribute::{AttributeId, AttributeType};
    pub use crate::core::bit_coder::{ByteReader, ReaderErr};
    pub use crate::core::geometry::{DecodedGeometry, GeometryType};
    pub use crate::core::mesh::{Mesh, builder::MeshBuilder};
    pub use crate::core::shared::{ConfigType, FaceIdx, PointIdx};
    pub use crate::convert::GeometryBuffer;
    pub use crate::decode::{self, decode, Decoder, FnDecoder};
    pub use crate::fetch::{ByteFetcher, DefaultFetcher, Progress};
    pub use crate::loader::DracoLoader;
    pub use crate::report::{ReportSink, TracingSink, NoopSink};
}
