pub mod header;

use std::time::Instant;

use crate::convert::{self, GeometryBuffer};
use crate::core::geometry::{DecodedGeometry, GeometryType};
use crate::report::{DecodeTimings, GeometryInfo, Report, ReportSink};

/// The external Draco decompressor.
///
/// The decoder turns raw bytes into geometry it owns; everything it allocates for a
/// decode must be released when the returned geometry is dropped.
pub trait Decoder {
    type Geometry: DecodedGeometry;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the encoder type byte that classifies the buffer. The default reads it from
    /// the Draco header.
    fn encoded_geometry_type(&self, data: &[u8]) -> Result<u8, header::Err> {
        header::read_header(data).map(|header| header.encoder_type)
    }

    fn decode_mesh(&self, data: &[u8]) -> Result<Self::Geometry, Self::Error>;

    fn decode_point_cloud(&self, data: &[u8]) -> Result<Self::Geometry, Self::Error>;
}

/// Adapts a function `(bytes, geometry type) -> geometry` into a [Decoder].
pub struct FnDecoder<F>(pub F);

impl<F, G, E> Decoder for FnDecoder<F>
    where
        F: Fn(&[u8], GeometryType) -> Result<G, E>,
        G: DecodedGeometry,
        E: std::error::Error + Send + Sync + 'static,
{
    type Geometry = G;
    type Error = E;

    fn decode_mesh(&self, data: &[u8]) -> Result<G, E> {
        (self.0)(data, GeometryType::TriangularMesh)
    }

    fn decode_point_cloud(&self, data: &[u8]) -> Result<G, E> {
        (self.0)(data, GeometryType::PointCloud)
    }
}


/// Decodes a Draco buffer that is already in memory into a [GeometryBuffer].
///
/// The decoded geometry is dropped before this returns, whether it succeeds or not.
pub fn decode<D, S>(data: &[u8], decoder: &D, sink: &S) -> Result<GeometryBuffer, Err>
    where
        D: Decoder + ?Sized,
        S: ReportSink + ?Sized,
{
    let start = Instant::now();

    let id = decoder.encoded_geometry_type(data)?;
    let geometry_type = GeometryType::from_id(id)
        .ok_or(Err::UnrecognizedGeometryType(id))?;
    sink.report(&Report::Classified(geometry_type));
    tracing::debug!("Classified {} bytes as a {}", data.len(), geometry_type);

    let geometry = match geometry_type {
        GeometryType::TriangularMesh => decoder.decode_mesh(data),
        GeometryType::PointCloud => decoder.decode_point_cloud(data),
    }.map_err(|e| Err::DecoderFailure(Box::new(e)))?;
    let decoded = Instant::now();

    let num_attributes = geometry.num_attributes();
    let buffer = convert::convert(&geometry, geometry_type)?;
    drop(geometry);

    let timings = DecodeTimings {
        decode: decoded - start,
        convert: decoded.elapsed(),
    };
    let info = GeometryInfo::new(&buffer, num_attributes);
    sink.report(&Report::Decoded { info: &info, timings });

    Ok(buffer)
}


#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("Conversion error: {0}")]
    Conversion(#[from] convert::Err),
    #[error("Decoder failed: {0}")]
    DecoderFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Header error: {0}")]
    Header(#[from] header::Err),
    #[error("Unknown geometry type: {0}")]
    UnrecognizedGeometryType(u8),
}
