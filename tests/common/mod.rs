#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use draco_loader::fetch::{self, ByteFetcher, Progress};
use draco_loader::prelude::*;

/// A Draco 2.2 header for `encoder_type`, encoded with edgebreaker, followed by a few
/// payload bytes the test decoders never look at.
pub fn draco_bytes(encoder_type: u8) -> Vec<u8> {
    let mut out = b"DRACO".to_vec();
    out.extend_from_slice(&[2, 2, encoder_type, 1, 0, 0]);
    out.extend_from_slice(&[0x11, 0x22, 0x33]);
    out
}

pub fn mesh_bytes() -> Vec<u8> {
    draco_bytes(GeometryType::TriangularMesh.get_id())
}

pub fn point_cloud_bytes() -> Vec<u8> {
    draco_bytes(GeometryType::PointCloud.get_id())
}

#[derive(Debug, thiserror::Error)]
#[error("the payload could not be decompressed")]
pub struct Corrupt;

/// Stands in for the Draco decompressor: every decode yields a copy of `mesh`.
pub struct InMemoryDecoder {
    pub mesh: Mesh,
}

impl Decoder for InMemoryDecoder {
    type Geometry = Mesh;
    type Error = Corrupt;

    fn decode_mesh(&self, _data: &[u8]) -> Result<Mesh, Corrupt> {
        Ok(self.mesh.clone())
    }

    fn decode_point_cloud(&self, _data: &[u8]) -> Result<Mesh, Corrupt> {
        Ok(self.mesh.clone())
    }
}

/// Serves byte buffers by URL, delivering each in `chunk` sized pieces.
pub struct MemoryFetcher {
    files: HashMap<String, Vec<u8>>,
    chunk: usize,
    pub requested: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new(chunk: usize) -> Self {
        Self { files: HashMap::new(), chunk: chunk.max(1), requested: Mutex::new(Vec::new()) }
    }

    pub fn insert(mut self, url: &str, data: Vec<u8>) -> Self {
        self.files.insert(url.to_owned(), data);
        self
    }
}

impl ByteFetcher for MemoryFetcher {
    async fn fetch<P>(&self, url: &str, mut on_progress: P) -> Result<Vec<u8>, fetch::Err>
        where P: FnMut(Progress) + Send
    {
        self.requested.lock().unwrap().push(url.to_owned());
        let data = self.files.get(url).ok_or_else(|| fetch::Err::Status {
            url: url.to_owned(),
            status: 404,
        })?;

        let total = Some(data.len() as u64);
        let mut out = Vec::with_capacity(data.len());
        for chunk in data.chunks(self.chunk) {
            out.extend_from_slice(chunk);
            on_progress(Progress { loaded: out.len() as u64, total });
        }
        Ok(out)
    }
}

/// Four points, two triangles, every rendered attribute present.
pub fn quad(with_optional: bool) -> Mesh {
    let mut builder = MeshBuilder::new();
    builder.add_attribute(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        AttributeType::Position,
    );
    if with_optional {
        builder.add_attribute(
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5, 0.5]],
            AttributeType::Color,
        );
        builder.add_attribute(vec![[0.0, 0.0, 1.0]; 4], AttributeType::Normal);
        builder.add_attribute(
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            AttributeType::TextureCoordinate,
        );
    }
    builder.set_faces(vec![[0, 1, 2], [0, 2, 3]]);
    builder.build().unwrap()
}
