use crate::core::geometry::DecodedGeometry;
use crate::core::shared::FaceIdx;

/// Flattens the faces of a mesh into a triangle list, three corners per face, in the
/// codec's corner order. Nothing is deduplicated, rewound or filtered.
pub fn reconstruct_indices<G>(geometry: &G) -> Vec<u32>
    where G: DecodedGeometry + ?Sized
{
    let num_faces = geometry.num_faces();
    let mut indices = vec![0_u32; num_faces * 3];
    for (face, corners) in FaceIdx::range(num_faces).zip(indices.chunks_exact_mut(3)) {
        corners.copy_from_slice(&geometry.face(face));
    }
    indices
}
