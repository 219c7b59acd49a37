use core::fmt;

use serde::{Deserialize, Serialize};

use super::attribute::{AttributeId, AttributeType};
use super::shared::FaceIdx;

/// Kind of geometry stored in a Draco buffer, as declared by the encoder type byte of the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    PointCloud,
    TriangularMesh,
}

impl GeometryType {
    /// Maps the header's encoder type byte. Returns `None` for anything Draco does not define.
    #[inline]
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::PointCloud),
            1 => Some(Self::TriangularMesh),
            _ => None,
        }
    }

    #[inline]
    pub fn get_id(self) -> u8 {
        match self {
            Self::PointCloud => 0,
            Self::TriangularMesh => 1,
        }
    }

    #[inline]
    pub fn is_mesh(self) -> bool {
        self == Self::TriangularMesh
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointCloud => f.write_str("point cloud"),
            Self::TriangularMesh => f.write_str("mesh"),
        }
    }
}

/// Read access to geometry that an external codec has already decompressed.
///
/// Implementors own whatever codec-side resources back the geometry and release them
/// in `Drop`; the decode pipeline drops the geometry on every exit path.
pub trait DecodedGeometry {
    /// Number of points. Every rendered attribute carries one value per point.
    fn num_points(&self) -> usize;

    /// Number of triangular faces. Always zero for point clouds.
    fn num_faces(&self) -> usize;

    /// Total number of attributes, including the ones the converter ignores.
    fn num_attributes(&self) -> usize;

    /// Looks up the attribute playing the given role.
    fn attribute_id(&self, att_type: AttributeType) -> Option<AttributeId>;

    /// Number of components the attribute stores per point.
    fn num_components(&self, id: AttributeId) -> usize;

    /// Writes the attribute values of every point into `out` as `f32`, point-major and
    /// component-minor, `num_components(id)` values per point. `out` is cleared first.
    fn attribute_float_for_all_points(&self, id: AttributeId, out: &mut Vec<f32>);

    /// The three point indices of a face, in the codec's corner order.
    fn face(&self, face: FaceIdx) -> [u32; 3];
}

impl<G: DecodedGeometry + ?Sized> DecodedGeometry for Box<G> {
    fn num_points(&self) -> usize {
        (**self).num_points()
    }

    fn num_faces(&self) -> usize {
        (**self).num_faces()
    }

    fn num_attributes(&self) -> usize {
        (**self).num_attributes()
    }

    fn attribute_id(&self, att_type: AttributeType) -> Option<AttributeId> {
        (**self).attribute_id(att_type)
    }

    fn num_components(&self, id: AttributeId) -> usize {
        (**self).num_components(id)
    }

    fn attribute_float_for_all_points(&self, id: AttributeId, out: &mut Vec<f32>) {
        (**self).attribute_float_for_all_points(id, out)
    }

    fn face(&self, face: FaceIdx) -> [u32; 3] {
        (**self).face(face)
    }
}
