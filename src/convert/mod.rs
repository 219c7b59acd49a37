pub mod attribute;
pub mod buffer;
pub mod indices;

use std::time::SystemTime;

use serde::Serialize;

use crate::core::attribute::{AttributeId, AttributeType};
use crate::core::geometry::{DecodedGeometry, GeometryType};
use attribute::AttributeValues;

/// Flat, renderer-ready geometry.
///
/// `vertices`, `colors` and `normals` hold three `f32` per point, `uvs` two, and `indices`
/// three point indices per triangle. Point clouds have no indices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryBuffer {
    pub indices: Vec<u32>,
    pub vertices: Vec<f32>,
    pub colors: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,

    /// What the source buffer declared itself to be.
    pub geometry_type: GeometryType,
    pub color_attribute: Option<AttributeId>,
    pub normal_attribute: Option<AttributeId>,
    pub tex_coord_attribute: Option<AttributeId>,
    /// When the conversion finished.
    pub completed_at: SystemTime,
}

impl GeometryBuffer {
    #[inline]
    pub fn num_points(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_triangular_mesh(&self) -> bool {
        self.geometry_type.is_mesh()
    }

    #[inline]
    pub fn has_colors(&self) -> bool {
        self.color_attribute.is_some()
    }

    #[inline]
    pub fn has_normals(&self) -> bool {
        self.normal_attribute.is_some()
    }

    #[inline]
    pub fn has_tex_coords(&self) -> bool {
        self.tex_coord_attribute.is_some()
    }
}


#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("The {att_type} attribute yielded {found} values, expected {expected}")]
    AttributeSizeMismatch { att_type: AttributeType, expected: usize, found: usize },
    #[error("The {att_type} attribute has {found} components per point, at least {expected} are needed")]
    ComponentCountMismatch { att_type: AttributeType, expected: usize, found: usize },
    #[error("No {0} attribute found in the geometry")]
    MissingRequiredAttribute(AttributeType),
}


/// Converts decoded geometry into a [GeometryBuffer].
///
/// Position is required. Color, normal and texture coordinate are optional and defaulted
/// independently. Faces are read only when `geometry_type` is a mesh. All scratch
/// attribute values are dropped before this returns.
pub fn convert<G>(geometry: &G, geometry_type: GeometryType) -> Result<GeometryBuffer, Err>
    where G: DecodedGeometry + ?Sized
{
    let position = attribute::extract_required(geometry, AttributeType::Position)?;
    let color = attribute::extract_optional(geometry, AttributeType::Color)?;
    let normal = attribute::extract_optional(geometry, AttributeType::Normal)?;
    let tex_coord = attribute::extract_optional(geometry, AttributeType::TextureCoordinate)?;

    let buffer::Channels { vertices, colors, normals, uvs } = buffer::build(
        &position,
        color.as_ref(),
        normal.as_ref(),
        tex_coord.as_ref(),
    );

    let indices = if geometry_type.is_mesh() {
        indices::reconstruct_indices(geometry)
    } else {
        Vec::new()
    };

    Ok(
        GeometryBuffer {
            indices,
            vertices,
            colors,
            normals,
            uvs,
            geometry_type,
            color_attribute: color.as_ref().map(AttributeValues::id),
            normal_attribute: normal.as_ref().map(AttributeValues::id),
            tex_coord_attribute: tex_coord.as_ref().map(AttributeValues::id),
            completed_at: SystemTime::now(),
        }
    )
}
