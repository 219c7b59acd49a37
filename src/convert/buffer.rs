//! Packs extracted attributes into flat render buffers.

use crate::core::shared::PointIdx;
use super::attribute::AttributeValues;

/// Color written for every point when the geometry has no color attribute.
pub const DEFAULT_COLOR: [f32; 3] = [1.0; 3];

/// The per-point arrays of a [GeometryBuffer](super::GeometryBuffer).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Channels {
    pub vertices: Vec<f32>,
    pub colors: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
}

/// Builds the per-point arrays. The point count is the one of `position`; the optional
/// attributes come out of the same geometry and cover the same points.
///
/// Absent normals and texture coordinates stay zero; absent colors become [DEFAULT_COLOR].
pub(crate) fn build(
    position: &AttributeValues,
    color: Option<&AttributeValues>,
    normal: Option<&AttributeValues>,
    tex_coord: Option<&AttributeValues>,
) -> Channels {
    let num_points = position.num_points();
    let num_vertex_coordinates = num_points * 3;
    let num_texture_coordinates = num_points * 2;

    let mut vertices = vec![0.0_f32; num_vertex_coordinates];
    let mut colors = vec![0.0_f32; num_vertex_coordinates];
    let mut normals = vec![0.0_f32; num_vertex_coordinates];
    let mut uvs = vec![0.0_f32; num_texture_coordinates];

    // position, color and normal share the 3-component stride
    for p in PointIdx::range(num_points) {
        let i = usize::from(p) * 3;
        vertices[i..i + 3].copy_from_slice(position.point(p));
        match color {
            Some(c) => colors[i..i + 3].copy_from_slice(c.point(p)),
            None => colors[i..i + 3].copy_from_slice(&DEFAULT_COLOR),
        }
        if let Some(n) = normal {
            normals[i..i + 3].copy_from_slice(n.point(p));
        }
    }

    if let Some(tex_coord) = tex_coord {
        for (dst, src) in uvs.chunks_exact_mut(2).zip(tex_coord.as_slice().chunks_exact(2)) {
            dst.copy_from_slice(src);
        }
    }

    Channels { vertices, colors, normals, uvs }
}
