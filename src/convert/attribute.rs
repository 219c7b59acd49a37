//! Attribute lookup and extraction into point-major scratch buffers.

use crate::core::attribute::{AttributeId, AttributeType};
use crate::core::geometry::DecodedGeometry;
use crate::core::shared::PointIdx;
use super::Err;

/// Values of one attribute, `att_type.num_components()` per point, point-major.
/// Lives only for the duration of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValues {
    id: AttributeId,
    att_type: AttributeType,
    values: Vec<f32>,
}

impl AttributeValues {
    #[inline]
    pub fn id(&self) -> AttributeId {
        self.id
    }

    #[inline]
    pub fn num_components(&self) -> usize {
        self.att_type.num_components()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.values.len().checked_div(self.num_components()).unwrap_or(0)
    }

    /// The components of a single point.
    #[inline]
    pub fn point(&self, p: PointIdx) -> &[f32] {
        let n = self.num_components();
        let start = usize::from(p) * n;
        &self.values[start..start + n]
    }
}

/// Finds the attribute playing `att_type` in the geometry.
#[inline]
pub fn locate<G>(geometry: &G, att_type: AttributeType) -> Option<AttributeId>
    where G: DecodedGeometry + ?Sized
{
    geometry.attribute_id(att_type)
}

/// Reads every point's value of the attribute `id`.
///
/// The output always holds `att_type.num_components()` values per point. Sources that store
/// more components per point (RGBA colors, for instance) keep only the leading ones; sources
/// with fewer are rejected.
pub fn extract<G>(geometry: &G, att_type: AttributeType, id: AttributeId) -> Result<AttributeValues, Err>
    where G: DecodedGeometry + ?Sized
{
    let num_points = geometry.num_points();
    let wanted = att_type.num_components();
    let stored = geometry.num_components(id);

    if stored < wanted {
        return Err(Err::ComponentCountMismatch { att_type, expected: wanted, found: stored });
    }

    let expected = stored.checked_mul(num_points)
        .ok_or(Err::AttributeSizeMismatch { att_type, expected: usize::MAX, found: 0 })?;

    let mut scratch = Vec::new();
    geometry.attribute_float_for_all_points(id, &mut scratch);

    if scratch.len() != expected {
        return Err(Err::AttributeSizeMismatch { att_type, expected, found: scratch.len() });
    }

    let values = if stored == wanted {
        scratch
    } else {
        tracing::warn!(
            "{} attribute has {} components per point, keeping the first {}",
            att_type, stored, wanted
        );
        scratch.chunks_exact(stored)
            .flat_map(|point| point[..wanted].iter().copied())
            .collect()
    };

    Ok(AttributeValues { id, att_type, values })
}

/// Looks up and extracts an optional attribute. Absence is not an error.
pub fn extract_optional<G>(geometry: &G, att_type: AttributeType) -> Result<Option<AttributeValues>, Err>
    where G: DecodedGeometry + ?Sized
{
    locate(geometry, att_type)
        .map(|id| extract(geometry, att_type, id))
        .transpose()
}

/// Looks up and extracts an attribute the geometry cannot do without.
pub fn extract_required<G>(geometry: &G, att_type: AttributeType) -> Result<AttributeValues, Err>
    where G: DecodedGeometry + ?Sized
{
    let id = locate(geometry, att_type)
        .ok_or(Err::MissingRequiredAttribute(att_type))?;
    extract(geometry, att_type, id)
}
