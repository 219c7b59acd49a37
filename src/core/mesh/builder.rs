use thiserror::Error;

use crate::core::attribute::{Attribute, AttributeId, AttributeType};
use super::Mesh;

struct PendingAttribute {
    id: AttributeId,
    att_type: AttributeType,
    num_components: usize,
    values: Vec<f32>,
}

/// Assembles a [Mesh] and checks it is consistent before handing it out.
pub struct MeshBuilder {
    attributes: Vec<PendingAttribute>,
    faces: Vec<[usize; 3]>,
    num_points: Option<usize>,
    current_id: usize,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            faces: Vec::new(),
            num_points: None,
            current_id: 0,
        }
    }

    pub fn add_attribute<const N: usize>(&mut self, data: Vec<[f32; N]>, att_type: AttributeType) -> AttributeId {
        self.push(data.into_iter().flatten().collect(), N, att_type)
    }

    /// Adds an attribute whose values are already flattened point-major.
    pub fn add_flat_attribute(&mut self, values: Vec<f32>, num_components: usize, att_type: AttributeType) -> AttributeId {
        self.push(values, num_components, att_type)
    }

    fn push(&mut self, values: Vec<f32>, num_components: usize, att_type: AttributeType) -> AttributeId {
        let id = AttributeId::new(self.current_id);
        self.attributes.push(PendingAttribute { id, att_type, num_components, values });
        self.current_id += 1;
        id
    }

    pub fn set_faces(&mut self, faces: Vec<[usize; 3]>) {
        self.faces = faces;
    }

    /// Fixes the point count. Without it the count is taken from the attributes, or from
    /// the faces when there are no attributes at all.
    pub fn set_num_points(&mut self, num_points: usize) {
        self.num_points = Some(num_points);
    }

    pub fn build(self) -> Result<Mesh, Err> {
        let Self { attributes, faces, num_points, .. } = self;

        Self::check_duplicate_roles(&attributes)?;

        let num_points = match num_points {
            Some(n) => n,
            None => Self::infer_num_points(&attributes, &faces)?,
        };

        let attributes = attributes.into_iter()
            .map(|att| Self::finish_attribute(att, num_points))
            .collect::<Result<Vec<_>, _>>()?;

        let faces = Self::checked_faces(faces, num_points)?;

        Ok(
            Mesh {
                faces,
                attributes,
                num_points,
            }
        )
    }

    fn check_duplicate_roles(attributes: &[PendingAttribute]) -> Result<(), Err> {
        for (i, att) in attributes.iter().enumerate() {
            if att.att_type == AttributeType::Generic {
                continue;
            }
            if attributes[..i].iter().any(|other| other.att_type == att.att_type) {
                return Err(Err::DuplicateAttributeType(att.att_type));
            }
        }
        Ok(())
    }

    fn infer_num_points(attributes: &[PendingAttribute], faces: &[[usize; 3]]) -> Result<usize, Err> {
        if let Some(att) = attributes.first() {
            if att.num_components == 0 {
                return Err(Err::ZeroComponents(att.att_type));
            }
            return Ok(att.values.len() / att.num_components);
        }
        Ok(
            faces.iter()
                .flat_map(|face| face.iter())
                .map(|&p| p + 1)
                .max()
                .unwrap_or(0)
        )
    }

    fn finish_attribute(att: PendingAttribute, num_points: usize) -> Result<Attribute, Err> {
        let PendingAttribute { id, att_type, num_components, values } = att;
        if num_components == 0 {
            return Err(Err::ZeroComponents(att_type));
        }
        if values.len() % num_components != 0 {
            return Err(Err::PartialPoint { att_type, len: values.len(), num_components });
        }
        let found = values.len() / num_components;
        if found != num_points {
            return Err(Err::PointCountMismatch { att_type, expected: num_points, found });
        }
        Ok(Attribute::from_flat(id, values, num_components, att_type))
    }

    fn checked_faces(faces: Vec<[usize; 3]>, num_points: usize) -> Result<Vec<[u32; 3]>, Err> {
        faces.into_iter()
            .enumerate()
            .map(|(face, corners)| {
                let mut out = [0_u32; 3];
                for (o, &point) in out.iter_mut().zip(corners.iter()) {
                    if point >= num_points {
                        return Err(Err::FaceOutOfRange { face, point, num_points });
                    }
                    *o = u32::try_from(point).map_err(|_| Err::IndexOverflow(point))?;
                }
                Ok(out)
            })
            .collect()
    }
}


#[remain::sorted]
#[derive(Error, Debug)]
pub enum Err {
    #[error("More than one {0} attribute")]
    DuplicateAttributeType(AttributeType),
    #[error("Face {face} references point {point}, but there are only {num_points} points")]
    FaceOutOfRange { face: usize, point: usize, num_points: usize },
    #[error("Point index {0} does not fit in a 32-bit index buffer")]
    IndexOverflow(usize),
    #[error("The {att_type} attribute has {len} values, which is not a multiple of {num_components}")]
    PartialPoint { att_type: AttributeType, len: usize, num_components: usize },
    #[error("The {att_type} attribute covers {found} points, expected {expected}")]
    PointCountMismatch { att_type: AttributeType, expected: usize, found: usize },
    #[error("The {0} attribute has zero components")]
    ZeroComponents(AttributeType),
}
