pub mod builder;

use super::attribute::{Attribute, AttributeId, AttributeType};
use super::geometry::DecodedGeometry;
use super::shared::FaceIdx;

/// Represents decoded geometry held in memory.
/// It consists of a list of faces, where each face is defined by three point indices,
/// and a list of attributes ([Attribute]) with one value per point.
/// A mesh without faces is a point cloud.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub(crate) faces: Vec<[u32; 3]>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) num_points: usize,
}

impl Mesh {
    fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|att| att.get_id() == id)
    }
}

impl DecodedGeometry for Mesh {
    fn num_points(&self) -> usize {
        self.num_points
    }

    fn num_faces(&self) -> usize {
        self.faces.len()
    }

    fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    fn attribute_id(&self, att_type: AttributeType) -> Option<AttributeId> {
        self.attributes.iter()
            .find(|att| att.get_attribute_type() == att_type)
            .map(Attribute::get_id)
    }

    fn num_components(&self, id: AttributeId) -> usize {
        self.attribute(id).map_or(0, Attribute::get_num_components)
    }

    fn attribute_float_for_all_points(&self, id: AttributeId, out: &mut Vec<f32>) {
        out.clear();
        if let Some(att) = self.attribute(id) {
            out.extend_from_slice(att.as_slice());
        }
    }

    fn face(&self, face: FaceIdx) -> [u32; 3] {
        self.faces[usize::from(face)]
    }
}


#[cfg(test)]
mod tests {
    use super::builder::MeshBuilder;
    use super::*;

    #[test]
    fn attribute_lookup_by_role() {
        let mut builder = MeshBuilder::new();
        let pos = builder.add_attribute(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], AttributeType::Position);
        builder.set_faces(vec![[0, 1, 2]]);
        let mesh = builder.build().unwrap();

        assert_eq!(mesh.attribute_id(AttributeType::Position), Some(pos));
        assert_eq!(mesh.attribute_id(AttributeType::Color), None);
        assert_eq!(mesh.num_components(pos), 3);
        assert_eq!(mesh.num_faces(), 1);

        let mut out = vec![42.0];
        mesh.attribute_float_for_all_points(pos, &mut out);
        assert_eq!(out, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.face(FaceIdx::from(0)), [0, 1, 2]);
    }

    #[test]
    fn unknown_attribute_id_is_empty() {
        let mut builder = MeshBuilder::new();
        builder.add_attribute(vec![[0.0, 0.0, 0.0]], AttributeType::Position);
        let mesh = builder.build().unwrap();

        let unknown = AttributeId::new(99);
        let mut out = vec![1.0, 2.0];
        mesh.attribute_float_for_all_points(unknown, &mut out);
        assert!(out.is_empty());
        assert_eq!(mesh.num_components(unknown), 0);
        assert_eq!(mesh.num_faces(), 0);
    }
}
