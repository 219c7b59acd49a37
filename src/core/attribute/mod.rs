use core::fmt;

use serde::{Deserialize, Serialize};


/// Identifies an attribute inside a decoded geometry. Ids are only meaningful for the
/// geometry that handed them out.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeId(usize);

impl AttributeId {
	pub fn new(id: usize) -> Self {
		Self(id)
	}
}

impl fmt::Debug for AttributeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// The logical role of a per-point data channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
	Position,
	Normal,
	Color,
	TextureCoordinate,
	Generic,
}

impl AttributeType {
	/// Number of components per point in the flat output buffer of this role.
	/// `Generic` attributes are never rendered and report zero.
	#[inline]
	pub fn num_components(self) -> usize {
		match self {
			Self::Position | Self::Normal | Self::Color => 3,
			Self::TextureCoordinate => 2,
			Self::Generic => 0,
		}
	}
}

/// Represents a decoded attribute of an in-memory geometry: `num_components` `f32` values
/// per point, stored point-major.
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
	/// attribute id
	id: AttributeId,

	/// attribute type
	att_type: AttributeType,

	/// number of components per point
	num_components: usize,

	/// flat values, `num_components` per point
	values: Vec<f32>,
}

impl Attribute {
	/// Creates an attribute from already flattened values. `values.len()` must be a
	/// multiple of `num_components`.
	pub fn from_flat(id: AttributeId, values: Vec<f32>, num_components: usize, att_type: AttributeType) -> Self {
		assert!(
			num_components > 0 && values.len() % num_components == 0,
			"Flat attribute of length {} cannot hold {}-component values",
			values.len(),
			num_components
		);
		Self {
			id,
			att_type,
			num_components,
			values,
		}
	}

	#[inline]
	pub fn get_id(&self) -> AttributeId {
		self.id
	}

	#[inline]
	pub fn get_attribute_type(&self) -> AttributeType {
		self.att_type
	}

	#[inline]
	pub fn get_num_components(&self) -> usize {
		self.num_components
	}

	#[inline]
	pub fn as_slice(&self) -> &[f32] {
		&self.values
	}
}

impl fmt::Display for AttributeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Position => "position",
			Self::Normal => "normal",
			Self::Color => "color",
			Self::TextureCoordinate => "texture coordinate",
			Self::Generic => "generic",
		};
		f.write_str(name)
	}
}
