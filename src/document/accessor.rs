use crate::{field::is_default, Extensions};

use super::Extras;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
#[repr(u32)]
pub enum ComponentType {
	SignedByte = 5120,
	UnsignedByte = 5121,
	SignedShort = 5122,
	UnsignedShort = 5123,
	UnsignedInt = 5125,
	#[default]
	Float = 5126,
}

impl ComponentType {
	pub fn byte_size(self) -> usize {
		match self {
			Self::SignedByte | Self::UnsignedByte => 1,
			Self::SignedShort | Self::UnsignedShort => 2,
			Self::UnsignedInt | Self::Float => 4,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum AccessorType {
	#[default]
	#[serde(rename = "SCALAR")]
	Scalar,
	#[serde(rename = "VEC2")]
	Vec2,
	#[serde(rename = "VEC3")]
	Vec3,
	#[serde(rename = "VEC4")]
	Vec4,
	#[serde(rename = "MAT2")]
	Mat2,
	#[serde(rename = "MAT3")]
	Mat3,
	#[serde(rename = "MAT4")]
	Mat4,
}

impl AccessorType {
	pub fn components(self) -> usize {
		match self {
			Self::Scalar => 1,
			Self::Vec2 => 2,
			Self::Vec3 => 3,
			Self::Vec4 | Self::Mat2 => 4,
			Self::Mat3 => 9,
			Self::Mat4 => 16,
		}
	}
}

/// A typed view into a buffer view.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub buffer_view: Option<u32>,
	#[serde(default, skip_serializing_if = "is_default")]
	pub byte_offset: u32,
	pub component_type: ComponentType,
	#[serde(default, skip_serializing_if = "is_default")]
	pub normalized: bool,
	pub count: u32,
	#[serde(rename = "type")]
	pub ty: AccessorType,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub max: Vec<f64>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub min: Vec<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sparse: Option<Sparse>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

/// Attributes that deviate from the accessor's initialization value.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sparse {
	pub count: u32,
	pub indices: SparseIndices,
	pub values: SparseValues,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseIndices {
	pub buffer_view: u32,
	#[serde(default, skip_serializing_if = "is_default")]
	pub byte_offset: u32,
	/// One of the unsigned integer types.
	pub component_type: ComponentType,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseValues {
	pub buffer_view: u32,
	#[serde(default, skip_serializing_if = "is_default")]
	pub byte_offset: u32,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}
