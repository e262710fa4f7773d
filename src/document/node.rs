use crate::{field::{Matrix, Rotation, Scale, Translation}, Extensions};

use super::Extras;

/// A node in the node hierarchy.
///
/// The local transform is given either as a column-major `matrix` or as any combination of
/// `translation`, `rotation` and `scale`.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub camera: Option<u32>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub skin: Option<u32>,
	#[serde(default, skip_serializing_if = "Matrix::is_omitted")]
	pub matrix: Matrix,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mesh: Option<u32>,
	/// Unit quaternion in (x, y, z, w) order.
	#[serde(default, skip_serializing_if = "Rotation::is_omitted")]
	pub rotation: Rotation,
	#[serde(default, skip_serializing_if = "Scale::is_omitted")]
	pub scale: Scale,
	#[serde(default, skip_serializing_if = "Translation::is_omitted")]
	pub translation: Translation,
	/// Morph target weights.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub weights: Vec<f64>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl Node {
	pub fn matrix(&self) -> [f64; 16] {
		self.matrix.get()
	}

	pub fn rotation(&self) -> [f64; 4] {
		self.rotation.get()
	}

	pub fn scale(&self) -> [f64; 3] {
		self.scale.get()
	}

	pub fn translation(&self) -> [f64; 3] {
		self.translation.get()
	}

	pub fn local_transform(&self) -> glam::DMat4 {
		if let Some(matrix) = self.matrix.valid() {
			glam::DMat4::from_cols_array(&matrix)
		} else {
			glam::DMat4::from_scale_rotation_translation(
				self.scale().into(),
				glam::DQuat::from_array(self.rotation()),
				self.translation().into(),
			)
		}
	}
}
