use crate::{field::{is_default, Cutoff, Factor, Rgb, Rgba}, Extensions};

use super::{Extras, TextureInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlphaMode {
	#[default]
	Opaque,
	Mask,
	Blend,
}

/// The appearance of a primitive.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub normal_texture: Option<NormalTexture>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub occlusion_texture: Option<OcclusionTexture>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emissive_texture: Option<TextureInfo>,
	#[serde(default, skip_serializing_if = "Rgb::is_omitted")]
	pub emissive_factor: Rgb,
	#[serde(default, skip_serializing_if = "is_default")]
	pub alpha_mode: AlphaMode,
	/// Only meaningful with [`AlphaMode::Mask`].
	#[serde(default, skip_serializing_if = "Cutoff::is_omitted")]
	pub alpha_cutoff: Cutoff,
	#[serde(default, skip_serializing_if = "is_default")]
	pub double_sided: bool,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl Material {
	pub fn alpha_cutoff(&self) -> f64 {
		self.alpha_cutoff.get()
	}

	pub fn emissive_factor(&self) -> [f64; 3] {
		self.emissive_factor.get()
	}
}

/// Metallic-roughness parameters of the PBR material model.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
	/// Linear RGBA, each component in `0..=1`.
	#[serde(default, skip_serializing_if = "Rgba::is_omitted")]
	pub base_color_factor: Rgba,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base_color_texture: Option<TextureInfo>,
	#[serde(default, skip_serializing_if = "Factor::is_omitted")]
	pub metallic_factor: Factor,
	#[serde(default, skip_serializing_if = "Factor::is_omitted")]
	pub roughness_factor: Factor,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub metallic_roughness_texture: Option<TextureInfo>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl PbrMetallicRoughness {
	pub fn base_color_factor(&self) -> [f64; 4] {
		self.base_color_factor.get()
	}

	pub fn metallic_factor(&self) -> f64 {
		self.metallic_factor.get()
	}

	pub fn roughness_factor(&self) -> f64 {
		self.roughness_factor.get()
	}
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalTexture {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub index: Option<u32>,
	#[serde(default, skip_serializing_if = "is_default")]
	pub tex_coord: u32,
	#[serde(default, skip_serializing_if = "Factor::is_omitted")]
	pub scale: Factor,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl NormalTexture {
	pub fn scale(&self) -> f64 {
		self.scale.get()
	}
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcclusionTexture {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub index: Option<u32>,
	#[serde(default, skip_serializing_if = "is_default")]
	pub tex_coord: u32,
	#[serde(default, skip_serializing_if = "Factor::is_omitted")]
	pub strength: Factor,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl OcclusionTexture {
	pub fn strength(&self) -> f64 {
		self.strength.get()
	}
}
