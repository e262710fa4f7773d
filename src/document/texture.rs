use crate::{field::is_default, resolve, Extensions, GltfError};

use super::Extras;

/// Reference to a texture from a material.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
	pub index: u32,
	/// Set index of the `TEXCOORD_n` attribute used for mapping.
	#[serde(default, skip_serializing_if = "is_default")]
	pub tex_coord: u32,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Texture {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sampler: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<u32>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
#[repr(u32)]
pub enum MagFilter {
	Nearest = 9728,
	Linear = 9729,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
#[repr(u32)]
pub enum MinFilter {
	Nearest = 9728,
	Linear = 9729,
	NearestMipmapNearest = 9984,
	LinearMipmapNearest = 9985,
	NearestMipmapLinear = 9986,
	LinearMipmapLinear = 9987,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
#[repr(u32)]
pub enum WrappingMode {
	ClampToEdge = 33071,
	MirroredRepeat = 33648,
	#[default]
	Repeat = 10497,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mag_filter: Option<MagFilter>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_filter: Option<MinFilter>,
	#[serde(default, skip_serializing_if = "is_default")]
	pub wrap_s: WrappingMode,
	#[serde(default, skip_serializing_if = "is_default")]
	pub wrap_t: WrappingMode,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

/// Image data referenced either by `uri` or by `buffer_view`, `mime_type` is required with the latter.
///
/// Images reached through a buffer view are left to the consumer to slice out of the loaded buffer.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uri: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mime_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub buffer_view: Option<u32>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl Image {
	pub fn is_embedded_resource(&self) -> bool {
		self.uri.as_deref().is_some_and(|uri| resolve::image_payload(uri).is_some())
	}

	/// Decodes an embedded PNG or JPEG data uri. `None` if the image is not embedded.
	pub fn embedded_data(&self) -> Result<Option<Vec<u8>>, GltfError> {
		self.uri.as_deref()
			.and_then(resolve::image_payload)
			.map(resolve::decode_base64)
			.transpose()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sampler_defaults() {
		let sampler: Sampler = serde_json::from_str(r#"{"magFilter":9729,"wrapT":33071}"#).unwrap();
		assert_eq!(sampler.mag_filter, Some(MagFilter::Linear));
		assert_eq!(sampler.min_filter, None);
		assert_eq!(sampler.wrap_s, WrappingMode::Repeat);
		assert_eq!(sampler.wrap_t, WrappingMode::ClampToEdge);
		assert_eq!(serde_json::to_string(&sampler).unwrap(), r#"{"magFilter":9729,"wrapT":33071}"#);
	}

	#[test]
	fn embedded_images() {
		let png = Image { uri: Some("data:image/png;base64,iVBORw==".into()), ..Default::default() };
		assert!(png.is_embedded_resource());
		assert_eq!(png.embedded_data().unwrap(), Some(vec![0x89, b'P', b'N', b'G']));

		let jpeg = Image { uri: Some("data:image/jpeg;base64,/9j/".into()), ..Default::default() };
		assert_eq!(jpeg.embedded_data().unwrap(), Some(vec![0xFF, 0xD8, 0xFF]));

		let external = Image { uri: Some("albedo.png".into()), ..Default::default() };
		assert!(!external.is_embedded_resource());
		assert_eq!(external.embedded_data().unwrap(), None);

		let octet = Image { uri: Some("data:application/octet-stream;base64,QUJD".into()), ..Default::default() };
		assert!(!octet.is_embedded_resource());
	}

	#[test]
	fn broken_embedded_image() {
		let image = Image { uri: Some("data:image/png;base64,@@@".into()), ..Default::default() };
		assert!(image.embedded_data().is_err());
	}
}
