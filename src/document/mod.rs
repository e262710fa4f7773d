//! Typed glTF 2.0 document.
//!
//! Entities reference each other by index into the sibling vectors of [`Document`]. Indices are not
//! bounds checked when decoding.

use std::collections::BTreeMap;

use crate::{field::is_default, resolve, Extensions, GltfError};

mod accessor;
mod animation;
mod camera;
mod material;
mod node;
mod texture;

pub use accessor::*;
pub use animation::*;
pub use camera::*;
pub(crate) use camera::take_projection_fault;
pub use material::*;
pub use node::*;
pub use texture::*;

pub type Extras = Option<serde_json::Value>;

/// Vertex attribute name to accessor index.
pub type Attributes = BTreeMap<String, u32>;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub extensions_used: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub extensions_required: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub accessors: Vec<Accessor>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub animations: Vec<Animation>,
	pub asset: Asset,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub buffers: Vec<Buffer>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub buffer_views: Vec<BufferView>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub cameras: Vec<Camera>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub images: Vec<Image>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub materials: Vec<Material>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub meshes: Vec<Mesh>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub nodes: Vec<Node>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub samplers: Vec<Sampler>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scene: Option<u32>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub scenes: Vec<Scene>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub skins: Vec<Skin>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub textures: Vec<Texture>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

/// Metadata about the asset.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub copyright: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub generator: Option<String>,
	pub version: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_version: Option<String>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl Default for Asset {
	fn default() -> Self {
		Self {
			copyright: None,
			generator: None,
			version: String::from("2.0"),
			min_version: None,
			extensions: Extensions::new(),
			extras: None,
		}
	}
}

/// Binary payload referenced by buffer views.
///
/// `data` is filled in after the JSON has been decoded. It stays empty when the resource loader chose
/// not to load an external buffer.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uri: Option<String>,
	pub byte_length: u32,
	#[serde(skip)]
	pub data: Vec<u8>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl Buffer {
	pub fn is_embedded_resource(&self) -> bool {
		self.uri.as_deref().is_some_and(|uri| uri.starts_with(resolve::OCTET_STREAM_PREFIX))
	}

	/// Decodes an embedded data uri. `None` if the buffer is not embedded.
	pub fn embedded_data(&self) -> Result<Option<Vec<u8>>, GltfError> {
		self.uri.as_deref()
			.and_then(|uri| uri.strip_prefix(resolve::OCTET_STREAM_PREFIX))
			.map(resolve::decode_base64)
			.transpose()
	}

	/// Points `uri` at an embedded copy of `data`.
	pub fn embed(&mut self) {
		self.uri = Some(resolve::encode_data_uri(resolve::OCTET_STREAM_PREFIX, &self.data));
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
#[repr(u32)]
pub enum Target {
	ArrayBuffer = 34962,
	ElementArrayBuffer = 34963,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub buffer: u32,
	#[serde(default, skip_serializing_if = "is_default")]
	pub byte_offset: u32,
	pub byte_length: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub byte_stride: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub target: Option<Target>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

impl BufferView {
	/// The viewed bytes, if the buffer is loaded and the view lies inside it.
	pub fn slice<'d>(&self, buffers: &'d [Buffer]) -> Option<&'d [u8]> {
		let buffer = buffers.get(self.buffer as usize)?;
		let start = self.byte_offset as usize;
		buffer.data.get(start..start.checked_add(self.byte_length as usize)?)
	}
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub nodes: Vec<u32>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inverse_bind_matrices: Option<u32>,
	/// Root node of the skeleton, joints resolve to the scene root when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub skeleton: Option<u32>,
	#[serde(default)]
	pub joints: Vec<u32>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
#[repr(u32)]
pub enum PrimitiveMode {
	Points = 0,
	Lines = 1,
	LineLoop = 2,
	LineStrip = 3,
	#[default]
	Triangles = 4,
	TriangleStrip = 5,
	TriangleFan = 6,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Primitive {
	#[serde(default)]
	pub attributes: Attributes,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub indices: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub material: Option<u32>,
	#[serde(default, skip_serializing_if = "is_default")]
	pub mode: PrimitiveMode,
	/// Morph targets, only POSITION, NORMAL and TANGENT are allowed as keys.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub targets: Vec<Attributes>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mesh {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default)]
	pub primitives: Vec<Primitive>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub weights: Vec<f64>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}
