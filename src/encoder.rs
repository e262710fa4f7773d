use std::io::Write;

use crate::{glb, Document, GltfError};

/// Writes documents as glTF JSON or as a GLB container.
///
/// In binary mode the first buffer is stored in the BIN chunk when it has no uri and holds data. Other
/// buffers must point at external or embedded resources, see [`Buffer::embed`](crate::Buffer::embed).
pub struct Encoder<W> {
	w: W,
	binary: bool,
	pretty: bool,
}

impl<W: Write> Encoder<W> {
	pub fn new(w: W) -> Self {
		Self { w, binary: false, pretty: false }
	}

	pub fn binary(mut self, binary: bool) -> Self {
		self.binary = binary;
		self
	}

	/// Indent the JSON.
	pub fn pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}

	pub fn encode(&mut self, doc: &Document) -> Result<(), GltfError> {
		let json = if self.pretty { serde_json::to_vec_pretty(doc)? } else { serde_json::to_vec(doc)? };
		if !self.binary {
			self.w.write_all(&json)?;
			return Ok(());
		}

		let bin = doc.buffers.first()
			.filter(|buffer| buffer.uri.is_none() && !buffer.data.is_empty())
			.map(|buffer| buffer.data.as_slice());
		tracing::debug!("writing glb, json {} bytes, bin {} bytes", json.len(), bin.map_or(0, <[u8]>::len));
		glb::write_glb(&mut self.w, &json, bin)?;
		Ok(())
	}

	pub fn into_inner(self) -> W {
		self.w
	}
}
