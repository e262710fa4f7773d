use std::{fs::File, io::{self, BufReader, Read}, path::Path, sync::Arc};

use crate::{
	document,
	glb::{self, PeekReader},
	resolve::{self, ResourceReader},
	Document, ExtensionRegistry, GltfError, ReadQuotas,
};

/// Reads glTF JSON or GLB documents and resolves their buffers.
///
/// External buffers are requested from the resource callback by uri. The callback may return `Ok(None)`
/// to leave a buffer unloaded.
pub struct Decoder<'a, R> {
	r: PeekReader<BufReader<R>>,
	cb: Box<dyn FnMut(&str) -> io::Result<Option<ResourceReader>> + 'a>,
	quotas: ReadQuotas,
	registry: Option<Arc<ExtensionRegistry>>,
}

impl<'a, R: Read> Decoder<'a, R> {
	pub fn new<F>(r: R, cb: F) -> Self
	where
		F: FnMut(&str) -> io::Result<Option<ResourceReader>> + 'a,
	{
		Self {
			r: PeekReader::new(BufReader::new(r)),
			cb: Box::new(cb),
			quotas: ReadQuotas::default(),
			registry: None,
		}
	}

	pub fn with_quotas(mut self, quotas: ReadQuotas) -> Self {
		self.quotas = quotas;
		self
	}

	/// Decode extensions with `registry` instead of the global one.
	pub fn with_registry(mut self, registry: Arc<ExtensionRegistry>) -> Self {
		self.registry = Some(registry);
		self
	}

	pub fn decode(&mut self) -> Result<Document, GltfError> {
		let mut doc = Document::default();
		self.decode_into(&mut doc)?;
		Ok(doc)
	}

	/// Decodes into `doc`, replacing its contents.
	///
	/// Buffers are resolved in order. If one fails the ones before it keep their data.
	pub fn decode_into(&mut self, doc: &mut Document) -> Result<(), GltfError> {
		let binary = self.decode_document(doc)?;
		for (index, buffer) in doc.buffers.iter_mut().enumerate() {
			let bin = (binary && index == 0).then_some(&mut self.r);
			resolve::resolve_buffer(index, buffer, bin, &mut *self.cb, &self.quotas)?;
		}
		Ok(())
	}

	fn decode_document(&mut self, doc: &mut Document) -> Result<bool, GltfError> {
		let header = glb::read_glb_header(&mut self.r, &self.quotas)?;
		let registry = self.registry.clone().unwrap_or_else(|| ExtensionRegistry::global().clone());
		let _active = ExtensionRegistry::activate(registry);

		document::take_projection_fault();
		let parsed: serde_json::Result<Document> = if let Some(header) = &header {
			tracing::debug!("glb container, json chunk of {} bytes", header.json.length);
			let json = read_json_chunk(&mut self.r, header.json.length)?;
			serde_json::from_slice(trim_nul_padding(&json))
		} else {
			tracing::debug!("plain json document");
			serde_json::from_reader(&mut self.r)
		};
		let fault = document::take_projection_fault();
		*doc = parsed.map_err(|e| match fault {
			Some(fault) => GltfError::InvalidCamera { fault, line: e.line(), column: e.column() },
			None => GltfError::from(e),
		})?;
		self.quotas.check_buffer_count(doc.buffers.len())?;
		Ok(header.is_some())
	}
}

fn read_json_chunk<R: Read>(r: &mut R, length: u32) -> Result<Vec<u8>, GltfError> {
	let mut json = vec![0u8; length as usize];
	match r.read_exact(&mut json) {
		Ok(()) => Ok(json),
		Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(GltfError::InvalidJsonChunk),
		Err(e) => Err(e.into()),
	}
}

// some writers pad the json chunk with zeros instead of spaces
fn trim_nul_padding(json: &[u8]) -> &[u8] {
	let end = json.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
	&json[..end]
}

/// Opens a `.gltf` or `.glb` file, loading external buffers relative to the file's directory.
pub fn open(path: impl AsRef<Path>) -> Result<Document, GltfError> {
	let path = path.as_ref();
	let dir = path.parent().ok_or(GltfError::InvalidPath)?.to_path_buf();
	let file = File::open(path)?;
	Decoder::new(file, move |uri: &str| -> io::Result<Option<ResourceReader>> {
		Ok(Some(Box::new(File::open(dir.join(uri))?)))
	}).decode()
}
