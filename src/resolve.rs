//! Materializes buffer payloads once the document JSON has been decoded.

use std::{io::{self, Read}, path::{Component, Path}};

use base64::Engine;

use crate::{glb::{ChunkHeader, CHUNK_BIN}, Buffer, GltfError, ReadQuotas};

pub const OCTET_STREAM_PREFIX: &str = "data:application/octet-stream;base64,";
pub const PNG_PREFIX: &str = "data:image/png;base64,";
pub const JPEG_PREFIX: &str = "data:image/jpeg;base64,";

/// Stream handed out by a resource callback for an external buffer.
pub type ResourceReader = Box<dyn Read>;

pub(crate) fn decode_base64(payload: &str) -> Result<Vec<u8>, GltfError> {
	let data = base64::engine::general_purpose::STANDARD.decode(payload)?;
	if data.is_empty() {
		return Err(GltfError::EmptyEmbeddedData);
	}
	Ok(data)
}

pub(crate) fn encode_data_uri(prefix: &str, data: &[u8]) -> String {
	let mut uri = String::from(prefix);
	base64::engine::general_purpose::STANDARD.encode_string(data, &mut uri);
	uri
}

/// The base64 part of an embedded PNG or JPEG uri.
pub(crate) fn image_payload(uri: &str) -> Option<&str> {
	uri.strip_prefix(PNG_PREFIX).or_else(|| uri.strip_prefix(JPEG_PREFIX))
}

/// Rejects uris that could escape the directory the document was loaded from.
pub fn validate_buffer_uri(uri: &str) -> Result<(), GltfError> {
	if uri.is_empty() {
		return Err(GltfError::InvalidURI(uri.to_owned()));
	}
	if uri.split(['/', '\\']).any(|segment| segment == "..")
		|| Path::new(uri).components().any(|c| c == Component::ParentDir)
	{
		return Err(GltfError::ParentDirURI(uri.to_owned()));
	}
	if uri.starts_with(['/', '\\']) || Path::new(uri).is_absolute() {
		return Err(GltfError::AbsoluteURI(uri.to_owned()));
	}
	Ok(())
}

fn read_payload<R: Read + ?Sized>(r: &mut R, len: u32) -> io::Result<Vec<u8>> {
	let mut data = vec![0u8; len as usize];
	r.read_exact(&mut data)?;
	Ok(data)
}

fn read_bin_chunk<R: Read>(bin: &mut R, byte_length: u32) -> Result<Vec<u8>, GltfError> {
	let header = match ChunkHeader::read(bin) {
		Ok(header) => header,
		Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Err(GltfError::InvalidBinChunk),
		Err(e) => return Err(e.into()),
	};
	if header.ty != CHUNK_BIN || header.length < byte_length {
		return Err(GltfError::InvalidBinChunk);
	}
	Ok(read_payload(bin, byte_length)?)
}

/// Fills `buffer.data` from the GLB BIN chunk, an embedded data uri or the resource callback.
///
/// `bin` is only given for the first buffer of a GLB container, and is only used if that buffer has no uri.
pub(crate) fn resolve_buffer<R, L>(
	index: usize,
	buffer: &mut Buffer,
	bin: Option<&mut R>,
	load: &mut L,
	quotas: &ReadQuotas,
) -> Result<(), GltfError>
where
	R: Read,
	L: FnMut(&str) -> io::Result<Option<ResourceReader>> + ?Sized,
{
	if buffer.byte_length == 0 {
		return Err(GltfError::ZeroByteLength(index));
	}
	quotas.check_buffer_length(index, buffer.byte_length)?;

	let uri = match (buffer.uri.as_deref(), bin) {
		(None, Some(bin)) => {
			tracing::debug!("buffer {index}: reading glb bin chunk");
			buffer.data = read_bin_chunk(bin, buffer.byte_length)?;
			tracing::trace!("buffer {index}: {} bytes", buffer.data.len());
			return Ok(());
		},
		(None, None) => return Err(GltfError::MissingURI(index)),
		(Some(uri), _) => uri,
	};

	if let Some(payload) = uri.strip_prefix(OCTET_STREAM_PREFIX) {
		tracing::debug!("buffer {index}: decoding embedded data uri");
		buffer.data = decode_base64(payload)?;
	} else {
		validate_buffer_uri(uri)?;
		tracing::debug!("buffer {index}: loading external resource \"{uri}\"");
		match load(uri)? {
			Some(mut r) => buffer.data = read_payload(&mut r, buffer.byte_length)?,
			None => {
				tracing::debug!("buffer {index}: loader skipped \"{uri}\"");
				return Ok(());
			},
		}
	}
	tracing::trace!("buffer {index}: {} bytes", buffer.data.len());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;

	type NoBin = &'static [u8];

	fn buffer(uri: Option<&str>, byte_length: u32) -> Buffer {
		Buffer { uri: uri.map(String::from), byte_length, ..Default::default() }
	}

	fn never(uri: &str) -> io::Result<Option<ResourceReader>> {
		panic!("loader called for {uri}")
	}

	#[test]
	fn embedded_octet_stream() {
		let mut b = buffer(Some("data:application/octet-stream;base64,QUJD"), 3);
		resolve_buffer::<NoBin, _>(0, &mut b, None, &mut never, &ReadQuotas::default()).unwrap();
		assert_eq!(b.data, b"ABC");
	}

	#[test]
	fn empty_embedded_payload_is_an_error() {
		let mut b = buffer(Some(OCTET_STREAM_PREFIX), 1);
		let err = resolve_buffer::<NoBin, _>(0, &mut b, None, &mut never, &ReadQuotas::default()).unwrap_err();
		assert!(matches!(err, GltfError::EmptyEmbeddedData));
	}

	#[test]
	fn undecodable_embedded_payload_is_an_error() {
		let mut b = buffer(Some("data:application/octet-stream;base64,@@@"), 3);
		let err = resolve_buffer::<NoBin, _>(0, &mut b, None, &mut never, &ReadQuotas::default()).unwrap_err();
		assert!(matches!(err, GltfError::InvalidBase64(_)));
		assert_eq!(err.kind(), ErrorKind::MalformedBufferUri);
		assert!(b.data.is_empty());
	}

	#[test]
	fn unsafe_uris_never_reach_the_loader() {
		for uri in ["../secret.bin", "a/../../b.bin", "..\\b.bin", "/etc/passwd", "\\\\server\\share", ""] {
			let mut b = buffer(Some(uri), 4);
			let err = resolve_buffer::<NoBin, _>(0, &mut b, None, &mut never, &ReadQuotas::default()).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::MalformedBufferUri, "{uri}");
		}
	}

	#[test]
	fn safe_uris() {
		assert!(validate_buffer_uri("mesh.bin").is_ok());
		assert!(validate_buffer_uri("data/mesh..v2.bin").is_ok());
		assert!(matches!(validate_buffer_uri("../x.bin"), Err(GltfError::ParentDirURI(_))));
		assert!(matches!(validate_buffer_uri("/x.bin"), Err(GltfError::AbsoluteURI(_))));
	}

	#[test]
	fn external_payload_reads_byte_length() {
		let mut seen = vec![];
		let mut load = |uri: &str| -> io::Result<Option<ResourceReader>> {
			seen.push(uri.to_owned());
			Ok(Some(Box::new(io::Cursor::new(vec![1u8, 2, 3, 4, 5]))))
		};
		let mut b = buffer(Some("mesh.bin"), 4);
		resolve_buffer::<NoBin, _>(0, &mut b, None, &mut load, &ReadQuotas::default()).unwrap();
		assert_eq!(b.data, [1, 2, 3, 4]);
		assert_eq!(seen, ["mesh.bin"]);
	}

	#[test]
	fn short_external_payload_is_an_io_error() {
		let mut load = |_: &str| -> io::Result<Option<ResourceReader>> { Ok(Some(Box::new(io::Cursor::new(vec![1u8])))) };
		let mut b = buffer(Some("mesh.bin"), 4);
		let err = resolve_buffer::<NoBin, _>(0, &mut b, None, &mut load, &ReadQuotas::default()).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Io);
	}

	#[test]
	fn loader_may_skip_a_buffer() {
		let mut load = |_: &str| -> io::Result<Option<ResourceReader>> { Ok(None) };
		let mut b = buffer(Some("mesh.bin"), 4);
		resolve_buffer::<NoBin, _>(0, &mut b, None, &mut load, &ReadQuotas::default()).unwrap();
		assert!(b.data.is_empty());
	}

	#[test]
	fn loader_errors_propagate() {
		let mut load = |_: &str| -> io::Result<Option<ResourceReader>> { Err(io::ErrorKind::NotFound.into()) };
		let mut b = buffer(Some("mesh.bin"), 4);
		let err = resolve_buffer::<NoBin, _>(0, &mut b, None, &mut load, &ReadQuotas::default()).unwrap_err();
		assert!(matches!(err, GltfError::IoError(e) if e.kind() == io::ErrorKind::NotFound));
	}

	#[test]
	fn bin_chunk() {
		let mut chunk = vec![];
		ChunkHeader { length: 8, ty: CHUNK_BIN }.write(&mut chunk).unwrap();
		chunk.extend_from_slice(&[9, 8, 7, 6, 5, 0, 0, 0]);
		let mut b = buffer(None, 5);
		resolve_buffer(0, &mut b, Some(&mut chunk.as_slice()), &mut never, &ReadQuotas::default()).unwrap();
		assert_eq!(b.data, [9, 8, 7, 6, 5]);
	}

	#[test]
	fn bin_chunk_must_cover_byte_length() {
		let mut chunk = vec![];
		ChunkHeader { length: 4, ty: CHUNK_BIN }.write(&mut chunk).unwrap();
		chunk.extend_from_slice(&[1, 2, 3, 4]);
		let mut b = buffer(None, 5);
		let err = resolve_buffer(0, &mut b, Some(&mut chunk.as_slice()), &mut never, &ReadQuotas::default()).unwrap_err();
		assert!(matches!(err, GltfError::InvalidBinChunk));

		let mut b = buffer(None, 5);
		let err = resolve_buffer(0, &mut b, Some(&mut &b""[..]), &mut never, &ReadQuotas::default()).unwrap_err();
		assert!(matches!(err, GltfError::InvalidBinChunk));
	}

	#[test]
	fn buffer_checks_come_first() {
		let mut b = buffer(None, 0);
		let err = resolve_buffer::<NoBin, _>(3, &mut b, None, &mut never, &ReadQuotas::default()).unwrap_err();
		assert!(matches!(err, GltfError::ZeroByteLength(3)));

		let mut b = buffer(Some("../secret.bin"), 17);
		let quotas = ReadQuotas { max_memory_allocation: 16, ..ReadQuotas::default() };
		let err = resolve_buffer::<NoBin, _>(0, &mut b, None, &mut never, &quotas).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Quota);

		let mut b = buffer(None, 4);
		let err = resolve_buffer::<NoBin, _>(1, &mut b, None, &mut never, &ReadQuotas::default()).unwrap_err();
		assert!(matches!(err, GltfError::MissingURI(1)));
	}
}
