//! GLB container framing.
//!
//! A GLB file starts with a 12 byte header (`magic`, `version`, `length`) immediately followed by the
//! header of the mandatory JSON chunk. Both are read in one 20 byte peek so that plain JSON input can be
//! handed to the JSON parser untouched.

use std::io::{self, Read, Write};

use crate::{GltfError, ReadQuotas};

pub const MAGIC: u32 = 0x46546C67;
pub const VERSION: u32 = 2;
pub const CHUNK_JSON: u32 = 0x4E4F534A;
pub const CHUNK_BIN: u32 = 0x004E4942;

pub const HEADER_SIZE: usize = 12;
pub const CHUNK_HEADER_SIZE: usize = 8;
pub const PEEK_SIZE: usize = HEADER_SIZE + CHUNK_HEADER_SIZE;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ChunkHeader {
	pub length: u32,
	pub ty: u32,
}

impl ChunkHeader {
	// little endian <-> native, the conversion is its own inverse
	fn le(self) -> Self {
		Self { length: u32::from_le(self.length), ty: u32::from_le(self.ty) }
	}

	pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
		let mut bytes = [0u8; CHUNK_HEADER_SIZE];
		r.read_exact(&mut bytes)?;
		Ok(bytemuck::pod_read_unaligned::<Self>(&bytes).le())
	}

	pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
		w.write_all(bytemuck::bytes_of(&self.le()))
	}
}

/// The GLB header together with the header of the JSON chunk that must follow it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlbHeader {
	pub magic: u32,
	pub version: u32,
	pub length: u32,
	pub json: ChunkHeader,
}

impl GlbHeader {
	fn le(self) -> Self {
		Self {
			magic: u32::from_le(self.magic),
			version: u32::from_le(self.version),
			length: u32::from_le(self.length),
			json: self.json.le(),
		}
	}

	pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
		w.write_all(bytemuck::bytes_of(&self.le()))
	}

	fn validate(&self, quotas: &ReadQuotas) -> Result<(), GltfError> {
		quotas.check_container_length(self.length)?;
		if self.version != VERSION {
			return Err(GltfError::UnsupportedVersion(self.version));
		}
		if self.json.ty != CHUNK_JSON || self.json.length as u64 + PEEK_SIZE as u64 > self.length as u64 {
			return Err(GltfError::InvalidJsonChunk);
		}
		Ok(())
	}
}

/// Reader that can look at the first [`PEEK_SIZE`] bytes of a stream without consuming them.
pub struct PeekReader<R> {
	inner: R,
	head: [u8; PEEK_SIZE],
	len: usize,
	pos: usize,
}

impl<R: Read> PeekReader<R> {
	pub fn new(inner: R) -> Self {
		Self { inner, head: [0; PEEK_SIZE], len: 0, pos: 0 }
	}

	/// Returns up to [`PEEK_SIZE`] unconsumed bytes from the start of the stream.
	/// Fewer bytes are only returned if the stream ends early.
	pub fn peek(&mut self) -> io::Result<&[u8]> {
		while self.len < PEEK_SIZE {
			match self.inner.read(&mut self.head[self.len..]) {
				Ok(0) => break,
				Ok(n) => self.len += n,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
				Err(e) => return Err(e),
			}
		}
		Ok(&self.head[self.pos..self.len])
	}

	pub fn consume(&mut self, n: usize) {
		self.pos = (self.pos + n).min(self.len);
	}
}

impl<R: Read> Read for PeekReader<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		if self.pos < self.len {
			let n = buf.len().min(self.len - self.pos);
			buf[..n].copy_from_slice(&self.head[self.pos..self.pos + n]);
			self.pos += n;
			Ok(n)
		} else {
			self.inner.read(buf)
		}
	}
}

/// Detects GLB framing. Returns `None` and leaves the stream untouched if the magic does not match,
/// otherwise consumes and validates the header.
pub fn read_glb_header<R: Read>(r: &mut PeekReader<R>, quotas: &ReadQuotas) -> Result<Option<GlbHeader>, GltfError> {
	let Some(bytes) = r.peek()?.first_chunk::<PEEK_SIZE>() else {
		return Ok(None);
	};
	let header = bytemuck::pod_read_unaligned::<GlbHeader>(bytes).le();
	if header.magic != MAGIC {
		return Ok(None);
	}
	r.consume(PEEK_SIZE);
	header.validate(quotas)?;
	Ok(Some(header))
}

fn padded_len(len: usize) -> usize {
	len.next_multiple_of(4)
}

fn to_u32(len: usize) -> io::Result<u32> {
	u32::try_from(len).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "glb exceeds 4 GiB"))
}

/// Writes a complete GLB container. The JSON chunk is padded with spaces and the BIN chunk with zeros.
pub fn write_glb<W: Write>(w: &mut W, json: &[u8], bin: Option<&[u8]>) -> io::Result<()> {
	let json_len = padded_len(json.len());
	let bin_len = bin.map(|b| padded_len(b.len()));
	let total = PEEK_SIZE + json_len + bin_len.map_or(0, |len| CHUNK_HEADER_SIZE + len);

	GlbHeader {
		magic: MAGIC,
		version: VERSION,
		length: to_u32(total)?,
		json: ChunkHeader { length: to_u32(json_len)?, ty: CHUNK_JSON },
	}.write(w)?;
	w.write_all(json)?;
	w.write_all(&b"   "[..json_len - json.len()])?;

	if let (Some(bin), Some(bin_len)) = (bin, bin_len) {
		ChunkHeader { length: to_u32(bin_len)?, ty: CHUNK_BIN }.write(w)?;
		w.write_all(bin)?;
		w.write_all(&[0u8; 3][..bin_len - bin.len()])?;
	}
	Ok(())
}
