use crate::GltfError;

pub const DEFAULT_MAX_BUFFER_COUNT: usize = 8;
pub const DEFAULT_MAX_MEMORY_ALLOCATION: usize = 32 * 1024 * 1024;

/// Read limits protecting the decoder against hostile files.
///
/// Checked before anything is allocated: the declared GLB length, the number of
/// buffers in the parsed document, and the declared `byteLength` of each buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadQuotas {
	pub max_buffer_count: usize,
	pub max_memory_allocation: usize,
}

impl Default for ReadQuotas {
	fn default() -> Self {
		Self {
			max_buffer_count: DEFAULT_MAX_BUFFER_COUNT,
			max_memory_allocation: DEFAULT_MAX_MEMORY_ALLOCATION,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaViolation {
	ContainerLength { length: u64, max: usize },
	BufferCount { count: usize, max: usize },
	BufferLength { index: usize, length: u64, max: usize },
}

impl std::fmt::Display for QuotaViolation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::ContainerLength { length, max } => write!(f, "glb length {length} > max memory allocation {max}"),
			Self::BufferCount { count, max } => write!(f, "buffer count {count} > max buffer count {max}"),
			Self::BufferLength { index, length, max } => write!(f, "buffer {index} byteLength {length} > max memory allocation {max}"),
		}
	}
}

fn exceeds(length: u64, max: usize) -> bool {
	usize::try_from(length).map_or(true, |length| length > max)
}

impl ReadQuotas {
	pub fn check_container_length(&self, length: u32) -> Result<(), GltfError> {
		let length = length as u64;
		if exceeds(length, self.max_memory_allocation) {
			return Err(GltfError::QuotaExceeded(QuotaViolation::ContainerLength { length, max: self.max_memory_allocation }));
		}
		Ok(())
	}

	pub fn check_buffer_count(&self, count: usize) -> Result<(), GltfError> {
		if count > self.max_buffer_count {
			return Err(GltfError::QuotaExceeded(QuotaViolation::BufferCount { count, max: self.max_buffer_count }));
		}
		Ok(())
	}

	pub fn check_buffer_length(&self, index: usize, length: u32) -> Result<(), GltfError> {
		let length = length as u64;
		if exceeds(length, self.max_memory_allocation) {
			return Err(GltfError::QuotaExceeded(QuotaViolation::BufferLength { index, length, max: self.max_memory_allocation }));
		}
		Ok(())
	}
}
