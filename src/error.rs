use crate::{quota::QuotaViolation, ProjectionFault};

/// Coarse classification of a [`GltfError`] so callers can branch on the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	Quota,
	MalformedContainer,
	MalformedBufferUri,
	Io,
	JsonSyntax,
	MissingRequiredField,
	InvalidDocument,
}

#[derive(Debug, thiserror::Error)]
pub enum GltfError {
	#[error("invalid path")]
	InvalidPath,
	#[error("io error: {0}")]
	IoError(#[from] std::io::Error),
	#[error("invalid json: {0}")]
	InvalidJSON(#[from] serde_json::error::Error),
	#[error("quota exceeded, {0}")]
	QuotaExceeded(QuotaViolation),
	#[error("unsupported version \"{0}\", only version 2 is supported")]
	UnsupportedVersion(u32),
	#[error("invalid glb json chunk header")]
	InvalidJsonChunk,
	#[error("invalid glb bin chunk header")]
	InvalidBinChunk,
	#[error("buffer {0} has an invalid byteLength of 0")]
	ZeroByteLength(usize),
	#[error("buffer {0} has no uri")]
	MissingURI(usize),
	#[error("uri \"{0}\" must not be absolute")]
	AbsoluteURI(String),
	#[error("uri \"{0}\" must not reference parent directories")]
	ParentDirURI(String),
	#[error("invalid uri \"{0}\"")]
	InvalidURI(String),
	#[error("invalid base64 in data uri: {0}")]
	InvalidBase64(#[from] base64::DecodeError),
	#[error("data uri decoded to an empty payload")]
	EmptyEmbeddedData,
	#[error("{fault} at line {line} column {column}")]
	InvalidCamera { fault: ProjectionFault, line: usize, column: usize },
}

impl GltfError {
	pub fn kind(&self) -> ErrorKind {
		use serde_json::error::Category;
		match self {
			Self::QuotaExceeded(_) => ErrorKind::Quota,
			Self::UnsupportedVersion(_) | Self::InvalidJsonChunk | Self::InvalidBinChunk => ErrorKind::MalformedContainer,
			Self::AbsoluteURI(_) | Self::ParentDirURI(_) | Self::InvalidURI(_)
				| Self::InvalidBase64(_) | Self::EmptyEmbeddedData => ErrorKind::MalformedBufferUri,
			Self::InvalidPath | Self::IoError(_) => ErrorKind::Io,
			Self::ZeroByteLength(_) | Self::MissingURI(_) => ErrorKind::MissingRequiredField,
			Self::InvalidCamera { fault: ProjectionFault::Missing, .. } => ErrorKind::MissingRequiredField,
			Self::InvalidCamera { fault: ProjectionFault::Ambiguous, .. } => ErrorKind::InvalidDocument,
			Self::InvalidJSON(e) => match e.classify() {
				Category::Io => ErrorKind::Io,
				Category::Syntax | Category::Eof => ErrorKind::JsonSyntax,
				Category::Data if e.to_string().starts_with("missing field") => ErrorKind::MissingRequiredField,
				Category::Data => ErrorKind::InvalidDocument,
			},
		}
	}
}
