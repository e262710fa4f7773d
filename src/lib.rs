//! glTF 2.0 reader and writer.
//!
//! [`Decoder`] accepts both plain JSON documents and GLB containers, enforces [`ReadQuotas`] before
//! allocating, and resolves buffer payloads from the BIN chunk, embedded data uris or a caller supplied
//! resource callback. [`Encoder`] writes documents back out.

mod decoder;
mod document;
mod encoder;
mod error;
mod extensions;
mod quota;
mod resolve;

pub mod field;
pub mod glb;

pub use decoder::{open, Decoder};
pub use document::*;
pub use encoder::Encoder;
pub use error::{ErrorKind, GltfError};
pub use extensions::{register_extension, Extension, ExtensionFactory, ExtensionRegistry, ExtensionValue, Extensions};
pub use quota::{QuotaViolation, ReadQuotas, DEFAULT_MAX_BUFFER_COUNT, DEFAULT_MAX_MEMORY_ALLOCATION};
pub use resolve::{validate_buffer_uri, ResourceReader, JPEG_PREFIX, OCTET_STREAM_PREFIX, PNG_PREFIX};

pub use glam;
