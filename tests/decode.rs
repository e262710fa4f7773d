use std::{cell::Cell, io, sync::Arc, thread};

use isopod_gltf::{
	glb, Decoder, Document, ErrorKind, ExtensionRegistry, GltfError, ProjectionFault, QuotaViolation, ReadQuotas,
	ResourceReader,
};

fn no_resources(uri: &str) -> io::Result<Option<ResourceReader>> {
	Err(io::Error::new(io::ErrorKind::NotFound, uri.to_owned()))
}

fn decode(json: &str) -> Result<Document, GltfError> {
	Decoder::new(json.as_bytes(), no_resources).decode()
}

#[test]
fn buffer_count_quota_is_checked_before_loading() {
	let buffers = vec![r#"{"uri":"data:application/octet-stream;base64,QUJD","byteLength":3}"#; 9].join(",");
	let json = format!(r#"{{"asset":{{"version":"2.0"}},"buffers":[{buffers}]}}"#);

	let mut doc = Document::default();
	let err = Decoder::new(json.as_bytes(), no_resources)
		.with_quotas(ReadQuotas { max_buffer_count: 8, ..ReadQuotas::default() })
		.decode_into(&mut doc)
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Quota);
	assert!(matches!(err, GltfError::QuotaExceeded(QuotaViolation::BufferCount { count: 9, max: 8 })));
	assert_eq!(doc.buffers.len(), 9);
	assert!(doc.buffers.iter().all(|b| b.data.is_empty()));
}

#[test]
fn buffer_length_quota() {
	let json = r#"{"asset":{"version":"2.0"},"buffers":[{"uri":"a.bin","byteLength":1025}]}"#;
	let err = Decoder::new(json.as_bytes(), no_resources)
		.with_quotas(ReadQuotas { max_memory_allocation: 1024, ..ReadQuotas::default() })
		.decode()
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Quota);
}

#[test]
fn embedded_buffer() {
	let doc = decode(r#"{"asset":{"version":"2.0"},"buffers":[{"uri":"data:application/octet-stream;base64,QUJD","byteLength":3}]}"#).unwrap();
	assert_eq!(doc.buffers[0].data, b"ABC");
}

#[test]
fn glb_bin_chunk_fills_first_buffer() {
	let json = br#"{"asset":{"version":"2.0"},"buffers":[{"byteLength":6}]}"#;
	let mut glb = vec![];
	glb::write_glb(&mut glb, json, Some(&[1, 2, 3, 4, 5, 6, 7, 8, 9])).unwrap();
	let doc = Decoder::new(glb.as_slice(), no_resources).decode().unwrap();
	assert_eq!(doc.buffers[0].data, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn glb_with_mismatched_bin_chunk() {
	let json = br#"{"asset":{"version":"2.0"},"buffers":[{"byteLength":16}]}"#;
	let mut glb = vec![];
	glb::write_glb(&mut glb, json, Some(&[1, 2, 3, 4])).unwrap();
	let err = Decoder::new(glb.as_slice(), no_resources).decode().unwrap_err();
	assert!(matches!(err, GltfError::InvalidBinChunk));
	assert_eq!(err.kind(), ErrorKind::MalformedContainer);
}

#[test]
fn unregistered_extension_is_kept_verbatim() {
	let doc = decode(r#"{"asset":{"version":"2.0"},"extensions":{"XYZ_foo":{"a":1}}}"#).unwrap();
	let raw = doc.extensions.get("XYZ_foo").and_then(|v| v.as_raw()).unwrap();
	assert_eq!(raw.get(), r#"{"a":1}"#);
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
struct Lod {
	ids: Vec<u32>,
}

#[test]
fn injected_registry_decodes_typed_extensions() {
	let registry = ExtensionRegistry::new();
	registry.register_default::<Lod>("MSFT_lod");
	let json = r#"{"asset":{"version":"2.0"},"nodes":[{"extensions":{"MSFT_lod":{"ids":[1,2]},"MSFT_other":{}}}]}"#;
	let doc = Decoder::new(json.as_bytes(), no_resources).with_registry(Arc::new(registry)).decode().unwrap();
	let extensions = &doc.nodes[0].extensions;
	assert_eq!(extensions.get_as::<Lod>("MSFT_lod"), Some(&Lod { ids: vec![1, 2] }));
	assert!(extensions.get("MSFT_other").unwrap().as_raw().is_some());

	// the injected registry is not used by later decodes
	let doc = decode(json).unwrap();
	assert!(doc.nodes[0].extensions.get_as::<Lod>("MSFT_lod").is_none());
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
struct Tagged {
	tag: String,
}

#[test]
fn global_registration() {
	isopod_gltf::register_extension("TEST_global_tag", || Box::new(Tagged::default()));
	let doc = decode(r#"{"asset":{"version":"2.0","extensions":{"TEST_global_tag":{"tag":"x"}}}}"#).unwrap();
	assert_eq!(doc.asset.extensions.get_as::<Tagged>("TEST_global_tag").map(|t| t.tag.as_str()), Some("x"));
}

#[test]
fn parent_dir_uri_never_reaches_the_callback() {
	let calls = Cell::new(0);
	let json = r#"{"asset":{"version":"2.0"},"buffers":[{"uri":"../secret.bin","byteLength":4}]}"#;
	let err = Decoder::new(json.as_bytes(), |_: &str| -> io::Result<Option<ResourceReader>> {
		calls.set(calls.get() + 1);
		Ok(None)
	}).decode().unwrap_err();
	assert_eq!(err.kind(), ErrorKind::MalformedBufferUri);
	assert_eq!(calls.get(), 0);
}

#[test]
fn earlier_buffers_survive_a_later_failure() {
	let json = r#"{"asset":{"version":"2.0"},"buffers":[
		{"uri":"data:application/octet-stream;base64,QUJD","byteLength":3},
		{"byteLength":4}
	]}"#;
	let mut doc = Document::default();
	let err = Decoder::new(json.as_bytes(), no_resources).decode_into(&mut doc).unwrap_err();
	assert!(matches!(err, GltfError::MissingURI(1)));
	assert_eq!(doc.buffers[0].data, b"ABC");
}

#[test]
fn skipped_external_buffer_stays_empty() {
	let json = r#"{"asset":{"version":"2.0"},"buffers":[{"uri":"big.bin","byteLength":4096}]}"#;
	let doc = Decoder::new(json.as_bytes(), |_: &str| -> io::Result<Option<ResourceReader>> { Ok(None) })
		.decode()
		.unwrap();
	assert_eq!(doc.buffers[0].byte_length, 4096);
	assert!(doc.buffers[0].data.is_empty());
}

#[test]
fn camera_without_projection() {
	let err = decode(r#"{"asset":{"version":"2.0"},"cameras":[{"name":"nothing"}]}"#).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
	assert!(matches!(err, GltfError::InvalidCamera { fault: ProjectionFault::Missing, .. }));
	assert!(err.to_string().contains("camera requires a projection"));
}

#[test]
fn camera_with_both_projections_and_no_type() {
	let err = decode(r#"{"asset":{"version":"2.0"},"cameras":[{
		"perspective":{"yfov":0.8,"znear":0.1},
		"orthographic":{"xmag":1,"ymag":1,"zfar":10,"znear":0.1}
	}]}"#).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidDocument);
	assert!(matches!(err, GltfError::InvalidCamera { fault: ProjectionFault::Ambiguous, .. }));
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
struct Foo {
	a: u32,
}

#[test]
fn concurrent_decoders_keep_their_own_registry() {
	let registry = ExtensionRegistry::new();
	registry.register_default::<Foo>("XYZ_concurrent");
	let registry = Arc::new(registry);
	let json = r#"{"asset":{"version":"2.0"},"extensions":{"XYZ_concurrent":{"a":1}}}"#;

	thread::scope(|s| {
		for worker in 0..8 {
			let registry = registry.clone();
			s.spawn(move || {
				let injected = worker % 2 == 0;
				for _ in 0..100 {
					let mut decoder = Decoder::new(json.as_bytes(), no_resources);
					if injected {
						decoder = decoder.with_registry(registry.clone());
					}
					let doc = decoder.decode().unwrap();
					let value = doc.extensions.get("XYZ_concurrent").unwrap();
					if injected {
						assert_eq!(value.downcast_ref::<Foo>(), Some(&Foo { a: 1 }));
					} else {
						assert_eq!(value.as_raw().map(|raw| raw.get()), Some(r#"{"a":1}"#));
					}
				}
			});
		}
	});
}

#[test]
fn zero_byte_length() {
	let err = decode(r#"{"asset":{"version":"2.0"},"buffers":[{"uri":"a.bin","byteLength":0}]}"#).unwrap_err();
	assert!(matches!(err, GltfError::ZeroByteLength(0)));
}

#[test]
fn missing_byte_length() {
	let err = decode(r#"{"asset":{"version":"2.0"},"buffers":[{"uri":"a.bin"}]}"#).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
}

#[test]
fn node_transform_defaults() {
	let doc = decode(r#"{"asset":{"version":"2.0"},"nodes":[{},{"matrix":[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]}]}"#).unwrap();
	for node in &doc.nodes {
		assert_eq!(node.local_transform(), isopod_gltf::glam::DMat4::IDENTITY);
		assert_eq!(node.rotation(), [0., 0., 0., 1.]);
	}
}
