use std::io;

use isopod_gltf::{
	field::{Rotation, Translation},
	Buffer, Camera, Decoder, Document, Encoder, Node, Perspective, Projection, ResourceReader, Scene,
};

fn no_resources(uri: &str) -> io::Result<Option<ResourceReader>> {
	Err(io::Error::new(io::ErrorKind::NotFound, uri.to_owned()))
}

fn encode(doc: &Document, binary: bool) -> Vec<u8> {
	let mut encoder = Encoder::new(vec![]).binary(binary);
	encoder.encode(doc).unwrap();
	encoder.into_inner()
}

fn sample() -> Document {
	Document {
		scene: Some(0),
		scenes: vec![Scene { nodes: vec![0], ..Default::default() }],
		nodes: vec![Node {
			name: Some("arm".into()),
			camera: Some(0),
			rotation: Rotation::new([0., 0.7071067811865476, 0., 0.7071067811865476]),
			translation: Translation::new([0., 1., 0.]),
			..Default::default()
		}],
		cameras: vec![Camera::perspective(Perspective { yfov: 0.8, znear: 0.01, ..Default::default() })],
		..Default::default()
	}
}

#[test]
fn explicit_defaults_are_dropped_on_reencode() {
	let json = r#"{
		"asset":{"version":"2.0"},
		"nodes":[{"scale":[1,1,1],"translation":[0,0,0],"rotation":[0,0,0,1]}],
		"materials":[{"alphaCutoff":0.5,"pbrMetallicRoughness":{"roughnessFactor":1}}]
	}"#;
	let doc = Decoder::new(json.as_bytes(), no_resources).decode().unwrap();
	let out = String::from_utf8(encode(&doc, false)).unwrap();
	assert_eq!(out, r#"{"asset":{"version":"2.0"},"materials":[{"pbrMetallicRoughness":{}}],"nodes":[{}]}"#);
}

#[test]
fn json_round_trip() {
	let doc = sample();
	let json = encode(&doc, false);
	let decoded = Decoder::new(json.as_slice(), no_resources).decode().unwrap();
	assert_eq!(decoded.scene, Some(0));
	assert_eq!(decoded.nodes[0].name.as_deref(), Some("arm"));
	assert_eq!(decoded.nodes[0].translation(), [0., 1., 0.]);
	assert_eq!(decoded.nodes[0].rotation(), doc.nodes[0].rotation());
	assert!(matches!(&decoded.cameras[0].projection, Projection::Perspective(p) if p.yfov == 0.8));
	assert_eq!(encode(&decoded, false), json);
}

#[test]
fn glb_round_trip() {
	let mut doc = sample();
	doc.buffers.push(Buffer { byte_length: 5, data: b"hello".to_vec(), ..Default::default() });
	let glb = encode(&doc, true);
	assert_eq!(&glb[..4], b"glTF");
	assert_eq!(glb.len() % 4, 0);

	let decoded = Decoder::new(glb.as_slice(), no_resources).decode().unwrap();
	assert_eq!(decoded.buffers[0].data, b"hello");
	assert_eq!(decoded.nodes[0].name.as_deref(), Some("arm"));
}

#[test]
fn embedded_buffers_round_trip_through_json() {
	let mut buffer = Buffer { byte_length: 4, data: vec![0xDE, 0xAD, 0xBE, 0xEF], ..Default::default() };
	buffer.embed();
	let doc = Document { buffers: vec![buffer], ..Default::default() };
	let json = encode(&doc, false);
	let decoded = Decoder::new(json.as_slice(), no_resources).decode().unwrap();
	assert_eq!(decoded.buffers[0].data, [0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn pretty_output_decodes() {
	let mut encoder = Encoder::new(vec![]).pretty(true);
	encoder.encode(&sample()).unwrap();
	let json = encoder.into_inner();
	assert!(json.contains(&b'\n'));
	let decoded = Decoder::new(json.as_slice(), no_resources).decode().unwrap();
	assert_eq!(decoded.nodes.len(), 1);
}
