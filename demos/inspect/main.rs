use anyhow::Context;
use isopod_gltf::{Document, Projection};

fn print_summary(doc: &Document) {
	println!("asset: version {}, generator {}", doc.asset.version, doc.asset.generator.as_deref().unwrap_or("-"));
	if !doc.extensions_used.is_empty() {
		println!("extensions used: {}", doc.extensions_used.join(", "));
	}

	for (i, buffer) in doc.buffers.iter().enumerate() {
		let source = match buffer.uri.as_deref() {
			None => "glb bin chunk",
			Some(_) if buffer.is_embedded_resource() => "data uri",
			Some(uri) => uri,
		};
		println!("buffer {i}: {} bytes declared, {} loaded ({source})", buffer.byte_length, buffer.data.len());
	}

	for (i, mesh) in doc.meshes.iter().enumerate() {
		println!("mesh {i} {:?}: {} primitives", mesh.name.as_deref().unwrap_or(""), mesh.primitives.len());
	}

	for (i, camera) in doc.cameras.iter().enumerate() {
		match &camera.projection {
			Projection::Perspective(p) => println!("camera {i}: perspective, yfov {}", p.yfov),
			Projection::Orthographic(o) => println!("camera {i}: orthographic, {}x{}", o.xmag, o.ymag),
		}
	}

	for (i, node) in doc.nodes.iter().enumerate() {
		let origin = node.local_transform().w_axis;
		println!(
			"node {i} {:?}: {} children, local origin ({}, {}, {})",
			node.name.as_deref().unwrap_or(""), node.children.len(), origin.x, origin.y, origin.z,
		);
	}
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let path = std::env::args().nth(1).context("usage: inspect <file.gltf|file.glb>")?;
	let doc = isopod_gltf::open(&path).with_context(|| format!("failed to load {path}"))?;
	print_summary(&doc);
	Ok(())
}
