use std::cell::Cell;

use serde::de::Error as _;

use crate::Extensions;

use super::Extras;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Perspective {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub aspect_ratio: Option<f64>,
	/// Vertical field of view in radians.
	pub yfov: f64,
	/// Infinite projection when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub zfar: Option<f64>,
	pub znear: f64,
	#[serde(skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Orthographic {
	pub xmag: f64,
	pub ymag: f64,
	pub zfar: f64,
	pub znear: f64,
	#[serde(skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

/// Why a camera object could not be turned into a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionFault {
	/// Neither sub-object matches, or the one named by `type` is absent.
	Missing,
	/// Both sub-objects are present and there is no `type` to choose.
	Ambiguous,
}

impl std::fmt::Display for ProjectionFault {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Missing => f.write_str("camera requires a projection"),
			Self::Ambiguous => f.write_str("camera defines both projections but no type"),
		}
	}
}

thread_local! {
	static LAST_FAULT: Cell<Option<ProjectionFault>> = const { Cell::new(None) };
}

/// Takes the fault recorded by the last camera that failed to decode on this thread.
pub(crate) fn take_projection_fault() -> Option<ProjectionFault> {
	LAST_FAULT.with(Cell::take)
}

#[derive(Debug, Clone)]
pub enum Projection {
	Perspective(Perspective),
	Orthographic(Orthographic),
}

impl Projection {
	/// Value of the camera's `type` property.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Perspective(_) => "perspective",
			Self::Orthographic(_) => "orthographic",
		}
	}
}

/// A camera always has exactly one projection.
#[derive(Debug, Clone)]
pub struct Camera {
	pub name: Option<String>,
	pub projection: Projection,
	pub extensions: Extensions,
	pub extras: Extras,
}

impl Camera {
	pub fn new(projection: Projection) -> Self {
		Self { name: None, projection, extensions: Extensions::new(), extras: None }
	}

	pub fn perspective(perspective: Perspective) -> Self {
		Self::new(Projection::Perspective(perspective))
	}

	pub fn orthographic(orthographic: Orthographic) -> Self {
		Self::new(Projection::Orthographic(orthographic))
	}
}

#[derive(serde::Serialize)]
struct CameraOut<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	name: Option<&'a str>,
	#[serde(rename = "type")]
	ty: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	perspective: Option<&'a Perspective>,
	#[serde(skip_serializing_if = "Option::is_none")]
	orthographic: Option<&'a Orthographic>,
	#[serde(skip_serializing_if = "Option::is_none")]
	extensions: Option<&'a Extensions>,
	#[serde(skip_serializing_if = "Option::is_none")]
	extras: Option<&'a serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct CameraIn {
	name: Option<String>,
	#[serde(rename = "type")]
	ty: Option<String>,
	perspective: Option<Perspective>,
	orthographic: Option<Orthographic>,
	#[serde(default)]
	extensions: Extensions,
	#[serde(default)]
	extras: Extras,
}

impl serde::Serialize for Camera {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let (perspective, orthographic) = match &self.projection {
			Projection::Perspective(p) => (Some(p), None),
			Projection::Orthographic(o) => (None, Some(o)),
		};
		CameraOut {
			name: self.name.as_deref(),
			ty: self.projection.type_name(),
			perspective,
			orthographic,
			extensions: (!self.extensions.is_empty()).then_some(&self.extensions),
			extras: self.extras.as_ref(),
		}.serialize(serializer)
	}
}

impl<'de> serde::Deserialize<'de> for Camera {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = CameraIn::deserialize(deserializer)?;
		let projection = match raw.ty.as_deref() {
			Some("perspective") => raw.perspective.map(Projection::Perspective).ok_or(ProjectionFault::Missing),
			Some("orthographic") => raw.orthographic.map(Projection::Orthographic).ok_or(ProjectionFault::Missing),
			_ => match (raw.perspective, raw.orthographic) {
				(Some(p), None) => Ok(Projection::Perspective(p)),
				(None, Some(o)) => Ok(Projection::Orthographic(o)),
				(Some(_), Some(_)) => Err(ProjectionFault::Ambiguous),
				(None, None) => Err(ProjectionFault::Missing),
			},
		};
		let projection = projection.map_err(|fault| {
			LAST_FAULT.with(|last| last.set(Some(fault)));
			D::Error::custom(fault)
		})?;
		Ok(Self { name: raw.name, projection, extensions: raw.extensions, extras: raw.extras })
	}
}
