use crate::{field::is_default, Extensions};

use super::Extras;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Interpolation {
	#[default]
	Linear,
	Step,
	CubicSpline,
}

/// Node property an animation channel writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrsProperty {
	#[default]
	Translation,
	Rotation,
	Scale,
	Weights,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default)]
	pub channels: Vec<Channel>,
	#[serde(default)]
	pub samplers: Vec<AnimationSampler>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

/// Keyframe input/output accessors and how to interpolate between them.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSampler {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub input: Option<u32>,
	#[serde(default, skip_serializing_if = "is_default")]
	pub interpolation: Interpolation,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output: Option<u32>,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sampler: Option<u32>,
	pub target: ChannelTarget,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTarget {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node: Option<u32>,
	pub path: TrsProperty,
	#[serde(default, skip_serializing_if = "Extensions::is_empty")]
	pub extensions: Extensions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extras: Extras,
}
