//! Default-bearing fields.
//!
//! glTF gives many properties a default that applies when the property is absent. A [`Field`] keeps
//! track of whether the property was actually present instead of seeding the default and comparing
//! against magic values later:
//!
//! - decoding an object without the property leaves the field unset, and [`Field::get`] yields the default
//! - decoding a present property stores it verbatim, no merging with the default
//! - encoding skips the property when it is unset or equal to the default
//!
//! The array transform fields (matrix, rotation, scale) additionally carry a sentinel: the all-zero
//! value a never-initialised field would have. It is not a valid transform, so it resolves to the
//! default and is skipped on encode. Re-decoding such a document yields the default. This lossy
//! canonicalization is intentional and limited to those three fields.

use std::marker::PhantomData;

pub trait DefaultRule {
	type Value: Copy + PartialEq + std::fmt::Debug + serde::Serialize + serde::de::DeserializeOwned;
	const DEFAULT: Self::Value;
	const SENTINEL: Option<Self::Value> = None;
}

pub const IDENTITY_MATRIX: [f64; 16] = [
	1., 0., 0., 0.,
	0., 1., 0., 0.,
	0., 0., 1., 0.,
	0., 0., 0., 1.,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityMatrix;
impl DefaultRule for IdentityMatrix {
	type Value = [f64; 16];
	const DEFAULT: Self::Value = IDENTITY_MATRIX;
	const SENTINEL: Option<Self::Value> = Some([0.; 16]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRotation;
impl DefaultRule for IdentityRotation {
	type Value = [f64; 4];
	const DEFAULT: Self::Value = [0., 0., 0., 1.];
	const SENTINEL: Option<Self::Value> = Some([0.; 4]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitScale;
impl DefaultRule for UnitScale {
	type Value = [f64; 3];
	const DEFAULT: Self::Value = [1., 1., 1.];
	const SENTINEL: Option<Self::Value> = Some([0.; 3]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroTranslation;
impl DefaultRule for ZeroTranslation {
	type Value = [f64; 3];
	const DEFAULT: Self::Value = [0., 0., 0.];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitFactor;
impl DefaultRule for UnitFactor {
	type Value = f64;
	const DEFAULT: Self::Value = 1.;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfCutoff;
impl DefaultRule for HalfCutoff {
	type Value = f64;
	const DEFAULT: Self::Value = 0.5;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueWhite;
impl DefaultRule for OpaqueWhite {
	type Value = [f64; 4];
	const DEFAULT: Self::Value = [1., 1., 1., 1.];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Black;
impl DefaultRule for Black {
	type Value = [f64; 3];
	const DEFAULT: Self::Value = [0., 0., 0.];
}

pub type Matrix = Field<IdentityMatrix>;
pub type Rotation = Field<IdentityRotation>;
pub type Scale = Field<UnitScale>;
pub type Translation = Field<ZeroTranslation>;
pub type Factor = Field<UnitFactor>;
pub type Cutoff = Field<HalfCutoff>;
pub type Rgba = Field<OpaqueWhite>;
pub type Rgb = Field<Black>;

/// A property that is either unset or explicitly present, resolving to `D::DEFAULT` when unset.
pub struct Field<D: DefaultRule> {
	value: Option<D::Value>,
	rule: PhantomData<D>,
}

impl<D: DefaultRule> Field<D> {
	pub const fn unset() -> Self {
		Self { value: None, rule: PhantomData }
	}

	pub const fn new(value: D::Value) -> Self {
		Self { value: Some(value), rule: PhantomData }
	}

	fn is_sentinel(value: &D::Value) -> bool {
		D::SENTINEL.as_ref() == Some(value)
	}

	/// The effective value.
	pub fn get(&self) -> D::Value {
		self.valid().unwrap_or(D::DEFAULT)
	}

	/// The explicit value unless it is the sentinel.
	pub fn valid(&self) -> Option<D::Value> {
		self.value.filter(|value| !Self::is_sentinel(value))
	}

	/// The value exactly as it was set or decoded, sentinels included.
	pub fn explicit(&self) -> Option<D::Value> {
		self.value
	}

	pub fn is_set(&self) -> bool {
		self.value.is_some()
	}

	pub fn set(&mut self, value: D::Value) {
		self.value = Some(value);
	}

	pub fn clear(&mut self) {
		self.value = None;
	}

	/// Whether the property is left out when encoding.
	pub fn is_omitted(&self) -> bool {
		match &self.value {
			None => true,
			Some(value) => *value == D::DEFAULT || Self::is_sentinel(value),
		}
	}
}

impl<D: DefaultRule> Default for Field<D> {
	fn default() -> Self {
		Self::unset()
	}
}

impl<D: DefaultRule> Clone for Field<D> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<D: DefaultRule> Copy for Field<D> {}

impl<D: DefaultRule> PartialEq for Field<D> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl<D: DefaultRule> std::fmt::Debug for Field<D> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.value {
			Some(value) => f.debug_tuple("Explicit").field(value).finish(),
			None => f.write_str("Unset"),
		}
	}
}

impl<D: DefaultRule> serde::Serialize for Field<D> {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.get().serialize(serializer)
	}
}

impl<'de, D: DefaultRule> serde::Deserialize<'de> for Field<D> {
	// `null` is treated like an absent property
	fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
		Ok(Self { value: Option::<D::Value>::deserialize(deserializer)?, rule: PhantomData })
	}
}

pub(crate) fn is_default<T: Default + PartialEq>(v: &T) -> bool {
	*v == T::default()
}
