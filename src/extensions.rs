//! Extension payloads and the registry that decides how they are decoded.
//!
//! Every `extensions` object is first read as raw JSON per key. Keys with a registered factory are then
//! decoded into a fresh instance; anything else, including payloads the registered type rejects, is kept
//! as the raw JSON text it arrived as.
//!
//! Registration is expected to finish before decoding starts. The registry is guarded by a reader/writer
//! lock so late registration is still sound, it just may or may not be seen by a decode in progress.

use std::{any::Any, cell::RefCell, collections::BTreeMap, sync::{Arc, OnceLock, PoisonError, RwLock}};

use rustc_hash::FxHashMap;
use serde_json::value::RawValue;

pub trait Extension: Any + std::fmt::Debug + Send + Sync {
	/// Replaces `self` with the contents of `raw`.
	fn decode(&mut self, raw: &RawValue) -> serde_json::Result<()>;
	fn encode(&self) -> serde_json::Result<Box<RawValue>>;
	fn clone_box(&self) -> Box<dyn Extension>;
	fn as_any(&self) -> &dyn Any;
}

impl<T> Extension for T
where
	T: serde::Serialize + serde::de::DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static,
{
	fn decode(&mut self, raw: &RawValue) -> serde_json::Result<()> {
		*self = serde_json::from_str(raw.get())?;
		Ok(())
	}

	fn encode(&self) -> serde_json::Result<Box<RawValue>> {
		serde_json::value::to_raw_value(self)
	}

	fn clone_box(&self) -> Box<dyn Extension> {
		Box::new(self.clone())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl dyn Extension {
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.as_any().downcast_ref()
	}
}

pub type ExtensionFactory = Arc<dyn Fn() -> Box<dyn Extension> + Send + Sync>;

#[derive(Default)]
pub struct ExtensionRegistry {
	factories: RwLock<FxHashMap<String, ExtensionFactory>>,
}

static GLOBAL: OnceLock<Arc<ExtensionRegistry>> = OnceLock::new();

thread_local! {
	static ACTIVE: RefCell<Option<Arc<ExtensionRegistry>>> = const { RefCell::new(None) };
}

impl ExtensionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// The process-wide registry used by decoders that were not given one.
	pub fn global() -> &'static Arc<ExtensionRegistry> {
		GLOBAL.get_or_init(|| Arc::new(ExtensionRegistry::new()))
	}

	pub fn register<F>(&self, key: impl Into<String>, factory: F)
	where
		F: Fn() -> Box<dyn Extension> + Send + Sync + 'static,
	{
		self.factories.write().unwrap_or_else(PoisonError::into_inner).insert(key.into(), Arc::new(factory));
	}

	pub fn register_default<T: Extension + Default>(&self, key: impl Into<String>) {
		self.register(key, || Box::new(T::default()));
	}

	pub fn contains(&self, key: &str) -> bool {
		self.factories.read().unwrap_or_else(PoisonError::into_inner).contains_key(key)
	}

	fn factory(&self, key: &str) -> Option<ExtensionFactory> {
		self.factories.read().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
	}

	fn decode_value(&self, key: &str, raw: Box<RawValue>) -> ExtensionValue {
		let Some(factory) = self.factory(key) else {
			return ExtensionValue::Raw(raw);
		};
		let mut ext = factory();
		match ext.decode(&raw) {
			Ok(()) => ExtensionValue::Decoded(ext),
			Err(e) => {
				tracing::debug!("extension {key} kept undecoded: {e}");
				ExtensionValue::Raw(raw)
			},
		}
	}

	/// Makes `registry` the one consulted by [`Extensions`] deserialization on this thread until the
	/// returned guard is dropped.
	pub(crate) fn activate(registry: Arc<ExtensionRegistry>) -> ActiveRegistry {
		let previous = ACTIVE.with(|active| active.replace(Some(registry)));
		ActiveRegistry { previous }
	}

	fn active() -> Arc<ExtensionRegistry> {
		ACTIVE.with(|active| active.borrow().clone()).unwrap_or_else(|| Self::global().clone())
	}
}

impl std::fmt::Debug for ExtensionRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
		f.debug_set().entries(factories.keys()).finish()
	}
}

pub(crate) struct ActiveRegistry {
	previous: Option<Arc<ExtensionRegistry>>,
}

impl Drop for ActiveRegistry {
	fn drop(&mut self) {
		let previous = self.previous.take();
		ACTIVE.with(|active| *active.borrow_mut() = previous);
	}
}

/// Registers an extension factory in the [global](ExtensionRegistry::global) registry.
pub fn register_extension<F>(key: impl Into<String>, factory: F)
where
	F: Fn() -> Box<dyn Extension> + Send + Sync + 'static,
{
	ExtensionRegistry::global().register(key, factory);
}

#[derive(Debug)]
pub enum ExtensionValue {
	Decoded(Box<dyn Extension>),
	/// Payload of an unregistered extension (or one its type rejected), byte for byte.
	Raw(Box<RawValue>),
}

impl ExtensionValue {
	pub fn as_raw(&self) -> Option<&RawValue> {
		match self {
			Self::Raw(raw) => Some(raw),
			Self::Decoded(_) => None,
		}
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Self::Decoded(ext) => ext.downcast_ref(),
			Self::Raw(_) => None,
		}
	}
}

impl Clone for ExtensionValue {
	fn clone(&self) -> Self {
		match self {
			Self::Decoded(ext) => Self::Decoded(ext.clone_box()),
			Self::Raw(raw) => Self::Raw(raw.clone()),
		}
	}
}

impl serde::Serialize for ExtensionValue {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Raw(raw) => raw.serialize(serializer),
			Self::Decoded(ext) => ext.encode().map_err(serde::ser::Error::custom)?.serialize(serializer),
		}
	}
}

/// Extension payloads keyed by extension name.
#[derive(Debug, Clone, Default)]
pub struct Extensions(BTreeMap<String, ExtensionValue>);

impl Extensions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&ExtensionValue> {
		self.0.get(key)
	}

	pub fn get_as<T: Any>(&self, key: &str) -> Option<&T> {
		self.0.get(key).and_then(|v| v.downcast_ref())
	}

	pub fn insert(&mut self, key: impl Into<String>, ext: impl Extension) -> Option<ExtensionValue> {
		self.0.insert(key.into(), ExtensionValue::Decoded(Box::new(ext)))
	}

	pub fn insert_raw(&mut self, key: impl Into<String>, raw: Box<RawValue>) -> Option<ExtensionValue> {
		self.0.insert(key.into(), ExtensionValue::Raw(raw))
	}

	pub fn remove(&mut self, key: &str) -> Option<ExtensionValue> {
		self.0.remove(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtensionValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl serde::Serialize for Extensions {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.0.serialize(serializer)
	}
}

impl<'de> serde::Deserialize<'de> for Extensions {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = BTreeMap::<String, Box<RawValue>>::deserialize(deserializer)?;
		let registry = ExtensionRegistry::active();
		Ok(Self(raw.into_iter().map(|(key, value)| {
			let value = registry.decode_value(&key, value);
			(key, value)
		}).collect()))
	}
}
