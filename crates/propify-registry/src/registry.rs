//! TypeRegistry - process-lifetime cache of property maps.
//!
//! # Storage Model
//!
//! One entry per type, keyed by `TypeId`, holding an `Arc<PropertyMap<T>>`
//! behind a type-erased `Arc<dyn Any>`. Entries are written once, fully built,
//! and never invalidated; lookups after the first build are a read lock and a
//! hash probe.
//!
//! # Thread Safety
//!
//! `TypeRegistry` is `Send + Sync`. A miss takes the write lock and checks the
//! map again before building, so two threads resolving the same type never
//! install different maps. Builds of unrelated types are serialised by the same
//! lock; they only happen once per type.
//!
//! # Example
//!
//! ```
//! use propify_core::{Dynamic, Introspect, MethodInfo, Visibility};
//! use propify_registry::{PropertyKind, TypeRegistry};
//!
//! struct Point { x: i64 }
//!
//! impl Introspect for Point {
//!     fn methods() -> Vec<MethodInfo<Self>> {
//!         vec![MethodInfo::new("get_x", Visibility::Private, 0, |this: &mut Point, _| {
//!             Ok(Dynamic::Int(this.x))
//!         })]
//!     }
//! }
//!
//! let registry = TypeRegistry::new();
//! let properties = registry.resolve::<Point>().unwrap();
//! assert_eq!(properties.get("x").unwrap().kind(), PropertyKind::Scalar);
//! ```

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use propify_core::{Introspect, NameTransformer, PropertyError, Underscore};
use rustc_hash::FxHashMap;

use crate::classifier::classify;
use crate::descriptor::PropertyMap;
use crate::pairing::pair_properties;

type Entry = Arc<dyn Any + Send + Sync>;

lazy_static! {
    static ref GLOBAL: TypeRegistry = TypeRegistry::new();
}

/// Cache of validated property maps, one per type.
pub struct TypeRegistry {
    transformer: Box<dyn NameTransformer>,
    types: RwLock<FxHashMap<TypeId, Entry>>,
}

impl TypeRegistry {
    /// Create an empty registry using [`Underscore`] property names.
    pub fn new() -> Self {
        Self::with_transformer(Underscore)
    }

    /// Create an empty registry with a custom name transformer.
    pub fn with_transformer(transformer: impl NameTransformer + 'static) -> Self {
        Self {
            transformer: Box::new(transformer),
            types: RwLock::new(FxHashMap::default()),
        }
    }

    /// The process-wide registry used by `Propified`.
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL
    }

    /// Get the property map of `T`, building it on first use.
    ///
    /// A build that fails validation stores nothing; the next call retries
    /// from scratch and reports the same error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn resolve<T: Introspect>(&self) -> Result<Arc<PropertyMap<T>>, PropertyError> {
        let key = TypeId::of::<T>();

        if let Some(map) = self.cached::<T>(key) {
            tracing::trace!(type_name = type_name::<T>(), "property map cache hit");
            return Ok(map);
        }

        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(map) = types.get(&key).and_then(|entry| downcast::<T>(entry)) {
            return Ok(map);
        }

        let map = Arc::new(self.build::<T>()?);
        types.insert(key, map.clone() as Entry);
        Ok(map)
    }

    /// Check whether `T`'s property map has been built.
    pub fn is_built<T: Introspect>(&self) -> bool {
        self.cached::<T>(TypeId::of::<T>()).is_some()
    }

    /// Number of types with a built property map.
    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached<T: Introspect>(&self, key: TypeId) -> Option<Arc<PropertyMap<T>>> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.get(&key).and_then(|entry| downcast::<T>(entry))
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn build<T: Introspect>(&self) -> Result<PropertyMap<T>, PropertyError> {
        let candidates = classify(T::methods());
        match pair_properties(candidates, self.transformer.as_ref()) {
            Ok(map) => {
                tracing::debug!(
                    type_name = type_name::<T>(),
                    properties = map.len(),
                    "built property map"
                );
                Ok(map)
            }
            Err(err) => {
                tracing::warn!(
                    type_name = type_name::<T>(),
                    error = %err,
                    "invalid property declaration"
                );
                Err(err)
            }
        }
    }
}

fn downcast<T: Introspect>(entry: &Entry) -> Option<Arc<PropertyMap<T>>> {
    Arc::clone(entry).downcast::<PropertyMap<T>>().ok()
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.len())
            .finish_non_exhaustive()
    }
}
