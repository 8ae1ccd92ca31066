//! Validated property descriptors.

use std::fmt;
use std::sync::Arc;

use propify_core::MethodCandidate;
use rustc_hash::FxHashMap;

use crate::array::ArrayBinding;

/// Whether a property is a plain value or an indexed container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Zero-argument getter and/or one-argument setter.
    Scalar,
    /// One-argument getter, two-argument setter and/or iterator.
    Array,
}

/// What a descriptor's getter or setter slot dispatches to.
pub enum Accessor<T> {
    /// Invoke the method directly.
    Method(MethodCandidate<T>),
    /// Bind the shared array binding to the instance.
    Array(Arc<ArrayBinding<T>>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Method(method) => Accessor::Method(method.clone()),
            Accessor::Array(binding) => Accessor::Array(Arc::clone(binding)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Method(method) => f.debug_tuple("Method").field(method).finish(),
            Accessor::Array(binding) => f.debug_tuple("Array").field(binding).finish(),
        }
    }
}

/// The validated description of one property.
///
/// Array descriptors always carry their binding in the getter slot; the
/// setter slot holds the *same* binding when a setter method exists.
pub struct PropertyDescriptor<T> {
    name: String,
    kind: PropertyKind,
    getter: Option<Accessor<T>>,
    setter: Option<Accessor<T>>,
}

impl<T> PropertyDescriptor<T> {
    /// A scalar property backed by plain methods.
    pub fn scalar(
        name: impl Into<String>,
        getter: Option<MethodCandidate<T>>,
        setter: Option<MethodCandidate<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Scalar,
            getter: getter.map(Accessor::Method),
            setter: setter.map(Accessor::Method),
        }
    }

    /// An array property sharing one binding between its slots.
    pub fn array(binding: ArrayBinding<T>) -> Self {
        let has_setter = binding.setter().is_some();
        let binding = Arc::new(binding);
        Self {
            name: binding.property().to_owned(),
            kind: PropertyKind::Array,
            setter: has_setter.then(|| Accessor::Array(Arc::clone(&binding))),
            getter: Some(Accessor::Array(binding)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn getter(&self) -> Option<&Accessor<T>> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&Accessor<T>> {
        self.setter.as_ref()
    }

    /// Check if reading the property is possible.
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    /// Check if the property is a read-only scalar.
    pub fn is_read_only(&self) -> bool {
        self.getter.is_some() && self.setter.is_none()
    }

    /// Check if the property is a write-only scalar.
    pub fn is_write_only(&self) -> bool {
        self.getter.is_none() && self.setter.is_some()
    }

    /// The array binding of an array property.
    pub fn array_binding(&self) -> Option<&Arc<ArrayBinding<T>>> {
        match &self.getter {
            Some(Accessor::Array(binding)) => Some(binding),
            _ => None,
        }
    }
}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("getter", &self.getter)
            .field("setter", &self.setter)
            .finish()
    }
}

/// Every property of one type, keyed by canonical name.
pub struct PropertyMap<T> {
    properties: FxHashMap<String, PropertyDescriptor<T>>,
}

impl<T> PropertyMap<T> {
    pub fn new() -> Self {
        Self {
            properties: FxHashMap::default(),
        }
    }

    /// Add a descriptor, replacing any previous one with the same name.
    pub fn insert(&mut self, descriptor: PropertyDescriptor<T>) {
        self.properties.insert(descriptor.name.clone(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor<T>> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Property names in unspecified order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor<T>> {
        self.properties.values()
    }
}

impl<T> Default for PropertyMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PropertyMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.properties.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candidate;

    struct Sheet;

    #[test]
    fn scalar_slots() {
        let read_write = PropertyDescriptor::<Sheet>::scalar(
            "title",
            Some(candidate("get_title", 0)),
            Some(candidate("set_title", 1)),
        );
        assert_eq!(read_write.kind(), PropertyKind::Scalar);
        assert!(read_write.is_readable());
        assert!(!read_write.is_read_only());
        assert!(read_write.array_binding().is_none());

        let write_only =
            PropertyDescriptor::<Sheet>::scalar("title", None, Some(candidate("set_title", 1)));
        assert!(write_only.is_write_only());
        assert!(!write_only.is_readable());
    }

    #[test]
    fn array_slots_share_one_binding() {
        let binding = ArrayBinding::<Sheet>::new(
            "cells",
            Some(candidate("get_cells", 1)),
            Some(candidate("set_cells", 2)),
            None,
        );
        let descriptor = PropertyDescriptor::array(binding);
        assert_eq!(descriptor.name(), "cells");
        assert_eq!(descriptor.kind(), PropertyKind::Array);

        let (Some(Accessor::Array(get)), Some(Accessor::Array(set))) =
            (descriptor.getter(), descriptor.setter())
        else {
            panic!("array descriptor should hold bindings in both slots");
        };
        assert!(Arc::ptr_eq(get, set));
    }

    #[test]
    fn array_without_setter_is_still_readable() {
        let binding =
            ArrayBinding::<Sheet>::new("rows", None, None, Some(candidate("itr_rows", 0)));
        let descriptor = PropertyDescriptor::array(binding);
        assert!(descriptor.is_readable());
        assert!(descriptor.setter().is_none());
    }

    #[test]
    fn map_lookup() {
        let mut map = PropertyMap::<Sheet>::new();
        assert!(map.is_empty());
        map.insert(PropertyDescriptor::scalar("title", Some(candidate("get_title", 0)), None));
        assert_eq!(map.len(), 1);
        assert!(map.contains("title"));
        assert!(map.get("missing").is_none());
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["title"]);
    }
}
