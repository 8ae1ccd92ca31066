//! Indexed ("array") properties.
//!
//! An array property is backed by up to three methods:
//!
//! | method       | arity | used by                      |
//! |--------------|-------|------------------------------|
//! | `get…`       | 1     | [`ArrayProperty::get`]       |
//! | `set…`       | 2     | [`ArrayProperty::set`]       |
//! | `itr…`       | 0     | [`ArrayProperty::iterate`]   |
//!
//! The [`ArrayBinding`] holding those methods is cached in the type's
//! descriptor; an [`ArrayProperty`] borrowing one instance is created for every
//! access and dropped with it.

use std::fmt;
use std::sync::Arc;

use propify_core::{
    Dynamic, DynamicIter, FromDynamic, IntoDynamic, MethodCandidate, NativeError, PropertyError,
};

/// The methods behind one array property, shared by all instances of a type.
pub struct ArrayBinding<T> {
    property: String,
    getter: Option<MethodCandidate<T>>,
    setter: Option<MethodCandidate<T>>,
    iterator: Option<MethodCandidate<T>>,
}

impl<T> ArrayBinding<T> {
    pub fn new(
        property: impl Into<String>,
        getter: Option<MethodCandidate<T>>,
        setter: Option<MethodCandidate<T>>,
        iterator: Option<MethodCandidate<T>>,
    ) -> Self {
        Self {
            property: property.into(),
            getter,
            setter,
            iterator,
        }
    }

    /// Canonical name of the property.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn getter(&self) -> Option<&MethodCandidate<T>> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&MethodCandidate<T>> {
        self.setter.as_ref()
    }

    pub fn iterator(&self) -> Option<&MethodCandidate<T>> {
        self.iterator.as_ref()
    }

    /// Bind to one instance for the duration of a single access.
    pub fn bind<'a>(self: &Arc<Self>, instance: &'a mut T) -> ArrayProperty<'a, T> {
        ArrayProperty {
            binding: Arc::clone(self),
            instance,
        }
    }

    fn missing(&self) -> PropertyError {
        PropertyError::no_such_property(self.property.clone())
    }
}

impl<T> fmt::Debug for ArrayBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBinding")
            .field("property", &self.property)
            .field("getter", &self.getter)
            .field("setter", &self.setter)
            .field("iterator", &self.iterator)
            .finish()
    }
}

/// An array property bound to one instance.
///
/// Borrows the instance mutably, so it lives no longer than the expression
/// that requested it.
pub struct ArrayProperty<'a, T> {
    binding: Arc<ArrayBinding<T>>,
    instance: &'a mut T,
}

impl<'a, T> ArrayProperty<'a, T> {
    /// Canonical name of the property.
    pub fn name(&self) -> &str {
        self.binding.property()
    }

    /// Read the element at `index` through the getter.
    ///
    /// Fails with `NoSuchProperty` when the property has no getter.
    pub fn get(&mut self, index: impl IntoDynamic) -> Result<Dynamic, PropertyError> {
        let getter = self.binding.getter.as_ref().ok_or_else(|| self.binding.missing())?;
        Ok(getter.info.invoke(self.instance, vec![index.into_dynamic()])?)
    }

    /// Read the element at `index` and convert it.
    pub fn get_as<R: FromDynamic>(&mut self, index: impl IntoDynamic) -> Result<R, PropertyError> {
        Ok(R::from_dynamic(self.get(index)?)?)
    }

    /// Write `value` at `index` through the setter.
    ///
    /// Fails with `NoSuchProperty` when the property has no setter.
    pub fn set(
        &mut self,
        index: impl IntoDynamic,
        value: impl IntoDynamic,
    ) -> Result<(), PropertyError> {
        let setter = self.binding.setter.as_ref().ok_or_else(|| self.binding.missing())?;
        setter
            .info
            .invoke(self.instance, vec![index.into_dynamic(), value.into_dynamic()])?;
        Ok(())
    }

    /// Always `false`.
    ///
    /// Element existence has no backing method; callers that need it should
    /// expose a dedicated scalar property instead.
    pub fn contains(&self, index: impl IntoDynamic) -> bool {
        let _ = index;
        tracing::trace!(property = self.name(), "array property containment is not supported");
        false
    }

    /// Does nothing.
    ///
    /// Element removal has no backing method.
    pub fn remove(&mut self, index: impl IntoDynamic) {
        let _ = index;
        tracing::trace!(property = self.name(), "array property removal is not supported");
    }

    /// Iterate `(key, value)` pairs through the iterator method.
    ///
    /// Each call invokes the method again, so every returned sequence starts
    /// from the beginning. Fails with `NoSuchProperty` when the property has no
    /// iterator.
    pub fn iterate(&mut self) -> Result<DynamicIter, PropertyError> {
        let iterator = self.binding.iterator.as_ref().ok_or_else(|| self.binding.missing())?;
        match iterator.info.invoke(self.instance, Vec::new())? {
            Dynamic::Pairs(pairs) => Ok(pairs),
            other => Err(NativeError::NotIterable {
                method: iterator.info.name().to_owned(),
                actual: other.type_name(),
            }
            .into()),
        }
    }
}

impl<'a, T> fmt::Debug for ArrayProperty<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayProperty")
            .field("property", &self.binding.property)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use propify_core::{MethodInfo, MethodPrefix, Visibility, take_arg};

    use super::*;

    #[derive(Default)]
    struct Table {
        cells: BTreeMap<String, String>,
    }

    fn candidate(info: MethodInfo<Table>) -> MethodCandidate<Table> {
        MethodCandidate {
            prefix: MethodPrefix::of(info.name()).unwrap(),
            info,
        }
    }

    fn getter() -> MethodCandidate<Table> {
        candidate(MethodInfo::new("get_cells", Visibility::Private, 1, |this: &mut Table, args| {
            let mut args = args.into_iter();
            let key: String = take_arg(&mut args, 0)?;
            Ok(this.cells.get(&key).cloned().into_dynamic())
        }))
    }

    fn setter() -> MethodCandidate<Table> {
        candidate(MethodInfo::new("set_cells", Visibility::Private, 2, |this: &mut Table, args| {
            let mut args = args.into_iter();
            let key: String = take_arg(&mut args, 0)?;
            let value: String = take_arg(&mut args, 1)?;
            this.cells.insert(key, value);
            Ok(Dynamic::Void)
        }))
    }

    fn iterator() -> MethodCandidate<Table> {
        candidate(MethodInfo::new("itr_cells", Visibility::Private, 0, |this: &mut Table, _| {
            Ok(Dynamic::from_pairs(this.cells.clone()))
        }))
    }

    fn binding(
        get: Option<MethodCandidate<Table>>,
        set: Option<MethodCandidate<Table>>,
        itr: Option<MethodCandidate<Table>>,
    ) -> Arc<ArrayBinding<Table>> {
        Arc::new(ArrayBinding::new("cells", get, set, itr))
    }

    #[test]
    fn set_then_get() {
        let binding = binding(Some(getter()), Some(setter()), None);
        let mut table = Table::default();
        let mut cells = binding.bind(&mut table);

        cells.set("a1", "hello").unwrap();
        assert_eq!(cells.get("a1").unwrap(), Dynamic::String("hello".into()));
        assert_eq!(cells.get_as::<Option<String>>("b2").unwrap(), None);
        drop(cells);

        assert_eq!(table.cells.get("a1").map(String::as_str), Some("hello"));
    }

    #[test]
    fn missing_accessors_report_property_name() {
        let binding = binding(None, None, Some(iterator()));
        let mut table = Table::default();
        let mut cells = binding.bind(&mut table);

        assert_eq!(cells.get("a1").unwrap_err(), PropertyError::no_such_property("cells"));
        assert_eq!(
            cells.set("a1", "x").unwrap_err(),
            PropertyError::no_such_property("cells")
        );

        let read_only = binding_without_iterator();
        let mut table = Table::default();
        assert_eq!(
            read_only.bind(&mut table).iterate().unwrap_err(),
            PropertyError::no_such_property("cells")
        );
    }

    fn binding_without_iterator() -> Arc<ArrayBinding<Table>> {
        binding(Some(getter()), None, None)
    }

    #[test]
    fn iterate_restarts_on_every_call() {
        let binding = binding(None, Some(setter()), Some(iterator()));
        let mut table = Table::default();
        let mut cells = binding.bind(&mut table);
        cells.set("a", "b").unwrap();

        let first: Vec<_> = cells.iterate().unwrap().collect();
        let second: Vec<_> = cells.iterate().unwrap().collect();
        assert_eq!(first, vec![(Dynamic::String("a".into()), Dynamic::String("b".into()))]);
        assert_eq!(first, second);
    }

    #[test]
    fn iterator_must_return_pairs() {
        let bogus = candidate(MethodInfo::new(
            "itr_cells",
            Visibility::Private,
            0,
            |_: &mut Table, _| Ok(Dynamic::Int(3)),
        ));
        let binding = binding(None, None, Some(bogus));
        let mut table = Table::default();
        let err = binding.bind(&mut table).iterate().unwrap_err();
        assert_eq!(
            err,
            PropertyError::Native(NativeError::NotIterable {
                method: "itr_cells".into(),
                actual: "int",
            })
        );
    }

    #[test]
    fn contains_and_remove_are_placeholders() {
        let binding = binding(Some(getter()), Some(setter()), None);
        let mut table = Table::default();
        let mut cells = binding.bind(&mut table);
        cells.set("a1", "x").unwrap();

        assert!(!cells.contains("a1"));
        cells.remove("a1");
        assert_eq!(cells.get("a1").unwrap(), Dynamic::String("x".into()));
    }

    #[test]
    fn argument_conversion_errors_propagate() {
        let binding = binding(Some(getter()), None, None);
        let mut table = Table::default();
        let err = binding.bind(&mut table).get(7).unwrap_err();
        assert!(matches!(err, PropertyError::Native(NativeError::Conversion(_))));
    }
}
