//! Property dispatch over a [`TypeRegistry`].
//!
//! Every call resolves the instance's type first, so the first access to a
//! type also reports any declaration error for it.

use std::fmt;

use propify_core::{ConversionError, Dynamic, FromDynamic, Introspect, IntoDynamic, PropertyError};
use propify_registry::{Accessor, ArrayProperty, PropertyKind, TypeRegistry};

/// The result of reading a property.
pub enum PropertyValue<'a, T> {
    /// A scalar property's value.
    Value(Dynamic),
    /// An array property bound to the instance.
    Array(ArrayProperty<'a, T>),
}

impl<'a, T> PropertyValue<'a, T> {
    pub fn is_array(&self) -> bool {
        matches!(self, PropertyValue::Array(_))
    }

    /// The scalar value, or `None` for an array property.
    pub fn into_value(self) -> Option<Dynamic> {
        match self {
            PropertyValue::Value(value) => Some(value),
            PropertyValue::Array(_) => None,
        }
    }

    /// The bound array property, or `None` for a scalar.
    pub fn into_array(self) -> Option<ArrayProperty<'a, T>> {
        match self {
            PropertyValue::Value(_) => None,
            PropertyValue::Array(array) => Some(array),
        }
    }

    /// Convert a scalar value to `R`.
    pub fn convert<R: FromDynamic>(self) -> Result<R, PropertyError> {
        match self {
            PropertyValue::Value(value) => Ok(R::from_dynamic(value)?),
            PropertyValue::Array(_) => Err(ConversionError::TypeMismatch {
                expected: std::any::type_name::<R>(),
                actual: "array property",
            }
            .into()),
        }
    }
}

impl<'a, T> fmt::Debug for PropertyValue<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            PropertyValue::Array(array) => f.debug_tuple("Array").field(array).finish(),
        }
    }
}

fn missing<T: Introspect>(name: &str) -> PropertyError {
    tracing::trace!(type_name = std::any::type_name::<T>(), property = name, "no such property");
    PropertyError::no_such_property(name)
}

/// Read property `name` of `instance`.
///
/// Scalar properties invoke their getter; array properties come back bound to
/// `instance` without invoking anything.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn get_property<'a, T: Introspect>(
    registry: &TypeRegistry,
    instance: &'a mut T,
    name: &str,
) -> Result<PropertyValue<'a, T>, PropertyError> {
    let properties = registry.resolve::<T>()?;
    let descriptor = properties.get(name).ok_or_else(|| missing::<T>(name))?;

    match descriptor.getter() {
        Some(Accessor::Array(binding)) => Ok(PropertyValue::Array(binding.bind(instance))),
        Some(Accessor::Method(getter)) => {
            Ok(PropertyValue::Value(getter.info.invoke(instance, Vec::new())?))
        }
        None => Err(missing::<T>(name)),
    }
}

/// Write `value` to scalar property `name` of `instance`.
///
/// Array properties can't be assigned as a whole; writing one reports
/// `NoSuchProperty`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn set_property<T: Introspect>(
    registry: &TypeRegistry,
    instance: &mut T,
    name: &str,
    value: impl IntoDynamic,
) -> Result<(), PropertyError> {
    let properties = registry.resolve::<T>()?;
    let descriptor = properties.get(name).ok_or_else(|| missing::<T>(name))?;

    match (descriptor.kind(), descriptor.setter()) {
        (PropertyKind::Scalar, Some(Accessor::Method(setter))) => {
            setter.info.invoke(instance, vec![value.into_dynamic()])?;
            Ok(())
        }
        _ => Err(missing::<T>(name)),
    }
}

/// Check whether property `name` of `T` can be read.
///
/// Never reports `NoSuchProperty`, but does report a declaration error when
/// `T`'s property map can't be built.
pub fn has_property<T: Introspect>(
    registry: &TypeRegistry,
    _instance: &T,
    name: &str,
) -> Result<bool, PropertyError> {
    let properties = registry.resolve::<T>()?;
    Ok(properties.get(name).is_some_and(|descriptor| descriptor.is_readable()))
}

/// Property access through the process-wide registry.
///
/// Implemented for every [`Introspect`] type.
///
/// ```
/// use propify::Propified;
///
/// struct Counter { hits: i64 }
///
/// #[propify::methods]
/// impl Counter {
///     fn get_hits(&self) -> i64 { self.hits }
///     fn set_hits(&mut self, hits: i64) { self.hits = hits; }
/// }
///
/// let mut counter = Counter { hits: 0 };
/// counter.set_property("hits", 3).unwrap();
/// assert_eq!(counter.get_property("hits").unwrap().convert::<i64>().unwrap(), 3);
/// ```
pub trait Propified: Introspect {
    fn get_property(&mut self, name: &str) -> Result<PropertyValue<'_, Self>, PropertyError> {
        get_property(TypeRegistry::global(), self, name)
    }

    fn set_property(&mut self, name: &str, value: impl IntoDynamic) -> Result<(), PropertyError> {
        set_property(TypeRegistry::global(), self, name, value)
    }

    fn has_property(&self, name: &str) -> Result<bool, PropertyError> {
        has_property(TypeRegistry::global(), self, name)
    }
}

impl<T: Introspect> Propified for T {}

#[cfg(test)]
mod tests {
    use propify_core::{MethodInfo, NativeError, Visibility, take_arg};

    use super::*;

    #[derive(Default)]
    struct Gauge {
        level: i64,
        labels: Vec<String>,
    }

    impl Introspect for Gauge {
        fn methods() -> Vec<MethodInfo<Self>> {
            vec![
                MethodInfo::new("get_level", Visibility::Private, 0, |this: &mut Gauge, _| {
                    Ok(Dynamic::Int(this.level))
                }),
                MethodInfo::new("set_level", Visibility::Private, 1, |this: &mut Gauge, args| {
                    let mut args = args.into_iter();
                    this.level = take_arg(&mut args, 0)?;
                    Ok(Dynamic::Void)
                }),
                MethodInfo::new("get_label", Visibility::Private, 1, |this: &mut Gauge, args| {
                    let mut args = args.into_iter();
                    let index: usize = take_arg(&mut args, 0)?;
                    Ok(this.labels.get(index).cloned().into_dynamic())
                }),
                MethodInfo::new("set_label", Visibility::Private, 2, |this: &mut Gauge, args| {
                    let mut args = args.into_iter();
                    let index: usize = take_arg(&mut args, 0)?;
                    let label: String = take_arg(&mut args, 1)?;
                    if this.labels.len() <= index {
                        this.labels.resize(index + 1, String::new());
                    }
                    this.labels[index] = label;
                    Ok(Dynamic::Void)
                }),
                MethodInfo::new("set_unit", Visibility::Private, 1, |_: &mut Gauge, _| {
                    Ok(Dynamic::Void)
                }),
                MethodInfo::new("get_level_checked", Visibility::Private, 0, |_: &mut Gauge, _| {
                    Err(NativeError::other("sensor offline"))
                }),
            ]
        }
    }

    #[test]
    fn scalar_round_trip() {
        let registry = TypeRegistry::new();
        let mut gauge = Gauge::default();

        set_property(&registry, &mut gauge, "level", 42).unwrap();
        let value = get_property(&registry, &mut gauge, "level").unwrap();
        assert!(!value.is_array());
        assert_eq!(value.into_value(), Some(Dynamic::Int(42)));
        assert_eq!(gauge.level, 42);
    }

    #[test]
    fn array_property_is_bound_not_invoked() {
        let registry = TypeRegistry::new();
        let mut gauge = Gauge::default();

        let mut labels = get_property(&registry, &mut gauge, "label")
            .unwrap()
            .into_array()
            .unwrap();
        assert_eq!(labels.name(), "label");
        labels.set(1, "max").unwrap();
        assert_eq!(labels.get_as::<Option<String>>(1).unwrap().as_deref(), Some("max"));
        drop(labels);

        assert_eq!(gauge.labels, vec![String::new(), "max".to_string()]);
    }

    #[test]
    fn array_property_cannot_be_assigned() {
        let registry = TypeRegistry::new();
        let mut gauge = Gauge::default();
        let err = set_property(&registry, &mut gauge, "label", "x").unwrap_err();
        assert_eq!(err, PropertyError::no_such_property("label"));

        let err = get_property(&registry, &mut gauge, "label")
            .unwrap()
            .convert::<String>()
            .unwrap_err();
        assert!(matches!(err, PropertyError::Native(NativeError::Conversion(_))));
    }

    #[test]
    fn write_only_and_unknown() {
        let registry = TypeRegistry::new();
        let mut gauge = Gauge::default();

        set_property(&registry, &mut gauge, "unit", "bar").unwrap();
        assert_eq!(
            get_property(&registry, &mut gauge, "unit").unwrap_err(),
            PropertyError::no_such_property("unit")
        );
        assert_eq!(
            get_property(&registry, &mut gauge, "asdf").unwrap_err(),
            PropertyError::no_such_property("asdf")
        );
        assert_eq!(
            set_property(&registry, &mut gauge, "asdf", 1).unwrap_err(),
            PropertyError::no_such_property("asdf")
        );
        assert_eq!(
            set_property(&registry, &mut gauge, "level_checked", 1).unwrap_err(),
            PropertyError::no_such_property("level_checked")
        );
    }

    #[test]
    fn has_property_reflects_getter() {
        let registry = TypeRegistry::new();
        let gauge = Gauge::default();

        assert!(has_property(&registry, &gauge, "level").unwrap());
        assert!(has_property(&registry, &gauge, "label").unwrap());
        assert!(!has_property(&registry, &gauge, "unit").unwrap());
        assert!(!has_property(&registry, &gauge, "asdf").unwrap());
    }

    #[test]
    fn accessor_failures_propagate() {
        let registry = TypeRegistry::new();
        let mut gauge = Gauge::default();

        let err = get_property(&registry, &mut gauge, "level_checked").unwrap_err();
        assert_eq!(err, PropertyError::Native(NativeError::other("sensor offline")));

        let err = set_property(&registry, &mut gauge, "level", "high").unwrap_err();
        assert!(matches!(err, PropertyError::Native(NativeError::Conversion(_))));
    }

    #[test]
    fn extension_trait_uses_global_registry() {
        let mut gauge = Gauge::default();
        gauge.set_property("level", 7).unwrap();
        assert_eq!(gauge.get_property("level").unwrap().convert::<i64>().unwrap(), 7);
        assert!(gauge.has_property("label").unwrap());
        assert!(TypeRegistry::global().is_built::<Gauge>());
    }
}
