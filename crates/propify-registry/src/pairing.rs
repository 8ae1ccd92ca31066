//! Pairing of candidate methods into validated property descriptors.

use propify_core::{MethodCandidate, MethodPrefix, MethodRef, NameTransformer, PropertyError};
use rustc_hash::FxHashMap;

use crate::array::ArrayBinding;
use crate::descriptor::{PropertyDescriptor, PropertyMap};

/// The getter, setter and iterator found for one property name.
pub struct PropertyMethods<T> {
    pub getter: Option<MethodCandidate<T>>,
    pub setter: Option<MethodCandidate<T>>,
    pub iterator: Option<MethodCandidate<T>>,
}

impl<T> PropertyMethods<T> {
    fn slot(&mut self, prefix: MethodPrefix) -> &mut Option<MethodCandidate<T>> {
        match prefix {
            MethodPrefix::Get => &mut self.getter,
            MethodPrefix::Set => &mut self.setter,
            MethodPrefix::Itr => &mut self.iterator,
        }
    }
}

impl<T> Default for PropertyMethods<T> {
    fn default() -> Self {
        Self {
            getter: None,
            setter: None,
            iterator: None,
        }
    }
}

/// Group candidates by canonical property name.
///
/// Names keep the order in which they were first seen. When two candidates
/// map to the same name and prefix, the later one wins.
pub fn group_by_name<T>(
    candidates: Vec<MethodCandidate<T>>,
    transformer: &dyn NameTransformer,
) -> Vec<(String, PropertyMethods<T>)> {
    let mut grouped: Vec<(String, PropertyMethods<T>)> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for candidate in candidates {
        let name = transformer.transform(candidate.suffix());
        let position = *index.entry(name.clone()).or_insert_with(|| {
            grouped.push((name, PropertyMethods::default()));
            grouped.len() - 1
        });
        let slot = grouped[position].1.slot(candidate.prefix);
        *slot = Some(candidate);
    }

    grouped
}

/// Classify one property's methods by arity.
///
/// | getter | setter | result                          |
/// |--------|--------|---------------------------------|
/// | 0      | 1      | scalar                          |
/// | 1      | 2      | array                           |
/// | other pairing   || `MismatchedProperties`          |
/// | 0      | –      | read-only scalar                |
/// | 1      | –      | read-only array                 |
/// | >1     | –      | `InvalidProperty`               |
/// | –      | 1      | write-only scalar               |
/// | –      | 2      | write-only array                |
/// | –      | other  | `InvalidProperty`               |
/// | –      | –      | iterate-only array              |
pub fn validate<T>(
    name: String,
    methods: PropertyMethods<T>,
) -> Result<PropertyDescriptor<T>, PropertyError> {
    let PropertyMethods {
        getter,
        setter,
        iterator,
    } = methods;

    match (getter, setter) {
        (Some(getter), Some(setter)) => match (getter.arity(), setter.arity()) {
            (0, 1) => Ok(PropertyDescriptor::scalar(name, Some(getter), Some(setter))),
            (1, 2) => Ok(PropertyDescriptor::array(ArrayBinding::new(
                name,
                Some(getter),
                Some(setter),
                iterator,
            ))),
            _ => Err(PropertyError::MismatchedProperties {
                getter: MethodRef::from(&getter),
                setter: MethodRef::from(&setter),
            }),
        },
        (Some(getter), None) => match getter.arity() {
            0 => Ok(PropertyDescriptor::scalar(name, Some(getter), None)),
            1 => Ok(PropertyDescriptor::array(ArrayBinding::new(
                name,
                Some(getter),
                None,
                iterator,
            ))),
            _ => Err(PropertyError::InvalidProperty {
                method: MethodRef::from(&getter),
            }),
        },
        (None, Some(setter)) => match setter.arity() {
            1 => Ok(PropertyDescriptor::scalar(name, None, Some(setter))),
            2 => Ok(PropertyDescriptor::array(ArrayBinding::new(
                name,
                None,
                Some(setter),
                iterator,
            ))),
            _ => Err(PropertyError::InvalidProperty {
                method: MethodRef::from(&setter),
            }),
        },
        (None, None) => Ok(PropertyDescriptor::array(ArrayBinding::new(
            name, None, None, iterator,
        ))),
    }
}

/// Group and validate every candidate of a type.
///
/// Stops at the first invalid property; nothing is returned for the type in
/// that case.
pub fn pair_properties<T>(
    candidates: Vec<MethodCandidate<T>>,
    transformer: &dyn NameTransformer,
) -> Result<PropertyMap<T>, PropertyError> {
    let mut map = PropertyMap::new();
    for (name, methods) in group_by_name(candidates, transformer) {
        map.insert(validate(name, methods)?);
    }
    Ok(map)
}
