//! Shared fixtures for unit tests.

use propify_core::{Dynamic, MethodCandidate, MethodInfo, MethodPrefix, Visibility};

/// A restricted method whose invoker echoes its argument count.
pub(crate) fn method<T: 'static>(name: &str, arity: usize) -> MethodInfo<T> {
    MethodInfo::new(name, Visibility::Private, arity, |_: &mut T, args| {
        Ok(Dynamic::Int(args.len() as i64))
    })
}

pub(crate) fn public<T: 'static>(name: &str, arity: usize) -> MethodInfo<T> {
    MethodInfo::new(name, Visibility::Public, arity, |_: &mut T, _| Ok(Dynamic::Void))
}

pub(crate) fn candidate<T: 'static>(name: &str, arity: usize) -> MethodCandidate<T> {
    MethodCandidate {
        prefix: MethodPrefix::of(name).expect("fixture names carry a prefix"),
        info: method(name, arity),
    }
}
