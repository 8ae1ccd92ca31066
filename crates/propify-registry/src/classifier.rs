//! Selection of the methods that can back a property.

use propify_core::{MethodCandidate, MethodInfo, MethodPrefix};

/// Keep the restricted methods whose name starts with a recognised prefix.
///
/// A name must be strictly longer than its prefix (`get` alone is ignored).
/// No name transformation happens here.
pub fn classify<T>(methods: Vec<MethodInfo<T>>) -> Vec<MethodCandidate<T>> {
    methods
        .into_iter()
        .filter(|info| info.visibility().is_restricted())
        .filter_map(|info| {
            MethodPrefix::of(info.name()).map(|prefix| MethodCandidate { info, prefix })
        })
        .collect()
}
