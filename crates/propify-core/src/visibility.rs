//! Visibility of introspected methods.

use std::fmt;

/// Visibility modifier of a method.
///
/// Only restricted methods (anything but `Public`) can back a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Public,
    /// Visible outside the declaring module but not everywhere (`pub(crate)`, `pub(super)`, ...).
    Protected,
    #[default]
    Private,
}

impl Visibility {
    /// Check whether methods with this visibility may back a property.
    pub fn is_restricted(self) -> bool {
        !matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}
