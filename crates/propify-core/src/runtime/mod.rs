//! Runtime values exchanged with accessor methods.

mod dynamic;

pub use dynamic::{Dynamic, DynamicIter};
