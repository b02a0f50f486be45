//! Screen navigation.
//!
//! Rendering lives elsewhere; this module only decides which screen is shown
//! after each authentication result.

mod flow;
mod stack;

pub use flow::AuthFlow;
pub use stack::{NavigationStack, Route};
