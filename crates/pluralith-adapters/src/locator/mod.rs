//! Binary locator adapters.

mod fixed;
mod path;

pub use fixed::StaticLocator;
pub use path::PathLocator;
