//! Layout containers

pub mod column;
pub mod scrollable;

pub use column::Column;
pub use scrollable::Scrollable;
