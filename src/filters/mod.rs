//! Filter module.
//!
//! Contains the filter registry, the built-in filter implementations and the
//! preview renderer.

pub mod builtin;
pub mod preview;
pub mod registry;

pub use preview::{PreviewRenderer, PreviewStats};
pub use registry::{FilterFn, FilterRegistry, RegistryEntry};
