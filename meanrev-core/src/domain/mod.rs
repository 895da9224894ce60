//! Domain types for the signal pipeline.

pub mod annotated;
pub mod bar;
pub mod signal;

pub use annotated::AnnotatedBar;
pub use bar::Bar;
pub use signal::Signal;

/// Symbol type alias
pub type Symbol = String;
