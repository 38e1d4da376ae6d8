//! Formkit-Validation Core
//!
//! Pure string predicates used by the formkit schema builder. Each function
//! answers a single question about a value and never allocates error text;
//! message rendering belongs to the caller's locale catalog.

pub mod email;
pub mod script;
pub mod string;

// Re-export all validators
pub use email::*;
pub use script::*;
pub use string::*;
