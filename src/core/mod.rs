//! UDS link layer - core constants, error types, traits and value types.
//!
//! This module has no optional dependencies and is always compiled.

mod constants;
mod error;
mod traits;
mod types;

pub use constants::*;
pub use error::*;
pub use traits::*;
pub use types::*;
