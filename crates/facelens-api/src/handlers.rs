//! Request handlers.

pub mod analyze;
pub mod health;
pub mod labels;

pub use analyze::*;
pub use health::*;
pub use labels::*;
