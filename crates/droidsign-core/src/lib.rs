//! Droidsign Core Library
//!
//! Release-signing configuration resolution for Flutter/Android projects:
//! key.properties parsing, credential resolution, and keystore inspection.

pub mod error;
pub mod models;
pub mod properties;
pub mod signing;

pub use error::{DroidsignError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
