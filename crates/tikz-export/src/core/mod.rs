//! Core abstractions for scene export
//!
//! Document elements, label escaping, number and style formatting, the
//! renderer, configuration and the error type shared by every binder.

mod config;
mod element;
mod error;
mod format;
pub mod logging;
mod text;
mod writer;

pub use config::*;
pub use element::*;
pub use error::*;
pub use format::*;
pub use logging::*;
pub use text::*;
pub use writer::*;
