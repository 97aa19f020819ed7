//! Core error types for scene export
//!
//! Export has two failure tiers. Invalid arguments and scene models the
//! binder does not understand are fatal and surface through [`ExportError`].
//! Missing legends, captions, axis containers or plots are normal conditions
//! and are handled by omission, never by an error.

use thiserror::Error;

/// Core error types for the export pipeline
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unsupported axis scale: {value}")]
    UnsupportedScale { value: String },

    #[error("Unsupported tick alignment for tick length {tick_length}")]
    UnsupportedTickAlignment { tick_length: f32 },

    #[error("Scene error: {message}")]
    SceneError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new unsupported scale error
    pub fn unsupported_scale(value: impl Into<String>) -> Self {
        Self::UnsupportedScale {
            value: value.into(),
        }
    }

    /// Create a new unsupported tick alignment error
    pub fn unsupported_tick_alignment(tick_length: f32) -> Self {
        Self::UnsupportedTickAlignment { tick_length }
    }

    /// Create a new scene error
    pub fn scene_error(message: impl Into<String>) -> Self {
        Self::SceneError {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by a scene model the binder does not understand
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ExportError::UnsupportedScale { .. } | ExportError::UnsupportedTickAlignment { .. }
        )
    }
}
