//! Error taxonomy for STFT computation.
//!
//! Parameter and input errors are expected conditions the caller can fix.
//! Allocation and engine errors are resource failures; they are still
//! returned as values, but [`StftError::is_fatal`] flags them so callers can
//! tell "fix your input" apart from "retrying will not help".

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, StftError>;

/// Every way an STFT call can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StftError {
    #[error("Window size must be greater than 0")]
    InvalidWindowSize,

    #[error("Hop size must be greater than 0")]
    InvalidHopSize,

    /// Hop longer than the window would skip samples between frames.
    #[error("Hop size must be less than or equal to window size")]
    HopExceedsWindow { hop: usize, window: usize },

    /// Zero, negative, NaN or infinite sample rate.
    #[error("Sample rate must be greater than 0")]
    InvalidSampleRate,

    /// Unparseable or out-of-range option outside the core window/hop/rate checks.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Returned by the strict window-name parser.
    #[error("Unknown window type: {0}")]
    UnknownWindow(String),

    #[error("Input data too short for window size")]
    InputTooShort { input_len: usize, window_len: usize },

    /// Memory for the named buffer could not be reserved, or its size overflowed.
    #[error("Failed to allocate {0}")]
    Allocation(&'static str),

    #[error("Failed to configure FFT of length {len}: {reason}")]
    EngineSetup { len: usize, reason: String },

    /// Buffer handed to a spectral engine does not match its planned length.
    #[error("FFT buffer length {actual} does not match planned length {expected}")]
    MismatchedLengths { expected: usize, actual: usize },
}

impl StftError {
    /// `true` for resource-exhaustion failures (allocation, engine setup).
    ///
    /// Parameter and input errors are never fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StftError::Allocation(_)
                | StftError::EngineSetup { .. }
                | StftError::MismatchedLengths { .. }
        )
    }
}
