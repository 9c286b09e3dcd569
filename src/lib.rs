//! # stftgram - Short-Time Fourier Transform spectrograms
//!
//! Turns a mono `f32` signal into a complex time-frequency grid and derives
//! magnitude, phase and calibrated power (dB) views from it.
//!
//! ## Features
//!
//! - **Validated parameters**: window, hop and sample rate are checked once and
//!   carried as [`ValidParameters`]
//! - **Energy-normalized windows**: Hann by default, open to custom
//!   [`WindowFunction`] implementations
//! - **Pluggable FFT**: any [`SpectralEngine`]; `rustfft` is the default
//! - **All-or-nothing allocation**: failures surface as [`StftError`], never as
//!   half-filled output
//! - **Parallel frames** (optional, `parallel` feature)
//!
//! ## Cargo Features
//!
//! - `parallel`: Frame-parallel STFT with Rayon
//!
//! ## Example
//! ```
//! use stftgram::{try_stft, StftParameters};
//!
//! let fs = 44100.0;
//! let signal: Vec<f32> = (0..44100)
//!     .map(|n| (2.0 * std::f64::consts::PI * 440.0 * n as f64 / fs).sin() as f32)
//!     .collect();
//! let stft = try_stft(&signal, &StftParameters::new(1024, 512, fs)).unwrap();
//! assert_eq!(stft.frame_count(), 85);
//! assert_eq!(stft.frequency_bin_count(), 513);
//!
//! let db = stft.power_spectrogram_db().unwrap();
//! let peak = db
//!     .row(0)
//!     .unwrap()
//!     .iter()
//!     .enumerate()
//!     .max_by(|a, b| a.1.total_cmp(b.1))
//!     .map(|(bin, _)| bin)
//!     .unwrap();
//! assert!((stft.bin_frequency(peak) - 440.0).abs() <= stft.frequency_resolution());
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade: `debug!` per STFT call and per
//! failure, `trace!` for engine planning and dropped tail samples, `warn!` when
//! an unknown window name falls back to Hann. Install any logger to see them.

/// Error type shared by every fallible operation.
pub mod error;

/// STFT parameters and their validation.
pub mod params;

/// Window functions and energy normalization.
pub mod window;

/// Frame placement over the input signal.
pub mod frames;

/// Owned rectangular `[frame][bin]` storage.
pub mod grid;

/// Forward FFT boundary and the `rustfft` engine.
pub mod engine;

/// Batch STFT orchestration.
pub mod stft;

/// Magnitude, phase and power(dB) views.
pub mod views;

/// Frame-parallel STFT.
#[cfg(feature = "parallel")]
pub mod parallel;

pub use rustfft::num_complex::Complex32;

pub use engine::{RustFftEngine, SpectralEngine};
pub use error::{Result, StftError};
pub use frames::FrameLayout;
pub use grid::Grid;
pub use params::{Scaling, StftParameters, ValidParameters};
pub use stft::{perform_stft, try_stft, try_stft_with, Spectrogram, Stft, StftResult};
pub use views::{
    magnitude_spectrogram, phase_spectrogram, power_spectrogram_db, power_spectrogram_db_with,
    PowerDbScale, POWER_DB_REFERENCE, POWER_FLOOR,
};
pub use window::{generate_window, WindowFunction, WindowType};

#[cfg(feature = "parallel")]
pub use parallel::{
    parallel_min_frames, perform_stft_parallel, set_parallel_min_frames, try_stft_parallel,
    try_stft_parallel_with,
};
