//! STFT parameter sets and their validation.

use core::fmt;
use core::str::FromStr;

use crate::error::{Result, StftError};
use crate::frames;
use crate::window::WindowType;

/// How FFT output is scaled before it is stored in the spectrogram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scaling {
    /// Divide every bin by the window length. This matches a normalized-FFT
    /// magnitude convention and is what the power(dB) calibration assumes.
    #[default]
    Spectrum,
    /// Divide every bin by `sqrt(sample_rate * Σw²)`, giving a power spectral
    /// density when squared.
    Psd,
}

impl FromStr for Scaling {
    type Err = StftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spectrum" => Ok(Scaling::Spectrum),
            "psd" | "density" => Ok(Scaling::Psd),
            _ => Err(StftError::InvalidParameter(format!("unknown scaling {s:?}"))),
        }
    }
}

impl fmt::Display for Scaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scaling::Spectrum => f.write_str("spectrum"),
            Scaling::Psd => f.write_str("psd"),
        }
    }
}

/// Raw STFT parameters. Nothing is checked until [`StftParameters::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StftParameters {
    pub window_length: usize,
    pub hop_length: usize,
    /// Samples per second.
    pub sample_rate: f64,
    pub window_type: WindowType,
    pub scaling: Scaling,
}

impl StftParameters {
    /// Hann window, spectrum scaling.
    pub fn new(window_length: usize, hop_length: usize, sample_rate: f64) -> Self {
        Self {
            window_length,
            hop_length,
            sample_rate,
            window_type: WindowType::default(),
            scaling: Scaling::default(),
        }
    }

    /// Replace the window family.
    pub fn with_window_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    /// Replace the output scaling.
    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Check the parameter set, stopping at the first violation.
    ///
    /// Order: window length, hop length, hop vs window, sample rate.
    pub fn validate(&self) -> Result<ValidParameters> {
        if self.window_length == 0 {
            return Err(StftError::InvalidWindowSize);
        }
        if self.hop_length == 0 {
            return Err(StftError::InvalidHopSize);
        }
        if self.hop_length > self.window_length {
            return Err(StftError::HopExceedsWindow {
                hop: self.hop_length,
                window: self.window_length,
            });
        }
        // NaN fails both comparisons.
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(StftError::InvalidSampleRate);
        }
        Ok(ValidParameters(*self))
    }

    /// Percentage of each frame shared with the next one.
    pub fn overlap_percentage(&self) -> f64 {
        (self.window_length as f64 - self.hop_length as f64) / self.window_length as f64 * 100.0
    }

    /// Seconds between consecutive frame starts.
    pub fn frame_time(&self) -> f64 {
        self.hop_length as f64 / self.sample_rate
    }

    /// Hz covered by one frequency bin.
    pub fn frequency_resolution(&self) -> f64 {
        self.sample_rate / self.window_length as f64
    }

    /// Bins kept per frame: `0..=window_length / 2`.
    pub fn frequency_bin_count(&self) -> usize {
        self.window_length / 2 + 1
    }

    /// Number of full frames in a signal of `input_len` samples, if any.
    pub fn frame_count(&self, input_len: usize) -> Option<usize> {
        frames::frame_count(input_len, self.window_length, self.hop_length)
    }
}

/// A parameter set that passed [`StftParameters::validate`].
///
/// The compute path only accepts this type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidParameters(StftParameters);

impl ValidParameters {
    /// The underlying parameter set.
    pub fn get(&self) -> &StftParameters {
        &self.0
    }

    /// Samples per frame.
    pub fn window_length(&self) -> usize {
        self.0.window_length
    }

    /// Samples between frame starts.
    pub fn hop_length(&self) -> usize {
        self.0.hop_length
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> f64 {
        self.0.sample_rate
    }

    /// Window family.
    pub fn window_type(&self) -> WindowType {
        self.0.window_type
    }

    /// Output scaling mode.
    pub fn scaling(&self) -> Scaling {
        self.0.scaling
    }

    /// Bins kept per frame.
    pub fn frequency_bin_count(&self) -> usize {
        self.0.frequency_bin_count()
    }

    /// Factor applied to every FFT output bin, given the (normalized) window.
    pub fn output_scale(&self, window: &[f32]) -> f32 {
        match self.0.scaling {
            Scaling::Spectrum => 1.0 / self.0.window_length as f32,
            Scaling::Psd => {
                let energy: f64 = window.iter().map(|&w| (w as f64) * (w as f64)).sum();
                // an all-zero window (Hann of length 1) yields zero output
                if energy > 0.0 {
                    (1.0 / (self.0.sample_rate * energy).sqrt()) as f32
                } else {
                    0.0
                }
            }
        }
    }
}

impl From<ValidParameters> for StftParameters {
    fn from(valid: ValidParameters) -> Self {
        valid.0
    }
}
