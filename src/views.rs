//! Magnitude, phase and power(dB) views of a complex spectrogram.
//!
//! Every view allocates its own [`Grid<f32>`] with the spectrogram's shape and
//! leaves the source untouched, so calling a view twice gives identical
//! output.

use core::f64::consts::PI;

use crate::error::Result;
use crate::grid::Grid;
use crate::stft::Spectrogram;
use crate::Complex32;

/// Multiplier applied to `|X|²` before the decibel conversion.
///
/// With [`Scaling::Spectrum`](crate::Scaling::Spectrum) output this lines the
/// power levels up with `scipy.signal.stft` reference dumps for the same
/// window and hop (a +70 dB offset). It is a fitted calibration, not a
/// physical constant; override it through [`PowerDbScale::new`].
pub const POWER_DB_REFERENCE: f64 = 1e7;

/// Smallest power fed to the logarithm. Silence maps to -200 dB instead of -inf.
pub const POWER_FLOOR: f64 = 1e-20;

/// Multiplier converting power ratios to decibels.
const DB_MULTIPLIER: f64 = 10.0;

/// `sqrt(re² + im²)`
pub fn magnitude(c: Complex32) -> f64 {
    let re = c.re as f64;
    let im = c.im as f64;
    (re * re + im * im).sqrt()
}

/// `atan2(im, re)` in `(-π, π]`.
pub fn phase(c: Complex32) -> f64 {
    let angle = (c.im as f64).atan2(c.re as f64);
    // atan2 yields -π for a negative real with -0.0 imaginary part
    if angle <= -PI {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Power in dB under the default [`PowerDbScale`].
pub fn power_db(c: Complex32) -> f64 {
    PowerDbScale::default().to_db(c)
}

/// Calibration used to turn a spectrogram bin into decibels:
/// `10·log10(max(|X|²·reference, floor))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerDbScale {
    pub reference: f64,
    pub floor: f64,
}

impl Default for PowerDbScale {
    fn default() -> Self {
        Self {
            reference: POWER_DB_REFERENCE,
            floor: POWER_FLOOR,
        }
    }
}

impl PowerDbScale {
    /// Custom reference multiplier with the default floor.
    pub fn new(reference: f64) -> Self {
        Self {
            reference,
            ..Self::default()
        }
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Lowest value [`to_db`](Self::to_db) can return.
    pub fn floor_db(&self) -> f64 {
        DB_MULTIPLIER * self.floor.log10()
    }

    pub fn to_db(&self, c: Complex32) -> f64 {
        let mag = magnitude(c);
        let power = mag * mag * self.reference;
        DB_MULTIPLIER * power.max(self.floor).log10()
    }
}

/// Per-bin magnitude.
pub fn magnitude_spectrogram(spectrogram: &Spectrogram) -> Result<Grid<f32>> {
    spectrogram.try_map("magnitude spectrogram", |c| magnitude(c) as f32)
}

/// Per-bin phase in radians.
pub fn phase_spectrogram(spectrogram: &Spectrogram) -> Result<Grid<f32>> {
    spectrogram.try_map("phase spectrogram", |c| phase(c) as f32)
}

/// Per-bin power in dB with the default calibration.
pub fn power_spectrogram_db(spectrogram: &Spectrogram) -> Result<Grid<f32>> {
    power_spectrogram_db_with(spectrogram, &PowerDbScale::default())
}

/// Per-bin power in dB with a caller-supplied calibration.
pub fn power_spectrogram_db_with(
    spectrogram: &Spectrogram,
    scale: &PowerDbScale,
) -> Result<Grid<f32>> {
    spectrogram.try_map("power spectrogram", |c| scale.to_db(c) as f32)
}
