//! Tapering windows for STFT framing.
//!
//! Windows are produced by a [`WindowFunction`] and then L2-normalized so the
//! squared coefficients sum to one.

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

use log::warn;

use crate::error::{Result, StftError};

/// A window family: fills a buffer with raw (un-normalized) coefficients.
///
/// Implement this to plug a new family into [`generate_window_with`].
pub trait WindowFunction: Sync {
    /// Lower-case family name, as accepted by [`WindowType::from_str`].
    fn name(&self) -> &'static str;

    /// Write `out.len()` raw coefficients.
    fn fill(&self, out: &mut [f32]);
}

/// Periodic Hann window, `0.5 * (1 - cos(2πn / N))`.
///
/// The denominator is the window length, not `N - 1`, matching
/// `scipy.signal.get_window("hann", N)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hann;

impl WindowFunction for Hann {
    fn name(&self) -> &'static str {
        "hann"
    }

    fn fill(&self, out: &mut [f32]) {
        let n = out.len() as f64;
        for (i, w) in out.iter_mut().enumerate() {
            let angle = (2.0 * PI * i as f64 / n) as f32;
            *w = 0.5 * (1.0 - angle.cos());
        }
    }
}

/// Window family tag carried by [`StftParameters`](crate::StftParameters).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowType {
    #[default]
    Hann,
}

/// Known families. Every [`WindowType`] variant has exactly one entry.
static WINDOW_TABLE: &[(WindowType, &dyn WindowFunction)] = &[(WindowType::Hann, &Hann)];

impl WindowType {
    /// All known families, in table order.
    pub fn all() -> impl Iterator<Item = WindowType> {
        WINDOW_TABLE.iter().map(|(kind, _)| *kind)
    }

    /// Coefficient generator for this family.
    pub fn function(self) -> &'static dyn WindowFunction {
        WINDOW_TABLE
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, f)| *f)
            .unwrap_or(&Hann)
    }

    pub fn name(self) -> &'static str {
        self.function().name()
    }

    /// Lenient parse: unknown names fall back to [`WindowType::Hann`].
    ///
    /// This is the documented default for callers that pass free-form names
    /// (config files, UIs). Use [`str::parse`] to reject unknown names instead.
    pub fn parse_or_default(name: &str) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(_) => {
                warn!("unknown window type {name:?}, falling back to hann");
                WindowType::Hann
            }
        }
    }
}

impl FromStr for WindowType {
    type Err = StftError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        WINDOW_TABLE
            .iter()
            .find(|(_, f)| f.name() == wanted || (wanted == "hanning" && f.name() == "hann"))
            .map(|(kind, _)| *kind)
            .ok_or_else(|| StftError::UnknownWindow(s.to_string()))
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generate a raw Hann window of length `len`.
pub fn hann(len: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; len];
    Hann.fill(&mut out);
    out
}

/// Sum of squared coefficients.
pub fn window_energy(window: &[f32]) -> f32 {
    window.iter().map(|w| w * w).sum()
}

/// Scale `window` in place so its squared coefficients sum to one.
///
/// Returns the norm it divided by. An all-zero window is left untouched and
/// `0.0` is returned.
pub fn normalize_energy(window: &mut [f32]) -> f32 {
    let norm = window_energy(window).sqrt();
    if norm > 0.0 {
        for w in window.iter_mut() {
            *w /= norm;
        }
    }
    norm
}

/// Generate an energy-normalized window of the given family.
pub fn generate_window(kind: WindowType, len: usize) -> Result<Vec<f32>> {
    generate_window_with(kind.function(), len)
}

/// Generate an energy-normalized window from any [`WindowFunction`].
pub fn generate_window_with(function: &dyn WindowFunction, len: usize) -> Result<Vec<f32>> {
    if len == 0 {
        return Err(StftError::InvalidWindowSize);
    }
    let mut window = Vec::new();
    window
        .try_reserve_exact(len)
        .map_err(|_| StftError::Allocation("window function"))?;
    window.resize(len, 0.0);
    function.fill(&mut window);
    normalize_energy(&mut window);
    Ok(window)
}
