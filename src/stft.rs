//! Batch Short-Time Fourier Transform.
//!
//! [`try_stft`] is the `Result`-returning entry point. [`perform_stft`] wraps
//! it in an [`StftResult`] that always comes back well-formed, with a success
//! flag and a diagnostic message, for callers that prefer checking a flag over
//! matching on errors.
//!
//! # Example
//! ```
//! use stftgram::{perform_stft, StftParameters};
//!
//! let signal: Vec<f32> = (0..4096)
//!     .map(|n| (2.0 * std::f32::consts::PI * 1000.0 * n as f32 / 8000.0).sin())
//!     .collect();
//! let params = StftParameters::new(256, 128, 8000.0);
//! let result = perform_stft(&signal, &params);
//! assert!(result.is_success());
//! let mags = result.magnitude_spectrogram().unwrap();
//! assert_eq!(mags.shape(), (31, 129));
//! ```

use log::debug;

use crate::engine::{RustFftEngine, SpectralEngine};
use crate::error::{Result, StftError};
use crate::frames::FrameLayout;
use crate::grid::Grid;
use crate::params::{StftParameters, ValidParameters};
use crate::views::{self, PowerDbScale};
use crate::window::generate_window;
use crate::Complex32;

/// Complex STFT output indexed `[frame][bin]`, bins `0..=window_length / 2`.
pub type Spectrogram = Grid<Complex32>;

/// Everything one STFT call needs before touching the engine.
pub(crate) struct FramePlan {
    pub(crate) params: ValidParameters,
    pub(crate) layout: FrameLayout,
    pub(crate) window: Vec<f32>,
    pub(crate) scale: f32,
}

impl FramePlan {
    pub(crate) fn new(input_len: usize, params: &StftParameters) -> Result<Self> {
        let params = params.validate()?;
        let layout = FrameLayout::new(input_len, params.window_length(), params.hop_length())?;
        let window = generate_window(params.window_type(), params.window_length())?;
        let scale = params.output_scale(&window);
        debug!(
            "stft: {} samples, {} window of {}, hop {}, {} scaling -> {} frames x {} bins",
            input_len,
            params.window_type(),
            params.window_length(),
            params.hop_length(),
            params.scaling(),
            layout.count(),
            params.frequency_bin_count()
        );
        Ok(Self {
            params,
            layout,
            window,
            scale,
        })
    }

    pub(crate) fn allocate(&self) -> Result<Spectrogram> {
        Grid::try_filled(
            self.layout.count(),
            self.params.frequency_bin_count(),
            Complex32::new(0.0, 0.0),
            "spectrogram memory",
        )
    }

    pub(crate) fn plan_engine<E: SpectralEngine>(&self) -> Result<E> {
        let len = self.params.window_length();
        let engine = E::plan(len)?;
        if engine.transform_len() != len {
            return Err(StftError::EngineSetup {
                len,
                reason: format!("engine planned for length {}", engine.transform_len()),
            });
        }
        Ok(engine)
    }

    pub(crate) fn finish(self, spectrogram: Spectrogram) -> Stft {
        Stft {
            spectrogram,
            frame_time: self.params.get().frame_time(),
            frequency_resolution: self.params.get().frequency_resolution(),
            params: self.params,
        }
    }
}

/// Zeroed complex buffer of `len` samples.
pub(crate) fn scratch_buffer(len: usize) -> Result<Vec<Complex32>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| StftError::Allocation("FFT buffers"))?;
    buffer.resize(len, Complex32::new(0.0, 0.0));
    Ok(buffer)
}

/// Window one frame, transform it, and store the scaled positive-frequency
/// half in `out`.
pub(crate) fn transform_frame<E: SpectralEngine>(
    frame: &[f32],
    window: &[f32],
    scale: f32,
    engine: &mut E,
    buffer: &mut [Complex32],
    out: &mut [Complex32],
) -> Result<()> {
    for ((b, &x), &w) in buffer.iter_mut().zip(frame).zip(window) {
        *b = Complex32::new(x * w, 0.0);
    }
    engine.forward(buffer)?;
    for (o, &b) in out.iter_mut().zip(buffer.iter()) {
        *o = b * scale;
    }
    Ok(())
}

/// Compute the STFT of `signal` with the default `rustfft` engine.
pub fn try_stft(signal: &[f32], params: &StftParameters) -> Result<Stft> {
    try_stft_with::<RustFftEngine>(signal, params)
}

/// Compute the STFT of `signal` with a caller-chosen spectral engine.
///
/// The engine is planned once for the whole call and dropped before return.
pub fn try_stft_with<E: SpectralEngine>(signal: &[f32], params: &StftParameters) -> Result<Stft> {
    let plan = FramePlan::new(signal.len(), params)?;
    run_serial::<E>(signal, plan)
}

pub(crate) fn run_serial<E: SpectralEngine>(signal: &[f32], plan: FramePlan) -> Result<Stft> {
    let mut spectrogram = plan.allocate()?;
    let mut engine: E = plan.plan_engine()?;
    let mut buffer = scratch_buffer(plan.window.len())?;

    for (range, row) in plan.layout.ranges().zip(spectrogram.rows_mut()) {
        transform_frame(
            &signal[range],
            &plan.window,
            plan.scale,
            &mut engine,
            &mut buffer,
            row,
        )?;
    }
    Ok(plan.finish(spectrogram))
}

/// Compute the STFT and fold any error into a failed [`StftResult`].
///
/// Never panics on bad input; check [`StftResult::is_success`] before
/// reading data.
pub fn perform_stft(signal: &[f32], params: &StftParameters) -> StftResult {
    StftResult::from(try_stft(signal, params))
}

/// A successful STFT.
#[derive(Clone, Debug)]
pub struct Stft {
    spectrogram: Spectrogram,
    params: ValidParameters,
    frame_time: f64,
    frequency_resolution: f64,
}

impl Stft {
    pub fn spectrogram(&self) -> &Spectrogram {
        &self.spectrogram
    }

    pub fn into_spectrogram(self) -> Spectrogram {
        self.spectrogram
    }

    pub fn parameters(&self) -> &ValidParameters {
        &self.params
    }

    pub fn frame_count(&self) -> usize {
        self.spectrogram.frames()
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.spectrogram.bins()
    }

    /// Seconds between frame starts.
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    /// Hz per bin.
    pub fn frequency_resolution(&self) -> f64 {
        self.frequency_resolution
    }

    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.frequency_resolution
    }

    /// Centre frequency of every bin, in Hz.
    pub fn frequencies(&self) -> Vec<f64> {
        (0..self.frequency_bin_count())
            .map(|bin| self.bin_frequency(bin))
            .collect()
    }

    /// Time of the first sample of `frame`, in seconds.
    pub fn frame_start_time(&self, frame: usize) -> f64 {
        frame as f64 * self.frame_time
    }

    pub fn magnitude_spectrogram(&self) -> Result<Grid<f32>> {
        views::magnitude_spectrogram(&self.spectrogram)
    }

    pub fn phase_spectrogram(&self) -> Result<Grid<f32>> {
        views::phase_spectrogram(&self.spectrogram)
    }

    pub fn power_spectrogram_db(&self) -> Result<Grid<f32>> {
        views::power_spectrogram_db(&self.spectrogram)
    }

    pub fn power_spectrogram_db_with(&self, scale: &PowerDbScale) -> Result<Grid<f32>> {
        views::power_spectrogram_db_with(&self.spectrogram, scale)
    }
}

const SUCCESS_MESSAGE: &str = "STFT computation successful";

/// Outcome of [`perform_stft`]: either a spectrogram or a diagnosed failure.
///
/// On failure every numeric accessor returns zero and every view returns
/// `None`.
#[derive(Clone, Debug)]
pub struct StftResult {
    outcome: core::result::Result<Stft, StftError>,
    message: String,
}

impl From<Result<Stft>> for StftResult {
    fn from(outcome: Result<Stft>) -> Self {
        let message = match &outcome {
            Ok(_) => SUCCESS_MESSAGE.to_string(),
            Err(err) => {
                debug!("stft failed: {err}");
                err.to_string()
            }
        };
        Self { outcome, message }
    }
}

impl StftResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> Option<&StftError> {
        self.outcome.as_ref().err()
    }

    pub fn stft(&self) -> Option<&Stft> {
        self.outcome.as_ref().ok()
    }

    pub fn into_result(self) -> Result<Stft> {
        self.outcome
    }

    /// Present iff the computation succeeded.
    pub fn spectrogram(&self) -> Option<&Spectrogram> {
        self.stft().map(Stft::spectrogram)
    }

    pub fn frame_count(&self) -> usize {
        self.stft().map_or(0, Stft::frame_count)
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.stft().map_or(0, Stft::frequency_bin_count)
    }

    pub fn frame_time(&self) -> f64 {
        self.stft().map_or(0.0, Stft::frame_time)
    }

    pub fn frequency_resolution(&self) -> f64 {
        self.stft().map_or(0.0, Stft::frequency_resolution)
    }

    pub fn magnitude_spectrogram(&self) -> Option<Grid<f32>> {
        view(self.stft()?.magnitude_spectrogram())
    }

    pub fn phase_spectrogram(&self) -> Option<Grid<f32>> {
        view(self.stft()?.phase_spectrogram())
    }

    pub fn power_spectrogram_db(&self) -> Option<Grid<f32>> {
        view(self.stft()?.power_spectrogram_db())
    }

    pub fn power_spectrogram_db_with(&self, scale: &PowerDbScale) -> Option<Grid<f32>> {
        view(self.stft()?.power_spectrogram_db_with(scale))
    }
}

fn view(grid: Result<Grid<f32>>) -> Option<Grid<f32>> {
    grid.map_err(|err| debug!("spectrogram view failed: {err}")).ok()
}
