//! Frame-parallel STFT on the rayon thread pool.
//!
//! Requires the `parallel` feature. Each rayon job plans its own spectral
//! engine and scratch buffer, so no transform state is shared between
//! threads. Output is identical to [`try_stft`](crate::try_stft).
//!
//! Short signals are not worth the fan-out: below
//! [`parallel_min_frames`] frames the serial path is used. The threshold
//! defaults to 64 frames, can be set with the `STFTGRAM_PAR_MIN_FRAMES`
//! environment variable (read once), and can be overridden at runtime with
//! [`set_parallel_min_frames`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use rayon::prelude::*;

use crate::engine::{RustFftEngine, SpectralEngine};
use crate::error::Result;
use crate::params::StftParameters;
use crate::stft::{run_serial, scratch_buffer, transform_frame, FramePlan, Stft, StftResult};

const DEFAULT_MIN_FRAMES: usize = 64;

/// `0` means no override.
static MIN_FRAMES_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static MIN_FRAMES_ENV: OnceLock<usize> = OnceLock::new();

/// Set the minimum frame count for parallel processing. `0` restores the
/// environment/default value.
pub fn set_parallel_min_frames(frames: usize) {
    MIN_FRAMES_OVERRIDE.store(frames, Ordering::Relaxed);
}

/// Current minimum frame count for parallel processing.
pub fn parallel_min_frames() -> usize {
    match MIN_FRAMES_OVERRIDE.load(Ordering::Relaxed) {
        0 => *MIN_FRAMES_ENV.get_or_init(|| {
            std::env::var("STFTGRAM_PAR_MIN_FRAMES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_MIN_FRAMES)
        }),
        n => n,
    }
}

/// Parallel [`try_stft`](crate::try_stft).
pub fn try_stft_parallel(signal: &[f32], params: &StftParameters) -> Result<Stft> {
    try_stft_parallel_with::<RustFftEngine>(signal, params)
}

/// Parallel [`try_stft_with`](crate::try_stft_with) with a caller-chosen engine.
pub fn try_stft_parallel_with<E: SpectralEngine + Send>(
    signal: &[f32],
    params: &StftParameters,
) -> Result<Stft> {
    let plan = FramePlan::new(signal.len(), params)?;
    if plan.layout.count() < parallel_min_frames() {
        return run_serial::<E>(signal, plan);
    }
    let mut spectrogram = plan.allocate()?;
    let bins = spectrogram.bins();
    let window_len = plan.window.len();

    spectrogram
        .as_mut_slice()
        .par_chunks_exact_mut(bins)
        .enumerate()
        .try_for_each_init(
            || -> Result<(E, Vec<crate::Complex32>)> {
                Ok((plan.plan_engine()?, scratch_buffer(window_len)?))
            },
            |state, (index, row)| {
                let (engine, buffer) = state.as_mut().map_err(|err| err.clone())?;
                let start = plan.layout.offset(index);
                transform_frame(
                    &signal[start..start + window_len],
                    &plan.window,
                    plan.scale,
                    engine,
                    buffer,
                    row,
                )
            },
        )?;
    Ok(plan.finish(spectrogram))
}

/// Parallel [`perform_stft`](crate::perform_stft).
pub fn perform_stft_parallel(signal: &[f32], params: &StftParameters) -> StftResult {
    StftResult::from(try_stft_parallel(signal, params))
}
