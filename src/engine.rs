//! Forward-FFT boundary.
//!
//! The orchestrator plans one engine per STFT call and feeds it every frame.
//! Engines perform an unnormalized forward DFT; all output scaling is done by
//! the caller.

use std::sync::Arc;

use log::trace;
use rustfft::{Fft, FftPlanner, Length};

use crate::error::{Result, StftError};
use crate::Complex32;

/// A forward complex FFT of a fixed length.
///
/// Handles are owned by a single STFT call and released on drop.
pub trait SpectralEngine: Sized {
    /// Prepare a transform of length `len`.
    fn plan(len: usize) -> Result<Self>;

    /// Length this engine was planned for.
    fn transform_len(&self) -> usize;

    /// In-place forward DFT of `buffer`, which must be `transform_len()` long.
    fn forward(&mut self, buffer: &mut [Complex32]) -> Result<()>;
}

/// [`SpectralEngine`] backed by `rustfft`.
pub struct RustFftEngine {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex32>,
}

impl SpectralEngine for RustFftEngine {
    fn plan(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(StftError::EngineSetup {
                len,
                reason: "transform length must be non-zero".into(),
            });
        }
        let fft = FftPlanner::<f32>::new().plan_fft_forward(len);
        let scratch_len = fft.get_inplace_scratch_len();
        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(scratch_len)
            .map_err(|_| StftError::Allocation("FFT buffers"))?;
        scratch.resize(scratch_len, Complex32::new(0.0, 0.0));
        trace!("planned forward FFT of length {len} ({scratch_len} scratch)");
        Ok(Self { fft, scratch })
    }

    fn transform_len(&self) -> usize {
        self.fft.len()
    }

    fn forward(&mut self, buffer: &mut [Complex32]) -> Result<()> {
        let expected = self.fft.len();
        if buffer.len() != expected {
            return Err(StftError::MismatchedLengths {
                expected,
                actual: buffer.len(),
            });
        }
        self.fft.process_with_scratch(buffer, &mut self.scratch);
        Ok(())
    }
}
