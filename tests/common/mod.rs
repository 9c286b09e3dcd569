//! Shared signal generators for the integration tests.
#![allow(dead_code)]

use std::f64::consts::PI;

/// `amplitude * sin(2π f n / fs)` for `len` samples.
pub fn sine(freq_hz: f64, amplitude: f64, sample_rate: f64, len: usize) -> Vec<f32> {
    (0..len)
        .map(|n| (amplitude * (2.0 * PI * freq_hz * n as f64 / sample_rate).sin()) as f32)
        .collect()
}

/// Sum of unit-phase sines, one per `(freq_hz, amplitude)` pair.
pub fn tones(components: &[(f64, f64)], sample_rate: f64, len: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; len];
    for &(freq, amp) in components {
        for (o, s) in out.iter_mut().zip(sine(freq, amp, sample_rate, len)) {
            *o += s;
        }
    }
    out
}

/// Index of the largest value in `row`.
pub fn argmax(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Bin nearest to `freq_hz` for a given resolution.
pub fn nearest_bin(freq_hz: f64, resolution: f64) -> usize {
    (freq_hz / resolution).round() as usize
}

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
