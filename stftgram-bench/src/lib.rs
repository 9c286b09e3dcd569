//! Shared inputs for the stftgram benchmarks.

/// CD sample rate used by every benchmark.
pub const SAMPLE_RATE: f64 = 44_100.0;

/// `seconds` of a 440 Hz + 3 kHz mix at [`SAMPLE_RATE`].
pub fn test_signal(seconds: f64) -> Vec<f32> {
    let len = (SAMPLE_RATE * seconds) as usize;
    (0..len)
        .map(|n| {
            let t = n as f64 / SAMPLE_RATE;
            (0.6 * (2.0 * std::f64::consts::PI * 440.0 * t).sin()
                + 0.3 * (2.0 * std::f64::consts::PI * 3_000.0 * t).sin()) as f32
        })
        .collect()
}
