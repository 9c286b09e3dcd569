// Test intent: verifies window generation, normalization and name parsing.

mod common;

use proptest::prelude::*;

use stftgram::window::{generate_window_with, hann, window_energy, Hann};
use stftgram::{generate_window, StftError, WindowFunction, WindowType};

/// Allowed floating-point error when verifying normalization.
const EPSILON: f32 = 1e-5;

/// Helper to find the maximum element in a slice.
fn max(slice: &[f32]) -> f32 {
    slice.iter().copied().fold(f32::MIN, f32::max)
}

/// Rectangular window used to check that custom families plug in.
struct Boxcar;

impl WindowFunction for Boxcar {
    fn name(&self) -> &'static str {
        "boxcar"
    }

    fn fill(&self, out: &mut [f32]) {
        out.fill(1.0);
    }
}

/// Normalized windows carry unit energy at every length.
#[test]
fn normalized_energy_is_one() {
    for len in [2, 3, 16, 255, 1024, 4096] {
        let w = generate_window(WindowType::Hann, len).unwrap();
        assert!(
            (window_energy(&w) - 1.0).abs() < EPSILON,
            "len {len}: {}",
            window_energy(&w)
        );
    }
}

/// Raw Hann starts at zero and peaks at the centre for even lengths.
#[test]
fn hann_edges_and_peak() {
    let w = hann(1024);
    assert!(w[0].abs() < EPSILON);
    assert!((w[512] - 1.0).abs() < EPSILON);
    assert!((max(&w) - w[512]).abs() < f32::EPSILON);
}

/// Normalization only rescales: the shape is preserved.
#[test]
fn normalization_preserves_shape() {
    let raw = hann(32);
    let norm = generate_window(WindowType::Hann, 32).unwrap();
    let ratio = norm[16] / raw[16];
    for (r, n) in raw.iter().zip(&norm) {
        assert!((r * ratio - n).abs() < EPSILON);
    }
}

/// A custom family goes through the same normalization.
#[test]
fn custom_window_family() {
    let w = generate_window_with(&Boxcar, 16).unwrap();
    for &v in &w {
        assert!((v - 0.25).abs() < EPSILON);
    }
    let h = generate_window_with(&Hann, 16).unwrap();
    assert_eq!(h, generate_window(WindowType::Hann, 16).unwrap());
}

/// Strict parsing rejects unknown names; lenient parsing falls back to Hann.
#[test]
fn window_name_policy() {
    common::init_logging();
    assert_eq!("hann".parse::<WindowType>(), Ok(WindowType::Hann));
    assert_eq!(" Hanning ".parse::<WindowType>(), Ok(WindowType::Hann));
    assert_eq!(
        "kaiser".parse::<WindowType>(),
        Err(StftError::UnknownWindow("kaiser".into()))
    );
    assert_eq!(WindowType::parse_or_default("kaiser"), WindowType::Hann);
    assert_eq!(WindowType::Hann.to_string(), "hann");
    assert_eq!(WindowType::all().count(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Unit energy holds at every window length.
    #[test]
    fn normalized_energy_is_one_for_any_length(len in 2usize..4096) {
        let w = generate_window(WindowType::Hann, len).unwrap();
        prop_assert_eq!(w.len(), len);
        prop_assert!((window_energy(&w) - 1.0).abs() < 1e-4);
    }
}
