// Test intent: verifies stft parameter validation and failed-result behavior.

mod common;

use proptest::prelude::*;
use stftgram::{perform_stft, try_stft, StftError, StftParameters};

/// Sample rate used wherever the rate itself is not under test.
const RATE: f64 = 16_000.0;

/// Run `perform_stft` on a one-second zero signal and return its message.
fn message_for(params: StftParameters) -> String {
    common::init_logging();
    let signal = vec![0.0f32; RATE as usize];
    let result = perform_stft(&signal, &params);
    assert!(!result.is_success());
    result.message().to_string()
}

/// Each invalid parameter reports its own validator message.
#[test]
fn invalid_parameters_report_validator_message() {
    assert_eq!(
        message_for(StftParameters::new(0, 1, RATE)),
        "Window size must be greater than 0"
    );
    assert_eq!(
        message_for(StftParameters::new(256, 0, RATE)),
        "Hop size must be greater than 0"
    );
    assert_eq!(
        message_for(StftParameters::new(256, 257, RATE)),
        "Hop size must be less than or equal to window size"
    );
    assert_eq!(
        message_for(StftParameters::new(256, 128, 0.0)),
        "Sample rate must be greater than 0"
    );
    assert_eq!(
        message_for(StftParameters::new(256, 128, -8_000.0)),
        "Sample rate must be greater than 0"
    );
    assert_eq!(
        message_for(StftParameters::new(256, 128, f64::NAN)),
        "Sample rate must be greater than 0"
    );
}

/// Validation stops at the first violation in a fixed order.
#[test]
fn first_violation_wins() {
    assert_eq!(
        StftParameters::new(0, 0, 0.0).validate(),
        Err(StftError::InvalidWindowSize)
    );
    assert_eq!(
        StftParameters::new(8, 0, 0.0).validate(),
        Err(StftError::InvalidHopSize)
    );
    assert_eq!(
        StftParameters::new(8, 9, 0.0).validate(),
        Err(StftError::HopExceedsWindow { hop: 9, window: 8 })
    );
}

/// A signal shorter than one window fails without allocating output.
#[test]
fn short_signal_fails_cleanly() {
    let result = perform_stft(&[0.25; 1023], &StftParameters::new(1024, 512, 44_100.0));
    assert!(!result.is_success());
    assert!(result.message().contains("too short"));
    assert_eq!(
        result.error(),
        Some(&StftError::InputTooShort {
            input_len: 1023,
            window_len: 1024
        })
    );
    assert!(!result.error().unwrap().is_fatal());
    assert!(result.spectrogram().is_none());
    assert!(result.stft().is_none());
}

/// An empty signal is just the shortest possible short signal.
#[test]
fn empty_signal_is_too_short() {
    let err = try_stft(&[], &StftParameters::new(4, 2, RATE)).unwrap_err();
    assert!(matches!(err, StftError::InputTooShort { input_len: 0, .. }));
}

/// Every view on a failed result returns `None` instead of panicking.
#[test]
fn views_on_failed_result_are_none() {
    let result = perform_stft(&[0.0; 8], &StftParameters::new(0, 4, RATE));
    assert!(result.magnitude_spectrogram().is_none());
    assert!(result.phase_spectrogram().is_none());
    assert!(result.power_spectrogram_db().is_none());
    assert!(result
        .power_spectrogram_db_with(&stftgram::PowerDbScale::new(1.0))
        .is_none());
    assert_eq!(result.frame_count(), 0);
    assert_eq!(result.frequency_bin_count(), 0);
    assert_eq!(result.frequency_resolution(), 0.0);
}

/// Hop equal to the window is valid and gives non-overlapping frames.
#[test]
fn hop_equal_to_window_is_accepted() {
    let params = StftParameters::new(64, 64, RATE);
    assert_eq!(params.overlap_percentage(), 0.0);
    let stft = try_stft(&[0.0; 640], &params).unwrap();
    assert_eq!(stft.frame_count(), 10);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Output shape follows `floor((N - W) / H) + 1` by `W / 2 + 1`.
    #[test]
    fn shape_follows_frame_formula(
        window in 1usize..96,
        hop_frac in 0.0f64..1.0,
        extra in 0usize..300,
    ) {
        let hop = 1 + ((window - 1) as f64 * hop_frac) as usize;
        let len = window + extra;
        let signal = vec![0.1f32; len];
        let stft = try_stft(&signal, &StftParameters::new(window, hop, RATE)).unwrap();
        prop_assert_eq!(stft.frame_count(), (len - window) / hop + 1);
        prop_assert_eq!(stft.frequency_bin_count(), window / 2 + 1);
    }
}
