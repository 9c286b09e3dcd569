//! Input and output helpers for the `stftgram-cli` binary.

use std::f64::consts::PI;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{ensure, Context, Result};
use clap::ValueEnum;
use hound::{SampleFormat, WavReader};
use log::warn;
use stftgram::{Grid, Stft};

/// One sine component of a synthetic test signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq_hz: f64,
    pub amplitude: f64,
}

impl FromStr for Tone {
    type Err = String;

    /// `FREQ` or `FREQ:AMP`; amplitude defaults to 1.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let (freq, amp) = match s.split_once(':') {
            Some((f, a)) => (f, Some(a)),
            None => (s, None),
        };
        let freq_hz: f64 = freq
            .trim()
            .parse()
            .map_err(|_| format!("invalid tone frequency {freq:?}"))?;
        let amplitude: f64 = match amp {
            Some(a) => a
                .trim()
                .parse()
                .map_err(|_| format!("invalid tone amplitude {a:?}"))?,
            None => 1.0,
        };
        if !(freq_hz.is_finite() && freq_hz >= 0.0) || !amplitude.is_finite() {
            return Err(format!("tone {s:?} out of range"));
        }
        Ok(Tone { freq_hz, amplitude })
    }
}

/// Which real-valued view of the spectrogram to emit.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    Magnitude,
    Phase,
    #[default]
    PowerDb,
}

/// Sum of sines sampled at `sample_rate` for `duration` seconds.
pub fn synthesize(tones: &[Tone], sample_rate: f64, duration: f64) -> Result<Vec<f32>> {
    ensure!(
        sample_rate.is_finite() && sample_rate > 0.0,
        "sample rate must be positive, got {sample_rate}"
    );
    ensure!(
        duration.is_finite() && duration > 0.0,
        "duration must be positive, got {duration}"
    );
    let len = (sample_rate * duration).round();
    ensure!(
        len <= (isize::MAX as usize / std::mem::size_of::<f32>()) as f64,
        "{duration} s at {sample_rate} Hz is too many samples"
    );
    let len = len as usize;
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(len)
        .with_context(|| format!("allocating {len} samples"))?;
    samples.extend((0..len).map(|n| {
        let t = n as f64 / sample_rate;
        tones
            .iter()
            .map(|tone| tone.amplitude * (2.0 * PI * tone.freq_hz * t).sin())
            .sum::<f64>() as f32
    }));
    Ok(samples)
}

/// Read the first channel of a WAV file as `f32` in `[-1, 1]`.
pub fn read_wav(path: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader =
        WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));
    if channels > 1 {
        warn!(
            "{} has {} channels, using the first one",
            path.display(),
            channels
        );
    }
    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .step_by(channels)
            .collect::<core::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<core::result::Result<_, _>>()?
        }
    };
    Ok((samples, spec.sample_rate))
}

/// Extract `view` from a finished STFT.
pub fn render_view(stft: &Stft, view: View) -> stftgram::Result<Grid<f32>> {
    match view {
        View::Magnitude => stft.magnitude_spectrogram(),
        View::Phase => stft.phase_spectrogram(),
        View::PowerDb => stft.power_spectrogram_db(),
    }
}

/// One line per frame, one comma-separated column per bin.
pub fn write_csv<W: Write>(grid: &Grid<f32>, out: &mut W) -> io::Result<()> {
    for row in grid.rows() {
        let mut first = true;
        for v in row {
            if !first {
                out.write_all(b",")?;
            }
            write!(out, "{v:.18e}")?;
            first = false;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stftgram::{try_stft, StftParameters};

    #[test]
    fn parses_tones() {
        assert_eq!(
            "440".parse::<Tone>(),
            Ok(Tone {
                freq_hz: 440.0,
                amplitude: 1.0
            })
        );
        assert_eq!(
            "220:0.5".parse::<Tone>(),
            Ok(Tone {
                freq_hz: 220.0,
                amplitude: 0.5
            })
        );
        assert!("abc".parse::<Tone>().is_err());
        assert!("100:x".parse::<Tone>().is_err());
        assert!("-5".parse::<Tone>().is_err());
    }

    #[test]
    fn synthesize_length_and_amplitude() {
        let tones = [Tone {
            freq_hz: 100.0,
            amplitude: 0.5,
        }];
        let s = synthesize(&tones, 8000.0, 0.25).unwrap();
        assert_eq!(s.len(), 2000);
        let peak = s.iter().copied().fold(0.0f32, |m, v| m.max(v.abs()));
        assert!((peak - 0.5).abs() < 1e-3);
        assert!(synthesize(&tones, 8000.0, 0.0).is_err());
        assert!(synthesize(&tones, 0.0, 1.0).is_err());
        assert!(synthesize(&tones, 44_100.0, 1e300).is_err());
    }

    #[test]
    fn csv_has_one_row_per_frame() {
        let signal = vec![0.0f32; 64];
        let stft = try_stft(&signal, &StftParameters::new(16, 8, 100.0)).unwrap();
        let grid = render_view(&stft, View::Magnitude).unwrap();
        let mut out = Vec::new();
        write_csv(&grid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0].split(',').count(), 9);
        assert!(lines[0].starts_with("0.000000000000000000e0"));
    }
}
