use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use log::info;
use stftgram::{Scaling, Stft, StftParameters, WindowType};
use stftgram_cli::{read_wav, render_view, synthesize, write_csv, Tone, View};

/// Compute an STFT spectrogram of a WAV file or synthetic tones and write one
/// view of it as CSV.
#[derive(Parser)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "tone"])))]
struct Args {
    /// Path to an input WAV file (first channel is used)
    input: Option<PathBuf>,

    /// Synthetic tone as FREQ or FREQ:AMP; repeat to mix several
    #[arg(long)]
    tone: Vec<Tone>,

    /// Sample rate in Hz for synthetic tones
    #[arg(long, default_value_t = 44_100.0)]
    sample_rate: f64,

    /// Length in seconds of the synthetic signal
    #[arg(long, default_value_t = 1.0)]
    duration: f64,

    /// Window length in samples
    #[arg(long, default_value_t = 1024)]
    window: usize,

    /// Hop length in samples
    #[arg(long, default_value_t = 512)]
    hop: usize,

    /// Window family
    #[arg(long, default_value_t = WindowType::Hann)]
    window_type: WindowType,

    /// Output scaling: spectrum or psd
    #[arg(long, default_value_t = Scaling::Spectrum)]
    scaling: Scaling,

    /// Spectrogram view to write
    #[arg(long, value_enum, default_value_t = View::PowerDb)]
    view: View,

    /// Output CSV path; stdout when absent
    #[arg(long)]
    output: Option<PathBuf>,
}

#[cfg(feature = "parallel")]
fn compute(signal: &[f32], params: &StftParameters) -> stftgram::Result<Stft> {
    stftgram::try_stft_parallel(signal, params)
}

#[cfg(not(feature = "parallel"))]
fn compute(signal: &[f32], params: &StftParameters) -> stftgram::Result<Stft> {
    stftgram::try_stft(signal, params)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (signal, sample_rate) = match &args.input {
        Some(path) => {
            let (samples, rate) = read_wav(path)?;
            (samples, f64::from(rate))
        }
        None => (
            synthesize(&args.tone, args.sample_rate, args.duration)?,
            args.sample_rate,
        ),
    };

    let params = StftParameters::new(args.window, args.hop, sample_rate)
        .with_window_type(args.window_type)
        .with_scaling(args.scaling);
    let stft = compute(&signal, &params).context("STFT computation failed")?;
    info!(
        "{} samples at {} Hz -> {} frames x {} bins ({:.3} ms/frame, {:.3} Hz/bin, {:.1}% overlap)",
        signal.len(),
        sample_rate,
        stft.frame_count(),
        stft.frequency_bin_count(),
        stft.frame_time() * 1e3,
        stft.frequency_resolution(),
        params.overlap_percentage()
    );

    let grid = render_view(&stft, args.view).context("building spectrogram view")?;
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_csv(&grid, &mut out)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            write_csv(&grid, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}
