//! Best-effort microphone capture around a narration session.
//!
//! Records the default input device to a WAV file so the shell can offer a
//! download of what the speakers played. Capture is an independent
//! collaborator: any failure here is logged and swallowed, and narration
//! continues unaffected.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use hound::{SampleFormat, WavSpec, WavWriter};

/// Rough per-character speech estimate used to time capture shutdown.
const MS_PER_CHAR: u64 = 150;

type SharedWriter = Arc<Mutex<Option<WavWriter<std::io::BufWriter<std::fs::File>>>>>;

/// Estimate how long narrating `text` will take at speech rate `rate`.
///
/// The estimate is deliberately generous (the original used it to decide when
/// to stop recording); non-finite or non-positive rates fall back to 1.0.
pub fn estimated_narration_duration(text: &str, rate: f32) -> Duration {
    let rate = if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        1.0
    };
    let chars = text.chars().count() as u64;
    let base_ms = chars.saturating_mul(MS_PER_CHAR);
    Duration::from_millis((base_ms as f64 / rate as f64) as u64)
}

/// One in-flight recording of the default input device.
///
/// Input frames are downmixed to mono and written as 32-bit float WAV.
pub struct CaptureSession {
    writer: SharedWriter,
    stream: cpal::Stream,
    path: PathBuf,
}

impl CaptureSession {
    /// Start recording into a WAV file at `path`.
    pub fn start(path: &Path) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .context("no input device available")?;
        let config = device
            .default_input_config()
            .context("query default input config")?;

        let sample_rate = config.sample_rate();
        let channels = (config.channels() as usize).max(1);

        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let writer: SharedWriter = Arc::new(Mutex::new(Some(
            WavWriter::create(path, spec)
                .with_context(|| format!("create wav file {:?}", path))?,
        )));

        let writer_cb = Arc::clone(&writer);
        let stream_config: cpal::StreamConfig = config.into();
        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut guard) = writer_cb.lock() {
                        if let Some(writer) = guard.as_mut() {
                            for sample in data.iter().step_by(channels) {
                                let _ = writer.write_sample(*sample);
                            }
                        }
                    }
                },
                |err| {
                    tracing::error!("capture stream error: {err}");
                },
                None,
            )
            .context("build input stream")?;

        stream.play().context("start input stream")?;
        tracing::info!(
            path = %path.display(),
            sample_rate,
            channels,
            "capture started"
        );

        Ok(Self {
            writer,
            stream,
            path: path.to_path_buf(),
        })
    }

    /// Start recording, logging and returning `None` on any failure.
    ///
    /// This is the entry point the shell should use around `play`: a denied
    /// microphone permission or a missing device must not stop narration.
    pub fn start_best_effort(path: &Path) -> Option<Self> {
        match Self::start(path) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!("capture unavailable: {err:#}");
                None
            }
        }
    }

    /// Path of the WAV file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stop recording and finalize the WAV file.
    pub fn stop(self) -> Result<PathBuf> {
        drop(self.stream);

        let writer = self
            .writer
            .lock()
            .ok()
            .and_then(|mut guard| guard.take());
        if let Some(writer) = writer {
            writer.finalize().context("finalize wav file")?;
        }

        tracing::info!(path = %self.path.display(), "capture stopped");
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_estimate_scales_with_text_length() {
        let short = estimated_narration_duration("abcd", 1.0);
        let long = estimated_narration_duration(&"a".repeat(40), 1.0);
        assert_eq!(short, Duration::from_millis(600));
        assert_eq!(long, Duration::from_millis(6000));
    }

    #[test]
    fn duration_estimate_scales_inversely_with_rate() {
        let normal = estimated_narration_duration("abcdefgh", 1.0);
        let fast = estimated_narration_duration("abcdefgh", 2.0);
        assert_eq!(fast.as_millis() * 2, normal.as_millis());
    }

    #[test]
    fn duration_estimate_tolerates_bad_rates() {
        let text = "abcd";
        let fallback = estimated_narration_duration(text, 1.0);
        assert_eq!(estimated_narration_duration(text, 0.0), fallback);
        assert_eq!(estimated_narration_duration(text, -2.0), fallback);
        assert_eq!(estimated_narration_duration(text, f32::NAN), fallback);
    }

    #[test]
    fn duration_estimate_is_zero_for_empty_text() {
        assert_eq!(
            estimated_narration_duration("", 1.0),
            Duration::from_millis(0)
        );
    }

    #[test]
    fn duration_estimate_counts_chars_not_bytes() {
        // Devanagari text: multi-byte chars must not inflate the estimate.
        let latin = estimated_narration_duration("abcd", 1.0);
        let devanagari = estimated_narration_duration("कखगघ", 1.0);
        assert_eq!(latin, devanagari);
    }
}
