//! Whole-frame transcoding between the telephony and model audio formats.
//!
//! - Telephony side: G.711 μ-law, 8 kHz, mono, base64 text.
//! - Model side: PCM 16-bit signed little-endian, 16 kHz, mono, base64 text.

use base64::prelude::*;
use thiserror::Error;

use super::mulaw;
use super::resample::resample_linear;

/// Sample rate of telephony media frames.
pub const TELEPHONY_SAMPLE_RATE: u32 = 8000;

/// Sample rate of model input and output audio.
pub const MODEL_SAMPLE_RATE: u32 = 16000;

/// Errors raised while decoding a frame payload.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Payload was not valid base64
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// PCM payload did not hold a whole number of 16-bit samples
    #[error("PCM payload has odd length: {0} bytes")]
    OddPcmLength(usize),
}

/// Result type for transcoding operations.
pub type TranscodeResult<T> = Result<T, TranscodeError>;

/// Convert a base64 μ-law 8 kHz payload into a base64 PCM16 16 kHz payload.
pub fn telephony_to_model(payload: &str) -> TranscodeResult<String> {
    let companded = BASE64_STANDARD.decode(payload)?;
    let samples = mulaw::decode_buffer(&companded);
    let resampled = resample_linear(&samples, TELEPHONY_SAMPLE_RATE, MODEL_SAMPLE_RATE);
    Ok(BASE64_STANDARD.encode(samples_to_le_bytes(&resampled)))
}

/// Convert a base64 PCM16 16 kHz payload into a base64 μ-law 8 kHz payload.
pub fn model_to_telephony(payload: &str) -> TranscodeResult<String> {
    let pcm = BASE64_STANDARD.decode(payload)?;
    let samples = le_bytes_to_samples(&pcm)?;
    let resampled = resample_linear(&samples, MODEL_SAMPLE_RATE, TELEPHONY_SAMPLE_RATE);
    Ok(BASE64_STANDARD.encode(mulaw::encode_buffer(&resampled)))
}

/// Serialize samples as little-endian 16-bit PCM.
pub fn samples_to_le_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Parse little-endian 16-bit PCM into samples.
pub fn le_bytes_to_samples(bytes: &[u8]) -> TranscodeResult<Vec<i16>> {
    if bytes.len() % 2 != 0 {
        return Err(TranscodeError::OddPcmLength(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}
