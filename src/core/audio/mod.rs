//! Audio primitives for the bridge hot path.
//!
//! # Modules
//! - `mulaw`: G.711 μ-law sample codec
//! - `resample`: fixed-ratio linear interpolation resampler
//! - `transcode`: whole-frame conversion between telephony and model formats
//!
//! Everything here is pure and synchronous. A frame is always converted to
//! completion before the next socket event is handled.

pub mod mulaw;
pub mod resample;
pub mod transcode;

pub use resample::resample_linear;
pub use transcode::{
    MODEL_SAMPLE_RATE, TELEPHONY_SAMPLE_RATE, TranscodeError, TranscodeResult,
    model_to_telephony, telephony_to_model,
};
