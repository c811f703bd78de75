//! Fixed-ratio linear-interpolation resampler.
//!
//! One-shot transform over a single buffer. No filter state is carried
//! between calls, so samples at chunk edges are approximate.

use std::borrow::Cow;

/// Resample `samples` from `from_rate` to `to_rate` using linear interpolation.
///
/// - Equal rates return the input borrowed, unchanged.
/// - The output holds `floor(len * to_rate / from_rate)` samples.
/// - Output sample `i` sits at source position `i * from_rate / to_rate` and
///   is interpolated between the floor neighbour and the next one, with the
///   upper index clamped to the last input sample.
/// - Interpolated values are truncated toward zero.
///
/// A zero rate yields an empty buffer.
pub fn resample_linear(samples: &[i16], from_rate: u32, to_rate: u32) -> Cow<'_, [i16]> {
    if from_rate == to_rate {
        return Cow::Borrowed(samples);
    }
    if from_rate == 0 || to_rate == 0 || samples.is_empty() {
        return Cow::Owned(Vec::new());
    }

    let from = from_rate as u64;
    let to = to_rate as u64;
    let out_len = output_len(samples.len(), from_rate, to_rate);
    let last = samples.len() - 1;

    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len as u64 {
        // Integer position keeps the floor index exact for long buffers
        let scaled = i * from;
        let i0 = (scaled / to) as usize;
        let i1 = (i0 + 1).min(last);
        let frac = (scaled % to) as f64 / to as f64;

        let s0 = samples[i0] as f64;
        let s1 = samples[i1] as f64;
        out.push((s0 * (1.0 - frac) + s1 * frac) as i16);
    }

    Cow::Owned(out)
}

/// Number of samples `resample_linear` produces for an input of `len` samples.
#[inline]
pub fn output_len(len: usize, from_rate: u32, to_rate: u32) -> usize {
    if from_rate == to_rate {
        return len;
    }
    if from_rate == 0 || to_rate == 0 {
        return 0;
    }
    (len as u64 * to_rate as u64 / from_rate as u64) as usize
}
