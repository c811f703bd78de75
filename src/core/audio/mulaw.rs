//! G.711 μ-law sample codec.
//!
//! Converts between 8-bit logarithmically companded telephone samples and
//! 16-bit linear PCM. Decoding goes through a 256-entry table built at
//! compile time; encoding is a branch-light segment search.
//!
//! Both directions are total: every byte decodes and every `i16` encodes.
//! Encoding is lossy, with a quantization step of `2^(exponent + 3)` in the
//! biased magnitude domain.

/// Bias added to the magnitude before the segment search.
pub const MULAW_BIAS: i32 = 0x84;

/// Largest biased magnitude representable before the segment search.
pub const MULAW_CLIP: i32 = 0x7FFF;

/// Companded byte for digital silence.
pub const MULAW_SILENCE: u8 = 0xFF;

const DECODE_TABLE: [i16; 256] = build_decode_table();

const fn decode_uncached(byte: u8) -> i16 {
    let mu = !byte;
    let exponent = (mu >> 4) & 0x07;
    let mantissa = (mu & 0x0F) as i32;
    let magnitude = (((mantissa << 3) + MULAW_BIAS) << exponent) - MULAW_BIAS;

    if mu & 0x80 != 0 {
        -magnitude as i16
    } else {
        magnitude as i16
    }
}

const fn build_decode_table() -> [i16; 256] {
    let mut table = [0i16; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_uncached(i as u8);
        i += 1;
    }
    table
}

/// Decode one μ-law byte to a linear 16-bit sample.
#[inline]
pub fn decode(byte: u8) -> i16 {
    DECODE_TABLE[byte as usize]
}

/// Encode one linear 16-bit sample as a μ-law byte.
#[inline]
pub fn encode(sample: i16) -> u8 {
    let sample = sample as i32;
    let sign: u8 = if sample < 0 { 0x80 } else { 0x00 };
    let magnitude = (sample.abs() + MULAW_BIAS).min(MULAW_CLIP);

    let mut exponent: u8 = 7;
    let mut mask = 0x4000;
    while magnitude & mask == 0 && exponent > 0 {
        exponent -= 1;
        mask >>= 1;
    }

    let mantissa = ((magnitude >> (exponent + 3)) & 0x0F) as u8;
    !(sign | (exponent << 4) | mantissa)
}

/// Decode a buffer of μ-law bytes.
pub fn decode_buffer(bytes: &[u8]) -> Vec<i16> {
    bytes.iter().map(|&b| decode(b)).collect()
}

/// Encode a buffer of linear samples as μ-law bytes.
pub fn encode_buffer(samples: &[i16]) -> Vec<u8> {
    samples.iter().map(|&s| encode(s)).collect()
}

/// Exponent (segment number) carried by a μ-law byte.
#[inline]
pub fn exponent_of(byte: u8) -> u8 {
    ((!byte) >> 4) & 0x07
}
