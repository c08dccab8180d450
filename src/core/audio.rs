//! Audio frame decoding
//!
//! Incoming audio arrives as raw little-endian 16-bit PCM mono at 16 kHz.
//! The decoder converts a byte buffer into normalized f32 samples in
//! [-1.0, 1.0], which is the format the inference engines consume.

/// Sample rate every inbound audio chunk is assumed to use.
pub const SAMPLE_RATE: u32 = 16_000;

/// Error type for audio decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    /// Buffer length is not a multiple of 2, so it cannot be a whole
    /// sequence of 16-bit samples.
    #[error("malformed PCM buffer: {0} bytes is not a multiple of 2")]
    MalformedAudio(usize),
}

/// Decode a raw little-endian PCM16 byte buffer into normalized f32 samples.
///
/// Each sample is divided by 32768 so the output lies in [-1.0, 1.0].
///
/// # Errors
/// Returns [`AudioError::MalformedAudio`] when the buffer carries an odd
/// trailing byte. Callers in the streaming path drop the chunk and keep the
/// connection alive.
pub fn decode_pcm16(bytes: &[u8]) -> Result<Vec<f32>, AudioError> {
    if bytes.len() % 2 != 0 {
        return Err(AudioError::MalformedAudio(bytes.len()));
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect();
    Ok(samples)
}

/// Encode normalized f32 samples back into little-endian PCM16 bytes.
///
/// Used by the HTTP engine clients, which speak linear16 on the wire.
/// Samples outside [-1.0, 1.0] are clamped.
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32768.0) as i32;
        let value = value.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}
