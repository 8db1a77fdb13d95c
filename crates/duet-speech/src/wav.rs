//! WAV encoding for playback sinks.

use crate::{AudioData, TTSError, TTSResult};
use std::io::Cursor;

/// Encode audio as 16-bit PCM WAV bytes, clamping samples to [-1, 1]
pub fn encode_wav(audio: &AudioData) -> TTSResult<Vec<u8>> {
    let channels = u16::try_from(audio.channels)
        .ok()
        .filter(|channels| *channels > 0)
        .ok_or_else(|| {
            TTSError::Other(
                format!("unsupported channel count {}", audio.channels),
                "wav encoding".to_string(),
            )
        })?;

    let spec = hound::WavSpec {
        channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + audio.samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in &audio.samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clamped * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}
