use base64::Engine;

/// Audio data encoded as base64
pub type Base64EncodedAudioBytes = String;

pub type AudioDecodeError = base64::DecodeError;

/// Decodes a base64 audio fragment (standard alphabet, padded) into raw bytes.
pub fn decode(fragment: &str) -> Result<Vec<u8>, AudioDecodeError> {
    base64::engine::general_purpose::STANDARD.decode(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_standard_base64() {
        assert_eq!(decode("SUQz").unwrap(), b"ID3".to_vec());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode("not base64!").is_err());
    }
}
