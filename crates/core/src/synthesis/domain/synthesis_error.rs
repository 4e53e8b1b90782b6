use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("no text to synthesize: enter some text first")]
    EmptyText,
    #[error("voice '{voice_id}' not found: add '{voice_id}.wav' to the voice directory")]
    VoiceNotFound { voice_id: String },
    #[error("speech synthesis failed: {cause}")]
    Synthesis { cause: String },
}

impl SynthesisError {
    pub fn failed(cause: impl Into<String>) -> Self {
        SynthesisError::Synthesis {
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_distinct() {
        let messages = [
            SynthesisError::EmptyText.to_string(),
            SynthesisError::VoiceNotFound {
                voice_id: "narratorA".to_string(),
            }
            .to_string(),
            SynthesisError::failed("exit code 1").to_string(),
        ];
        assert!(messages[1].contains("narratorA.wav"));
        assert!(messages[2].ends_with("exit code 1"));
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
    }
}
