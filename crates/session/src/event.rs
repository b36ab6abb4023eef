use serde::{Deserialize, Serialize};

/// One transcript hypothesis for an utterance.
///
/// `text` is a full replacement of any previous hypothesis, not a diff.
/// `revision` orders successive hypotheses for the same utterance and is
/// strictly increasing within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEvent {
    pub utterance_id: String,
    pub revision: u64,
    pub text: String,
    pub is_final: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let event = TranscriptEvent {
            utterance_id: "utt-1".into(),
            revision: 3,
            text: "turn on the kitchen lights".into(),
            is_final: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "utterance_id": "utt-1",
                "revision": 3,
                "text": "turn on the kitchen lights",
                "is_final": true,
            })
        );

        let back: TranscriptEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
