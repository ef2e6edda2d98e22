//! Append commands issued by the presentation layer.

use std::fmt;

use uuid::Uuid;

use crate::input::ObservationInput;

/// Unique identifier of one user action.
///
/// A command re-delivered with the same id is recognised and not applied
/// twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a fresh random id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Request to append one observation to a typed log.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendCommand<I> {
    pub request_id: RequestId,
    /// Number of user actions on this domain's submit control so far.
    /// Zero means no action has happened yet.
    pub action_count: u64,
    pub input: I,
}

impl<I> AppendCommand<I> {
    pub fn new(request_id: RequestId, action_count: u64, input: I) -> Self {
        Self {
            request_id,
            action_count,
            input,
        }
    }
}

/// Domain-tagged command, as delivered by command feeds.
///
/// On the wire the input's fields sit beside the request id:
///
/// ```json
/// {"request_id":"5f0c…","action_count":1,"domain":"pressure","pre_oxygenator":200,"post_oxygenator":180}
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    pub request_id: RequestId,
    #[cfg_attr(feature = "serde", serde(default = "first_action"))]
    pub action_count: u64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub input: ObservationInput,
}

#[cfg(feature = "serde")]
fn first_action() -> u64 {
    1
}

impl Command {
    pub fn new(request_id: RequestId, action_count: u64, input: impl Into<ObservationInput>) -> Self {
        Self {
            request_id,
            action_count,
            input: input.into(),
        }
    }

    /// Narrow to a typed command carrying `input`.
    pub(crate) fn with_input<I>(&self, input: I) -> AppendCommand<I> {
        AppendCommand::new(self.request_id, self.action_count, input)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::input::PressureInput;

    #[test]
    fn test_command_wire_format() {
        let json = r#"{
            "request_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "action_count": 2,
            "domain": "pressure",
            "pre_oxygenator": 210,
            "post_oxygenator": 175
        }"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.action_count, 2);
        assert_eq!(
            command.request_id.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(
            command.input,
            ObservationInput::Pressure(PressureInput {
                pre_oxygenator: Some(210.0),
                post_oxygenator: Some(175.0),
            })
        );
    }

    #[test]
    fn test_action_count_defaults_to_one() {
        let json = r#"{"request_id":"67e55044-10b1-426f-9247-bb680e5fe0c8","domain":"anticoagulation","ptt":55}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.action_count, 1);
    }
}
