//! Form payloads posted by the browser.

use echo_forms::FormTemplate;
use echo_forms::error::FormError;
use echo_forms::state::{FormEvent, FormState};
use serde::Deserialize;

/// A form either as the events that built it or as a state snapshot.
/// Either way the state is rebuilt through the reducer, so a snapshot
/// breaking the form rules is rejected.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FormInput {
    Events { events: Vec<FormEvent> },
    State { state: FormState },
}

impl FormInput {
    pub fn into_state(self, template: &dyn FormTemplate) -> Result<FormState, FormError> {
        match self {
            FormInput::Events { events } => template.replay(events),
            FormInput::State { state } => template.rebuild(&state),
        }
    }
}
