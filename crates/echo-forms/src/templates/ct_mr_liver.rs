use crate::FormTemplate;
use crate::variant::{ASSISTED, FormVariant, MANUAL};

/// CT/MRI liver report prefilled from a chat session.
pub struct CtMrLiverAssisted;

impl FormTemplate for CtMrLiverAssisted {
    fn variant(&self) -> &FormVariant {
        &ASSISTED
    }
}

/// CT/MRI liver report entered by hand.
pub struct CtMrLiverManual;

impl FormTemplate for CtMrLiverManual {
    fn variant(&self) -> &FormVariant {
        &MANUAL
    }
}
