//! echo-forms
//!
//! Report form templates and the form state machine. Pure data, no I/O.
//! A template defines its fields and sections; the state reducer, visibility
//! rules, validation and collection turn user events into a stored record.

pub mod blocks;
pub mod catalog;
pub mod collect;
pub mod error;
pub mod field;
pub mod prefill;
pub mod registry;
pub mod state;
pub mod templates;
pub mod validation;
pub mod variant;
pub mod visibility;

use std::collections::BTreeSet;

use echo_core::models::record::FormRecord;

use error::FormError;
use field::{FieldDef, FieldRef};
use registry::{LesionField, SCALAR_FIELDS};
use state::{FormEvent, FormState};
use variant::FormVariant;
use visibility::FormView;

/// Trait implemented by each report form template.
pub trait FormTemplate: Send + Sync {
    /// How this form is identified, stored and prefilled.
    fn variant(&self) -> &FormVariant;

    /// Unique identifier (e.g., "ct_mr_liver_ai").
    fn id(&self) -> &str {
        self.variant().id
    }

    fn name(&self) -> &str {
        self.variant().name
    }

    /// Scalar controls, in page order.
    fn fields(&self) -> &[FieldDef] {
        SCALAR_FIELDS
    }

    /// Controls repeated in every lesion block.
    fn lesion_fields(&self) -> &[LesionField] {
        &LesionField::ALL
    }

    fn apply(&self, state: &FormState, event: FormEvent) -> Result<FormState, FormError> {
        state.apply(self.variant(), event)
    }

    fn replay(&self, events: Vec<FormEvent>) -> Result<FormState, FormError> {
        FormState::replay(self.variant(), events)
    }

    /// Re-derive a client-supplied snapshot through the reducer.
    fn rebuild(&self, snapshot: &FormState) -> Result<FormState, FormError> {
        FormState::rebuild(self.variant(), snapshot)
    }

    fn view(&self, state: &FormState) -> FormView {
        visibility::view(state)
    }

    fn validate(&self, state: &FormState) -> BTreeSet<FieldRef> {
        validation::validate(state)
    }

    fn collect(&self, state: &FormState) -> FormRecord {
        collect::collect(state)
    }
}

/// Return all registered form templates.
pub fn all_templates() -> Vec<Box<dyn FormTemplate>> {
    vec![
        Box::new(templates::ct_mr_liver::CtMrLiverAssisted),
        Box::new(templates::ct_mr_liver::CtMrLiverManual),
    ]
}

/// Look up a template by ID.
pub fn get_template(id: &str) -> Option<Box<dyn FormTemplate>> {
    all_templates().into_iter().find(|t| t.id() == id)
}

/// Look up a template by the type tag stored on report documents.
pub fn template_for_type(template_type: &str) -> Option<Box<dyn FormTemplate>> {
    all_templates()
        .into_iter()
        .find(|t| t.variant().template_type == template_type)
}

/// Resolve a template code suggested by the chat assistant. Only the liver
/// code has a form; cardiac (`T002`) is not implemented.
pub fn template_for_code(code: &str) -> Option<Box<dyn FormTemplate>> {
    match code {
        "T001" => get_template(variant::ASSISTED.id),
        _ => None,
    }
}
