use axum::Json;
use axum::extract::{Path, Query};
use echo_forms::catalog::{CatalogEntry, search};
use echo_forms::field::FieldDef;
use echo_forms::registry::LesionField;
use echo_forms::variant::FormVariant;
use echo_forms::visibility::FormView;
use echo_forms::{FormTemplate, get_template};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::form::FormInput;

#[derive(Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
}

pub async fn list_templates(Query(query): Query<CatalogQuery>) -> Json<Vec<CatalogEntry>> {
    Json(
        search(&query.q, query.category.as_deref())
            .into_iter()
            .copied()
            .collect(),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetail {
    pub variant: FormVariant,
    pub fields: Vec<FieldDef>,
    pub lesion_fields: Vec<LesionField>,
}

pub(crate) fn find_template(id: &str) -> Result<Box<dyn FormTemplate>, ApiError> {
    get_template(id).ok_or_else(|| ApiError::NotFound(format!("form template not found: {id}")))
}

pub async fn get_template_detail(Path(id): Path<String>) -> Result<Json<TemplateDetail>, ApiError> {
    let template = find_template(&id)?;
    Ok(Json(TemplateDetail {
        variant: *template.variant(),
        fields: template.fields().to_vec(),
        lesion_fields: template.lesion_fields().to_vec(),
    }))
}

pub async fn view_form(
    Path(id): Path<String>,
    Json(input): Json<FormInput>,
) -> Result<Json<FormView>, ApiError> {
    let template = find_template(&id)?;
    let state = input.into_state(template.as_ref())?;
    Ok(Json(template.view(&state)))
}

#[derive(Serialize)]
pub struct ValidationReport {
    pub complete: bool,
    pub missing: Vec<String>,
}

pub async fn validate_form(
    Path(id): Path<String>,
    Json(input): Json<FormInput>,
) -> Result<Json<ValidationReport>, ApiError> {
    let template = find_template(&id)?;
    let state = input.into_state(template.as_ref())?;
    let missing: Vec<String> = template.validate(&state).iter().map(ToString::to_string).collect();
    Ok(Json(ValidationReport {
        complete: missing.is_empty(),
        missing,
    }))
}
