use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::record::FormRecord;

/// Patient document, written with merge semantics so repeat visits update
/// demographics without dropping earlier data.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub dob: String,
    pub age: String,
    pub sex: String,
    pub last_seen: jiff::Timestamp,
}

impl Patient {
    pub fn from_record(patient_id: &str, record: &FormRecord, now: jiff::Timestamp) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            name: record.text("patientName").to_string(),
            dob: record.text("dob").to_string(),
            age: record.text("age").to_string(),
            sex: record.text("sex").to_string(),
            last_seen: now,
        }
    }
}

/// `P-` + first three letters of the name (whitespace removed, upper-cased)
/// + birth year, falling back to `current_year` when no DOB is known.
///
/// Returns `None` when the name is blank.
pub fn derive_patient_id(name: &str, dob: &str, current_year: i16) -> Option<String> {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    let name_part: String = compact.chars().take(3).collect::<String>().to_uppercase();
    let year_part = match dob.split('-').next().filter(|y| !y.is_empty()) {
        Some(year) => year.to_string(),
        None => current_year.to_string(),
    };
    Some(format!("P-{name_part}{year_part}"))
}

/// Age in whole years on `today`; `None` for unparseable dates or
/// non-positive ages.
pub fn age_on(dob: &str, today: Date) -> Option<i16> {
    let dob: Date = dob.trim().parse().ok()?;
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    (age > 0).then_some(age)
}
