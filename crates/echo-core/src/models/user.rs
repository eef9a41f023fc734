use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Placeholder the profile editor stores for fields the user skipped.
pub const NOT_SET: &str = "Not set";

/// Characters accepted as the "special character" in a password.
const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    /// Sequential display ID, e.g. `U000012`.
    pub user_id: String,
    /// Identity issued by the external authentication provider.
    pub auth_uid: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub license_id: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: jiff::Timestamp,
}

impl UserProfile {
    /// Fields a complete profile must carry that are still blank or unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("specialty", &self.specialty),
            ("licenseId", &self.license_id),
        ]
        .into_iter()
        .filter(|(_, value)| is_unset(value))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn license_verified(&self) -> bool {
        !is_unset(&self.license_id)
    }

    /// `Radiologist, Hepatobiliary` style title line; department omitted when unset.
    pub fn title_line(&self) -> String {
        let specialty = if is_unset(&self.specialty) {
            "Radiologist"
        } else {
            self.specialty.as_str()
        };
        if is_unset(&self.department) {
            specialty.to_string()
        } else {
            format!("{specialty}, {}", self.department)
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(v) = update.full_name {
            self.full_name = v;
        }
        if let Some(v) = update.specialty {
            self.specialty = v;
        }
        if let Some(v) = update.department {
            self.department = v;
        }
        if let Some(v) = update.license_id {
            self.license_id = v;
        }
        if let Some(v) = update.photo_url {
            self.photo_url = Some(v);
        }
    }
}

fn is_unset(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == NOT_SET
}

/// Partial profile edit; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub license_id: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegistrationForm {
    pub auth_uid: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RegistrationIssue {
    MissingName,
    MissingEmail,
    PasswordTooShort,
    PasswordNeedsLowercase,
    PasswordNeedsUppercase,
    PasswordNeedsDigit,
    PasswordNeedsSpecial,
    PasswordMismatch,
}

impl RegistrationForm {
    pub fn role_or_default(&self) -> &str {
        self.role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or("Doctor")
    }

    /// Every rule the form currently violates, in checklist order.
    pub fn issues(&self) -> Vec<RegistrationIssue> {
        let mut issues = Vec::new();
        if self.full_name.trim().is_empty() {
            issues.push(RegistrationIssue::MissingName);
        }
        if self.email.trim().is_empty() {
            issues.push(RegistrationIssue::MissingEmail);
        }

        let pw = &self.password;
        if pw.chars().count() < 8 {
            issues.push(RegistrationIssue::PasswordTooShort);
        }
        if !pw.chars().any(|c| c.is_ascii_lowercase()) {
            issues.push(RegistrationIssue::PasswordNeedsLowercase);
        }
        if !pw.chars().any(|c| c.is_ascii_uppercase()) {
            issues.push(RegistrationIssue::PasswordNeedsUppercase);
        }
        if !pw.chars().any(|c| c.is_ascii_digit()) {
            issues.push(RegistrationIssue::PasswordNeedsDigit);
        }
        if !pw.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
            issues.push(RegistrationIssue::PasswordNeedsSpecial);
        }
        if pw.is_empty() || *pw != self.confirm_password {
            issues.push(RegistrationIssue::PasswordMismatch);
        }
        issues
    }
}
