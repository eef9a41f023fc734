//! Human-readable sequential identifiers.
//!
//! Every entity minted by the system carries a short prefix followed by a
//! zero-padded sequence number drawn from a per-kind counter document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Digits in the numeric part of a sequential ID.
pub const ID_PADDING: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum IdKind {
    /// Chat-assisted report (`RA000001`).
    Report,
    /// Manually entered report (`RM000001`).
    ManualReport,
    ChatSession,
    Message,
    User,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Report => "RA",
            IdKind::ManualReport => "RM",
            IdKind::ChatSession => "C",
            IdKind::Message => "M",
            IdKind::User => "U",
        }
    }

    /// Name of the counter this kind draws from.
    pub fn counter(self) -> &'static str {
        match self {
            IdKind::Report => "reports_echo",
            IdKind::ManualReport => "reports_manual",
            IdKind::ChatSession => "chatSessions",
            IdKind::Message => "messages",
            IdKind::User => "users",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IdKind::Report => "report",
            IdKind::ManualReport => "manual-report",
            IdKind::ChatSession => "chat-session",
            IdKind::Message => "message",
            IdKind::User => "user",
        }
    }

    /// Whether `id` was minted for this kind (sequential or fallback form).
    pub fn owns(self, id: &str) -> bool {
        id.strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix('-').or(Some(rest)))
            .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(IdKind::Report),
            "manual-report" => Ok(IdKind::ManualReport),
            "chat-session" => Ok(IdKind::ChatSession),
            "message" => Ok(IdKind::Message),
            "user" => Ok(IdKind::User),
            other => Err(CoreError::UnknownIdKind(other.to_string())),
        }
    }
}

/// `RA` + 7 → `RA000007`.
pub fn sequential_id(kind: IdKind, n: u64) -> String {
    format!("{}{:0width$}", kind.prefix(), n, width = ID_PADDING)
}

/// ID used when the counter transaction cannot complete: `RA-1718000000000`.
pub fn fallback_id(kind: IdKind, epoch_millis: i64) -> String {
    format!("{}-{}", kind.prefix(), epoch_millis)
}
