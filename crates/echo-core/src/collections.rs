//! Document collection conventions.
//!
//! Pure string functions. No storage dependency; these define the canonical
//! layout of documents in the Dr. Echo document store.

pub const REPORTS: &str = "reports";

pub const REPORTS_MANUAL: &str = "reports_manual";

pub const PATIENTS: &str = "patients";

pub const USERS: &str = "users";

pub const CHAT_SESSIONS: &str = "chatSessions";

pub const COUNTERS: &str = "counters";

/// Sub-collection holding the messages of one chat session.
pub fn chat_messages(session_id: &str) -> String {
    format!("{CHAT_SESSIONS}/{session_id}/messages")
}

/// Document ID of a sequential counter, e.g. `reports_echo_counter`.
pub fn counter_doc(counter: &str) -> String {
    format!("{counter}_counter")
}

/// Object key of a document when the store is backed by a bucket.
pub fn document_key(collection: &str, id: &str) -> String {
    format!("{collection}/{id}.json")
}
