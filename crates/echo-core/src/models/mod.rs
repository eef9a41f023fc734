pub mod chat;
pub mod patient;
pub mod record;
pub mod report;
pub mod user;
