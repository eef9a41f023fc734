pub mod chat;
pub mod health;
pub mod ids;
pub mod legacy;
pub mod patients;
pub mod reports;
pub mod templates;
pub mod users;
