//! echo-storage
//!
//! The document store behind Dr. Echo: a key/value store of JSON documents
//! addressed by collection and ID, with merge writes, batched writes and
//! counters for sequential IDs. Backed by S3 in production and by memory in
//! tests and local runs.

pub mod counter;
pub mod documents;
pub mod error;
pub mod memory;
pub mod merge;
pub mod objects;
pub mod s3;
pub mod store;
