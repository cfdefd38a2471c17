//! Content-addressed object types
//!
//! Blobs and commits share one identifier namespace: an object's id is the
//! fingerprint of its stored bytes, so equal content always collapses to a
//! single database entry.

pub mod blob;
pub mod commit;
pub mod digest;
pub mod object_id;

/// Length of an object id in hexadecimal characters
pub const OBJECT_ID_LENGTH: usize = 16;

/// The reserved "no commit yet" branch value
pub const NULL_OBJECT_ID: &str = "0000000000000000";
