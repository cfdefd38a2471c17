//! Data structures and algorithms
//!
//! This module contains the domain types and algorithms:
//!
//! - `branch`: Branch names and revision resolution
//! - `checkout`: Snapshot materialization into the working directory
//! - `core`: Shared error taxonomy and file utilities
//! - `graph`: Ancestry and common-ancestor queries over the commit graph
//! - `merge`: Three-way file-set resolution
//! - `objects`: Content-addressed object types (blob, commit)

pub mod branch;
pub mod checkout;
pub mod core;
pub mod graph;
pub mod merge;
pub mod objects;
