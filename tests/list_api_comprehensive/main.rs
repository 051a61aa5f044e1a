//! List Test Suite
//!
//! Tests for the transactional list API running on the in-memory engine.
//!
//! ## Modules
//!
//! - `basic_ops`: push, pop, index, set, length, clear
//! - `capability`: read-only views reject every mutation
//! - `corruption`: malformed meta records surface as errors
//! - `edge_cases`: empty inputs, absent lists, index bounds, overflow
//! - `isolation`: prefixes, sibling lists, snapshots, rollback
//! - `concurrency`: conflicting transactions and multi-threaded pushes
//! - `properties`: randomized operations against a `VecDeque` model

#[path = "../common/mod.rs"]
mod common;

mod capability;
mod isolation;
