//! Core types for structdb
//!
//! This crate defines what every other crate in the workspace agrees on:
//! - [`Error`] / [`Result`]: the shared error taxonomy
//! - [`Retriever`] / [`Mutator`]: the transactional point-access interface
//!   that storage engines implement and structures consume

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{Mutator, Retriever};
