//! # Quarry Core
//!
//! Core types for the Quarry document query layer: values, documents,
//! criteria with their predicate expressions, and the store abstraction.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of Quarry.**
//!
//! Users should depend on the main `quarry` crate instead, which re-exports
//! the stable surface.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod criteria;
pub mod document;
pub mod error;
/// Predicate evaluation
pub mod eval;
/// Filter expression tree
#[allow(missing_docs)]
pub mod expression;
pub mod store;
/// Document field values
#[allow(missing_docs)]
pub mod value;

pub use criteria::{Criteria, Direction, SortKey};
pub use document::Document;
pub use error::{Error, Result};
pub use expression::{CompareOp, Expression, LogicalOp};
pub use store::{MemoryStore, Store};
pub use value::Value;
