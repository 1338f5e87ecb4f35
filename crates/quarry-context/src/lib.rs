//! # Quarry Context
//!
//! Query contexts bind a [`Criteria`](quarry_core::Criteria) to an execution
//! strategy and answer iteration, existence, counting, projection and
//! aggregation through one contract, the [`Context`] trait.
//!
//! Two variants implement it:
//!
//! - [`NullContext`]: for criteria proven to match nothing. Answers every
//!   operation without touching a store and cannot fail.
//! - [`ActiveContext`]: runs the criteria against a
//!   [`Store`](quarry_core::Store).
//!
//! The [`Resolver`] picks the variant once, up front, and returns a
//! [`QueryContext`] that hides the choice.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! Users should depend on the main `quarry` crate instead.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod active;
pub mod aggregate;
pub mod contract;
/// Static emptiness analysis
pub mod emptiness;
pub mod none;
pub mod query;
pub mod resolver;

pub use active::ActiveContext;
pub use contract::{Context, ContextKind};
pub use emptiness::EmptyReason;
pub use none::NullContext;
pub use query::QueryContext;
pub use resolver::{Resolver, ResolverConfig};
