//! Technology/version classification of free text against a [`Taxonomy`](crate::taxonomy::Taxonomy).
//!
//! - [`matcher`] — whole-word alias patterns and group matching.
//! - [`resolver`] — picks the technology within a group, then the version
//!   within a technology, falling back to the first declared entry.
//! - [`engine`] — the per-text pipeline combining both.

pub mod engine;
pub mod matcher;
pub mod resolver;
