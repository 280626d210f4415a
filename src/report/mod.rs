//! Report renderers for classification results.
//!
//! - [`terminal`] — colored summary box and label tables; respects `--verbose` / `--quiet`.
//!
//! JSON output is the serialized [`AggregateResult`](crate::models::AggregateResult)
//! and is written directly by `main`.

pub mod terminal;
