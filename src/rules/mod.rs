//! Ordered rule tables used by the normalizer.
//!
//! - `numerals`: number-word folding (runs first).
//! - `functions`: regex phrase rules producing call syntax.
//! - `fillers`: conversational phrases that are dropped.
//! - `operators`: operator/grouping words and their symbols.

pub(crate) mod fillers;
pub(crate) mod functions;
pub(crate) mod numerals;
pub(crate) mod operators;
