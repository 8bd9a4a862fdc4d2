//! Samples, dataset files, and label tables.
//!
//! ## Submodules
//!
//! - [`samples`]: Immutable bipolar samples and the parsed [`Dataset`]
//! - [`parse`]: Fixed-format dataset text parser
//! - [`labels`]: Label → output-code table and exact-match resolver

pub mod labels;
pub mod parse;
pub mod samples;

pub use labels::{Classification, LabelTable};
pub use parse::{load_dataset, parse_dataset};
pub use samples::{Dataset, Sample};
