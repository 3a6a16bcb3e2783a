/// Command-line interface and end-to-end mosaic runs
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and path context
pub mod error;
/// Image decoding, encoding and candidate loading
pub mod image;
/// Progress display while loading candidates
pub mod progress;
