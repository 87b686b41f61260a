pub mod config;
pub mod csv;
pub mod json;

pub use config::{ExportConfig, ExportConfigBuilder, ExportSelection, Separator};
pub use csv::{format_profile, write_profile, write_profile_file};
pub use json::{write_summaries, DriftSummary};
