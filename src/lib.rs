pub mod cli;
pub mod config;
pub mod hints;
pub mod insight;
pub mod llm;
pub mod logging;
pub mod outlet;
pub mod pipeline;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{Mode, SharedState, ValidationPipeline};
pub use service::{ValidationReport, ValidationService};
