//! 把流水线的自由文本整理为结构化结论

pub mod fallback;
pub mod sections;
pub mod summary;

pub use fallback::fallback_metrics;
pub use sections::{DeepSections, Section, SectionGroup, extract_sections};
pub use summary::{MarketSize, Traction, ValidationSummary, summarize};
