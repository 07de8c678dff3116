// 创业想法验证流水线
// market（市场规模、增长驱动）= idea + 网页线索 + 论坛线索
// competitor（竞品格局）= market + 竞品检索线索
// finance（三年财务模型）= market + competitor
// report（验证报告）= idea + market + competitor + finance

pub mod agent;
pub mod context;
pub mod orchestrator;
pub mod stage;
pub mod stages;
pub mod state;

pub use agent::RoleAgent;
pub use context::PipelineContext;
pub use orchestrator::{PipelineRun, ValidationPipeline};
pub use stage::{Phase, Stage, StageOutput};
pub use state::{Mode, SharedState, StateError, StateKey};

#[cfg(test)]
mod tests;
