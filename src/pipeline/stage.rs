use async_trait::async_trait;
use serde::Serialize;

use crate::pipeline::agent::RoleAgent;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::state::{SharedState, StateKey};

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Market,
    Competitor,
    Finance,
    Report,
    Done,
}

impl Phase {
    /// 固定的线性后继
    pub fn next(self) -> Phase {
        match self {
            Phase::Market => Phase::Competitor,
            Phase::Competitor => Phase::Finance,
            Phase::Finance => Phase::Report,
            Phase::Report | Phase::Done => Phase::Done,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Market => write!(f, "market"),
            Phase::Competitor => write!(f, "competitor"),
            Phase::Finance => write!(f, "finance"),
            Phase::Report => write!(f, "report"),
            Phase::Done => write!(f, "done"),
        }
    }
}

/// 单个阶段的产出，由编排器合并进共享状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageOutput {
    pub phase: Phase,
    #[serde(skip)]
    pub key: StateKey,
    /// 提交给智能体的上下文
    pub context: String,
    /// 智能体输出
    pub text: String,
}

/// 阶段trait - 各阶段只声明读取哪些上下文、任务描述与写入的键
#[async_trait]
pub trait Stage: Send + Sync {
    fn phase(&self) -> Phase;

    /// 本阶段独占写入的状态键
    fn owned_key(&self) -> StateKey;

    /// 阶段智能体的固定身份
    fn agent(&self) -> RoleAgent;

    /// 组装上下文，可选地调用检索线索
    async fn build_context(&self, state: &SharedState, context: &PipelineContext) -> String;

    fn task(&self, state: &SharedState) -> String;

    /// 默认实现的execute方法，不修改传入的状态
    async fn execute(&self, state: &SharedState, context: &PipelineContext) -> StageOutput {
        let stage_context = self.build_context(state, context).await;
        let task = self.task(state);
        let text = self
            .agent()
            .run(&context.llm_client, &task, &stage_context, state.mode())
            .await;

        StageOutput {
            phase: self.phase(),
            key: self.owned_key(),
            context: stage_context,
            text,
        }
    }
}
