use tracing::Instrument;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::{Phase, Stage, StageOutput};
use crate::pipeline::stages::{CompetitorAnalyst, FinancialModeler, MarketResearcher, ReportGenerator};
use crate::pipeline::state::{Mode, SharedState};

/// 一次完整运行的结果及各阶段记录
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub state: SharedState,
    pub trace: Vec<StageOutput>,
}

impl PipelineRun {
    pub fn stage(&self, phase: Phase) -> Option<&StageOutput> {
        self.trace.iter().find(|output| output.phase == phase)
    }
}

/// 多智能体验证编排器
///
/// 阶段严格按 market → competitor → finance → report 顺序执行，
/// 每个阶段完成写入后才进入下一阶段。
pub struct ValidationPipeline {
    context: PipelineContext,
    market: MarketResearcher,
    competitor: CompetitorAnalyst,
    finance: FinancialModeler,
    report: ReportGenerator,
}

impl ValidationPipeline {
    pub fn new(context: PipelineContext) -> Self {
        Self {
            context,
            market: MarketResearcher,
            competitor: CompetitorAnalyst,
            finance: FinancialModeler,
            report: ReportGenerator,
        }
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    fn stage_for(&self, phase: Phase) -> Option<&dyn Stage> {
        match phase {
            Phase::Market => Some(&self.market),
            Phase::Competitor => Some(&self.competitor),
            Phase::Finance => Some(&self.finance),
            Phase::Report => Some(&self.report),
            Phase::Done => None,
        }
    }

    /// 执行完整流水线，返回填充完毕的共享状态
    pub async fn run(&self, idea: &str, mode: &str) -> SharedState {
        self.run_traced(idea, mode).await.state
    }

    /// 执行完整流水线，并保留每个阶段的上下文与输出
    pub async fn run_traced(&self, idea: &str, mode: &str) -> PipelineRun {
        let mode = Mode::normalize(mode);
        let mut state = SharedState::new(idea, mode);
        let mut trace = Vec::with_capacity(4);

        tracing::info!(%mode, "🚀 开始执行创业想法验证流程...");

        let mut phase = Phase::Market;
        while let Some(stage) = self.stage_for(phase) {
            let span = tracing::info_span!("stage", phase = %phase);
            let output = stage.execute(&state, &self.context).instrument(span).await;

            if let Err(e) = state.record(output.key, output.text.clone()) {
                tracing::error!("阶段 {} 输出未能写入: {}", phase, e);
            }
            tracing::info!(chars = output.text.chars().count(), "✓ {} 阶段完成", phase);

            trace.push(output);
            phase = phase.next();
        }

        tracing::info!("✓ 验证流程执行完毕");
        PipelineRun { state, trace }
    }
}
