use async_trait::async_trait;

use crate::pipeline::agent::RoleAgent;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::{Phase, Stage};
use crate::pipeline::state::{SharedState, StateKey};

/// 报告生成器 - 汇总前序结论，输出固定章节的验证报告
#[derive(Default)]
pub struct ReportGenerator;

#[async_trait]
impl Stage for ReportGenerator {
    fn phase(&self) -> Phase {
        Phase::Report
    }

    fn owned_key(&self) -> StateKey {
        StateKey::Report
    }

    fn agent(&self) -> RoleAgent {
        RoleAgent::new(
            "Report Generator",
            "Summarize findings into a clear report",
            "Professional business strategist.",
        )
    }

    async fn build_context(&self, state: &SharedState, _context: &PipelineContext) -> String {
        format!(
            "Idea: {}\n\n--- Market ---\n{}\n\n--- Competitors ---\n{}\n\n--- Financials ---\n{}\n",
            state.idea(),
            state.market(),
            state.competitors(),
            state.financials()
        )
    }

    fn task(&self, _state: &SharedState) -> String {
        "Produce a structured validation report with sections: Executive Summary, Market Outlook, Competitive Landscape, Business & Financial Outlook, Risks & Mitigations, Final Verdict (High/Medium/Low) with a 2–3 sentence justification. Include a 5-step next-actions roadmap.".to_string()
    }
}
