use async_trait::async_trait;

use crate::pipeline::agent::RoleAgent;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::{Phase, Stage};
use crate::pipeline::state::{SharedState, StateKey};

/// 财务建模师 - 基于市场与竞品结论给出三年方向性模型
#[derive(Default)]
pub struct FinancialModeler;

#[async_trait]
impl Stage for FinancialModeler {
    fn phase(&self) -> Phase {
        Phase::Finance
    }

    fn owned_key(&self) -> StateKey {
        StateKey::Financials
    }

    fn agent(&self) -> RoleAgent {
        RoleAgent::new(
            "Financial Modeler",
            "Build financial projections for the idea",
            "Experienced startup finance consultant.",
        )
    }

    async fn build_context(&self, state: &SharedState, _context: &PipelineContext) -> String {
        format!("{}\n\n{}", state.market(), state.competitors())
    }

    fn task(&self, _state: &SharedState) -> String {
        "Draft 3-year directional model with assumptions: target customer, pricing, CAC, channels, Y1–Y3 revenue/COGS/gross margin, OPEX buckets, break-even path, top risks. Show a small table and a sensitivity note.".to_string()
    }
}
