use async_trait::async_trait;

use crate::hints::gather_hints;
use crate::pipeline::agent::RoleAgent;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::{Phase, Stage};
use crate::pipeline::state::{SharedState, StateKey};

/// 竞品分析师 - 梳理竞品格局、优劣势与空白机会
#[derive(Default)]
pub struct CompetitorAnalyst;

impl CompetitorAnalyst {
    pub fn query(idea: &str) -> String {
        format!("{} competitors", idea)
    }
}

#[async_trait]
impl Stage for CompetitorAnalyst {
    fn phase(&self) -> Phase {
        Phase::Competitor
    }

    fn owned_key(&self) -> StateKey {
        StateKey::Competitors
    }

    fn agent(&self) -> RoleAgent {
        RoleAgent::new(
            "Competitor Analyst",
            "Identify competitors and compare strengths/weaknesses",
            "Specialist in competitor mapping.",
        )
    }

    async fn build_context(&self, state: &SharedState, context: &PipelineContext) -> String {
        let hints = gather_hints(
            context.hints.web.as_ref(),
            &Self::query(state.idea()),
            state.mode().hint_limit(),
        )
        .await;

        let mut stage_context = format!("{}\n\nHints:", state.market());
        for hint in &hints {
            stage_context.push_str("\n- ");
            stage_context.push_str(hint);
        }
        stage_context
    }

    fn task(&self, _state: &SharedState) -> String {
        "Map competitor categories; list 6–10 named competitors. Summarize strengths/weaknesses, pricing posture, and moats. Call out white-space opportunities.".to_string()
    }
}
