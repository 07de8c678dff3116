use async_trait::async_trait;

use crate::hints::gather_hints;
use crate::pipeline::agent::RoleAgent;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::{Phase, Stage};
use crate::pipeline::state::{SharedState, StateKey};

/// 市场调研员 - 估算市场规模梯度与增长驱动因素
#[derive(Default)]
pub struct MarketResearcher;

impl MarketResearcher {
    /// 把两类线索按标题拼接为上下文
    pub fn format_context(web: &[String], forum: &[String]) -> String {
        let mut lines = vec!["Web snippets:".to_string()];
        lines.extend(web.iter().cloned());
        lines.push(String::new());
        lines.push("Forum discussions:".to_string());
        lines.extend(forum.iter().cloned());
        lines.join("\n")
    }
}

#[async_trait]
impl Stage for MarketResearcher {
    fn phase(&self) -> Phase {
        Phase::Market
    }

    fn owned_key(&self) -> StateKey {
        StateKey::Market
    }

    fn agent(&self) -> RoleAgent {
        RoleAgent::new(
            "Market Researcher",
            "Research the market trends and potential",
            "Expert in analyzing industries and opportunities.",
        )
    }

    async fn build_context(&self, state: &SharedState, context: &PipelineContext) -> String {
        let limit = state.mode().hint_limit();
        let web = gather_hints(context.hints.web.as_ref(), state.idea(), limit).await;
        let forum = gather_hints(context.hints.forum.as_ref(), state.idea(), limit).await;
        Self::format_context(&web, &forum)
    }

    fn task(&self, state: &SharedState) -> String {
        format!(
            "Analyze market size and momentum for: {}. Estimate directional TAM/SAM/SOM and name top growth drivers and demand signals.",
            state.idea()
        )
    }
}
