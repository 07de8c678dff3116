use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::llm::client::{LLMClient, utils::strip_code_fence};
use crate::pipeline::state::SharedState;

/// 兜底时每段保留的最大行数
const FALLBACK_BULLETS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionGroup {
    pub sections: Vec<Section>,
}

/// 深度模式下各阶段文本的标题与要点
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeepSections {
    pub market: SectionGroup,
    pub competitors: SectionGroup,
    pub financials: SectionGroup,
}

impl DeepSections {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(strip_code_fence(raw)).map_err(|e| anyhow!("bad sections: {}", e))
    }

    /// 每段文本整理为单个Summary小节
    pub fn from_plain_text(state: &SharedState) -> Self {
        Self {
            market: plain_group(state.market()),
            competitors: plain_group(state.competitors()),
            financials: plain_group(state.financials()),
        }
    }
}

fn plain_group(text: &str) -> SectionGroup {
    let bullets: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(FALLBACK_BULLETS)
        .map(str::to_string)
        .collect();

    if bullets.is_empty() {
        return SectionGroup::default();
    }
    SectionGroup {
        sections: vec![Section {
            title: "Summary".to_string(),
            bullets,
        }],
    }
}

fn sections_prompt(state: &SharedState) -> String {
    format!(
        r#"You are a precise information extractor.
Convert the AGENT TEXT into STRICT JSON that captures headings and bullet points.

RETURN ONLY JSON (no prose, no backticks) matching this schema:

{{
  "market": {{ "sections": [{{ "title": string, "bullets": string[] }}] }},
  "competitors": {{ "sections": [{{ "title": string, "bullets": string[] }}] }},
  "financials": {{ "sections": [{{ "title": string, "bullets": string[] }}] }}
}}

AGENT TEXT:
[MARKET]
{market}

[COMPETITORS]
{competitors}

[FINANCIALS]
{financials}
"#,
        market = state.market(),
        competitors = state.competitors(),
        financials = state.financials(),
    )
}

/// 抽取各阶段文本的结构，失败时按行拆分为单个小节
pub async fn extract_sections(client: &LLMClient, state: &SharedState) -> DeepSections {
    if state.market().is_empty() && state.competitors().is_empty() && state.financials().is_empty()
    {
        return DeepSections::default();
    }

    let raw = client.complete(&sections_prompt(state)).await;
    DeepSections::parse(&raw).unwrap_or_else(|e| {
        tracing::info!("小节结构解析失败，按行拆分: {}", e);
        DeepSections::from_plain_text(state)
    })
}
