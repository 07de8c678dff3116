use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::insight::fallback::fallback_metrics;
use crate::llm::client::{LLMClient, utils::strip_code_fence};
use crate::pipeline::state::SharedState;

/// 市场规模（十亿美元）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MarketSize {
    #[serde(rename = "TAM")]
    pub tam: f64,
    #[serde(rename = "SAM")]
    pub sam: f64,
    #[serde(rename = "SOM")]
    pub som: f64,
}

/// 牵引力指标
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Traction {
    /// 6–12个月度MRR（千美元）
    #[serde(default)]
    pub monthly_mrr: Vec<f64>,
}

/// 结构化验证结论
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationSummary {
    pub problem: String,
    pub solution: String,
    #[serde(default)]
    pub trends: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    pub market: MarketSize,
    #[serde(default)]
    pub traction: Traction,
}

impl ValidationSummary {
    /// 解析模型返回的JSON，允许外层包裹代码块；列表字段缺失时视为空
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(strip_code_fence(raw))?)
    }
}

fn summary_prompt(state: &SharedState) -> String {
    let schema = serde_json::to_string_pretty(&schemars::schema_for!(ValidationSummary))
        .unwrap_or_default();
    format!(
        r#"You are a startup analyst. Using the EVIDENCE below, return ONLY valid JSON (no prose).

EVIDENCE:
--- MARKET ---
{market}

--- COMPETITORS ---
{competitors}

--- FINANCIALS ---
{financials}

JSON SCHEMA:
{schema}

Rules:
- Provide 6–12 monthly_mrr values in thousands USD, roughly increasing (small plateaus OK).
- Market numbers (TAM/SAM/SOM) are billions USD (floats allowed).
- Output ONLY JSON (no backticks, no explanations)."#,
        market = state.market(),
        competitors = state.competitors(),
        financials = state.financials(),
        schema = schema,
    )
}

/// 生成结构化结论，模型不可用或输出不合法时使用确定性兜底指标
pub async fn summarize(client: &LLMClient, state: &SharedState) -> ValidationSummary {
    let raw = client.complete(&summary_prompt(state)).await;
    match ValidationSummary::parse(&raw) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::info!("结构化结论解析失败，使用兜底指标: {}", e);
            fallback_metrics(state.idea())
        }
    }
}
