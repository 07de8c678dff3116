//! 验证服务 - 在流水线之外补齐输入校验、结构化结论与结果存储

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::insight::{DeepSections, ValidationSummary, extract_sections, summarize};
use crate::pipeline::{Mode, PipelineContext, ValidationPipeline};
use crate::store::{LastReportSlot, ReportStore};

pub mod deck;

pub use deck::{PitchDeck, Slide};

#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    #[error("Please enter a startup idea.")]
    EmptyIdea,
}

/// 各阶段的原始文本
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StageSections {
    pub market: String,
    pub competitors: String,
    pub financials: String,
}

/// 一次验证的完整结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub idea: String,
    pub mode: Mode,
    #[serde(flatten)]
    pub summary: ValidationSummary,
    pub report_text: String,
    pub sections: StageSections,
    /// 仅深度模式提供
    pub deep_json: Option<DeepSections>,
}

impl ValidationReport {
    pub fn new(
        idea: impl Into<String>,
        mode: Mode,
        summary: ValidationSummary,
        report_text: String,
        sections: StageSections,
        deep_json: Option<DeepSections>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            idea: idea.into(),
            mode,
            summary,
            report_text,
            sections,
            deep_json,
        }
    }
}

pub struct ValidationService {
    pipeline: ValidationPipeline,
    store: Arc<dyn ReportStore>,
}

impl ValidationService {
    /// 根据配置创建服务，使用进程内单槽存储
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            ValidationPipeline::new(PipelineContext::new(config)),
            Arc::new(LastReportSlot::new()),
        )
    }

    pub fn with_parts(pipeline: ValidationPipeline, store: Arc<dyn ReportStore>) -> Self {
        Self { pipeline, store }
    }

    pub fn store(&self) -> &Arc<dyn ReportStore> {
        &self.store
    }

    /// 验证一个创业想法，并把结果写入存储
    pub async fn validate(&self, idea: &str, mode: &str) -> Result<ValidationReport, ServiceError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(ServiceError::EmptyIdea);
        }

        let state = self.pipeline.run(idea, mode).await;
        let client = &self.pipeline.context().llm_client;

        let summary = summarize(client, &state).await;
        let deep_json = match state.mode() {
            Mode::Deep => Some(extract_sections(client, &state).await),
            Mode::Fast => None,
        };

        let report = ValidationReport::new(
            idea,
            state.mode(),
            summary,
            state.report().to_string(),
            StageSections {
                market: state.market().to_string(),
                competitors: state.competitors().to_string(),
                financials: state.financials().to_string(),
            },
            deep_json,
        );

        self.store.put(report.clone());
        tracing::info!(run_id = %report.run_id, "验证结果已存储");
        Ok(report)
    }

    /// 基于最近一次验证结果生成路演材料，没有结果时生成通用模板
    pub async fn pitch_deck(&self) -> PitchDeck {
        let latest = self.store.latest();
        let prompt = deck::deck_prompt(latest.as_ref());
        let content = self.pipeline.context().llm_client.complete(&prompt).await;
        let idea = latest
            .as_ref()
            .map(|report| report.idea.as_str())
            .unwrap_or(deck::DEFAULT_IDEA);
        PitchDeck::parse(idea, &content)
    }
}

#[cfg(test)]
mod tests;
