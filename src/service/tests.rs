use std::sync::Arc;

use crate::insight::fallback_metrics;
use crate::llm::client::SYNTHETIC_TAG;
use crate::pipeline::{Mode, PipelineContext, ValidationPipeline};
use crate::service::deck::{DEFAULT_IDEA, deck_prompt};
use crate::service::{PitchDeck, ServiceError, ValidationService};
use crate::store::{LastReportSlot, ReportStore};

fn offline_service() -> ValidationService {
    ValidationService::with_parts(
        ValidationPipeline::new(PipelineContext::offline()),
        Arc::new(LastReportSlot::new()),
    )
}

#[tokio::test]
async fn test_validate_rejects_blank_idea() {
    let service = offline_service();

    let result = service.validate("   ", "fast").await;

    assert_eq!(result.unwrap_err(), ServiceError::EmptyIdea);
    assert!(service.store().latest().is_none());
}

#[tokio::test]
async fn test_validate_fast_offline() {
    let service = offline_service();

    let report = service.validate("  pet-sitting marketplace ", "fast").await.unwrap();

    assert_eq!(report.idea, "pet-sitting marketplace");
    assert_eq!(report.mode, Mode::Fast);
    assert!(report.report_text.starts_with(SYNTHETIC_TAG));
    assert!(report.sections.market.starts_with(SYNTHETIC_TAG));
    assert_eq!(report.summary, fallback_metrics("pet-sitting marketplace"));
    assert!(report.deep_json.is_none());
}

#[tokio::test]
async fn test_validate_deep_includes_sections() {
    let service = offline_service();

    let report = service.validate("drone delivery", "Deep").await.unwrap();

    assert_eq!(report.mode, Mode::Deep);
    let deep = report.deep_json.unwrap();
    assert_eq!(deep.market.sections[0].title, "Summary");
}

#[tokio::test]
async fn test_validate_stores_latest_report() {
    let service = offline_service();

    service.validate("first", "fast").await.unwrap();
    let second = service.validate("second", "fast").await.unwrap();

    let latest = service.store().latest().unwrap();
    assert_eq!(latest.run_id, second.run_id);
    assert_eq!(latest.idea, "second");
}

#[tokio::test]
async fn test_report_serializes_flat_summary() {
    let service = offline_service();
    let report = service.validate("ai bookkeeping", "fast").await.unwrap();

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["idea"], "ai bookkeeping");
    assert_eq!(value["mode"], "fast");
    assert!(value["problem"].is_string());
    assert!(value["market"]["TAM"].is_number());
    assert!(value["sections"]["financials"].is_string());
    assert!(value["deep_json"].is_null());
}

#[tokio::test]
async fn test_pitch_deck_without_report_uses_default_idea() {
    let deck = offline_service().pitch_deck().await;

    assert_eq!(deck.title, format!("Startup Pitch Deck: {}", DEFAULT_IDEA));
    assert!(!deck.slides.is_empty());
}

#[tokio::test]
async fn test_pitch_deck_uses_latest_report() {
    let service = offline_service();
    service.validate("meal kits", "fast").await.unwrap();

    let deck = service.pitch_deck().await;

    assert_eq!(deck.title, "Startup Pitch Deck: meal kits");
}

#[test]
fn test_deck_prompt_embeds_findings() {
    let service_report = crate::service::ValidationReport::new(
        "meal kits",
        Mode::Fast,
        fallback_metrics("meal kits"),
        "narrative ".repeat(200),
        Default::default(),
        None,
    );

    let prompt = deck_prompt(Some(&service_report));

    assert!(prompt.contains("Idea: meal kits"));
    assert!(prompt.contains("- Trends: Agentic workflows, LLM ops"));
    assert!(prompt.contains("12. Vision"));
    // 叙述被截断
    assert!(!prompt.contains(&"narrative ".repeat(81)));
}

#[test]
fn test_pitch_deck_parse_blocks() {
    let content = "Hook\n1. Pets deserve better\n2. Owners travel more\n\n\nProblem\n- Trust gap\n\n";

    let deck = PitchDeck::parse("pets", content);

    assert_eq!(deck.slides.len(), 2);
    assert_eq!(deck.slides[0].title, "Hook");
    assert_eq!(deck.slides[0].bullets.len(), 2);
    assert_eq!(deck.slides[1].bullets, vec!["- Trust gap"]);
}

#[test]
fn test_pitch_deck_markdown_renumbers() {
    let deck = PitchDeck::parse("pets", "Hook\n1. Pets deserve better\n- Owners travel more");

    let markdown = deck.to_markdown();

    assert!(markdown.starts_with("# Startup Pitch Deck: pets\n"));
    assert!(markdown.contains("## Hook\n\n1. Pets deserve better\n2. Owners travel more\n"));
}
