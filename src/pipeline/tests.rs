use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::hints::{HintProvider, HintSources, PlaceholderHints, SearchFn};
use crate::llm::client::{CompletionBackend, LLMClient, SYNTHETIC_TAG, utils::truncate_chars};
use crate::pipeline::stages::{CompetitorAnalyst, MarketResearcher};
use crate::pipeline::{
    Mode, Phase, PipelineContext, SharedState, Stage, StateError, StateKey, ValidationPipeline,
};

/// 回显prompt前20个字符的后端
struct EchoBackend;

#[async_trait]
impl CompletionBackend for EchoBackend {
    fn describe(&self) -> String {
        "echo".to_string()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(truncate_chars(prompt, 20).to_string())
    }
}

/// 记录每次请求条数上限的线索提供者
#[derive(Default)]
struct RecordingHints {
    limits: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl HintProvider for RecordingHints {
    fn name(&self) -> &str {
        "recording"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        self.limits.lock().unwrap().push((query.to_string(), limit));
        Ok((1..=limit).map(|i| format!("hint-{}", i)).collect())
    }
}

fn fixed_hints() -> Arc<dyn HintProvider> {
    Arc::new(SearchFn::positional("fixed", |_, _| {
        Ok((1..=5).map(|i| format!("hint-{}", i)).collect())
    }))
}

fn echo_pipeline(web: Arc<dyn HintProvider>, forum: Arc<dyn HintProvider>) -> ValidationPipeline {
    let context = PipelineContext::with_parts(
        LLMClient::with_backend(Arc::new(EchoBackend)),
        HintSources { web, forum },
    );
    ValidationPipeline::new(context)
}

#[test]
fn test_mode_normalization() {
    assert_eq!(Mode::normalize("DEEP"), Mode::Deep);
    assert_eq!(Mode::normalize("deep"), Mode::Deep);
    assert_eq!(Mode::normalize("Deep"), Mode::Deep);
    assert_eq!(Mode::normalize("bogus"), Mode::Fast);
    assert_eq!(Mode::normalize("fast"), Mode::Fast);
    assert_eq!(Mode::normalize(""), Mode::Fast);
    assert_eq!(Mode::normalize("deeper"), Mode::Fast);
}

#[test]
fn test_hint_limits() {
    assert_eq!(Mode::Fast.hint_limit(), 5);
    assert_eq!(Mode::Deep.hint_limit(), 12);
}

#[test]
fn test_phase_sequence_is_linear() {
    let mut phase = Phase::Market;
    let mut visited = vec![phase];
    while phase != Phase::Done {
        phase = phase.next();
        visited.push(phase);
    }
    assert_eq!(
        visited,
        vec![
            Phase::Market,
            Phase::Competitor,
            Phase::Finance,
            Phase::Report,
            Phase::Done
        ]
    );
    assert_eq!(Phase::Done.next(), Phase::Done);
}

#[test]
fn test_state_rejects_second_write() {
    let mut state = SharedState::new("idea", Mode::Fast);
    state.record(StateKey::Market, "first".to_string()).unwrap();

    let err = state.record(StateKey::Market, "second".to_string());

    assert_eq!(err, Err(StateError::AlreadyWritten(StateKey::Market)));
    assert_eq!(state.market(), "first");
}

#[test]
fn test_fresh_state_is_empty() {
    let state = SharedState::new("idea", Mode::Deep);
    assert_eq!(state.idea(), "idea");
    assert_eq!(state.mode(), Mode::Deep);
    assert!(state.market().is_empty());
    assert!(state.report().is_empty());
    assert!(!state.is_complete());
}

#[tokio::test]
async fn test_offline_run_is_total() {
    let pipeline = ValidationPipeline::new(PipelineContext::offline());

    for mode in ["fast", "deep", "anything-else"] {
        let state = pipeline.run("pet-sitting marketplace", mode).await;

        assert!(state.is_complete());
        for key in [
            StateKey::Market,
            StateKey::Competitors,
            StateKey::Financials,
            StateKey::Report,
        ] {
            assert!(state.get(key).starts_with(SYNTHETIC_TAG));
        }
    }
}

#[tokio::test]
async fn test_offline_run_is_deterministic() {
    let pipeline = ValidationPipeline::new(PipelineContext::offline());

    let first = pipeline.run("ai bookkeeping", "deep").await;
    let second = pipeline.run("ai bookkeeping", "deep").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_run_normalizes_mode() {
    let pipeline = ValidationPipeline::new(PipelineContext::offline());

    assert_eq!(pipeline.run("x", "DEEP").await.mode(), Mode::Deep);
    assert_eq!(pipeline.run("x", "bogus").await.mode(), Mode::Fast);
}

#[tokio::test]
async fn test_sequencing_scenario() {
    let pipeline = echo_pipeline(fixed_hints(), fixed_hints());

    let run = pipeline
        .run_traced("pet-sitting marketplace", "fast")
        .await;
    let state = &run.state;

    assert_eq!(state.market(), "You are Market Resea");
    assert_eq!(state.competitors(), "You are Competitor A");
    assert_eq!(state.financials(), "You are Financial Mo");
    assert_eq!(state.report(), "You are Report Gener");

    let market = run.stage(Phase::Market).unwrap();
    assert!(market.context.contains("Web snippets:\nhint-1"));
    assert!(market.context.contains("Forum discussions:\nhint-1"));

    let competitor = run.stage(Phase::Competitor).unwrap();
    assert!(competitor.context.contains(state.market()));
    assert!(competitor.context.contains("Hints:\n- hint-1"));

    let finance = run.stage(Phase::Finance).unwrap();
    assert_eq!(
        finance.context,
        format!("{}\n\n{}", state.market(), state.competitors())
    );

    let report = run.stage(Phase::Report).unwrap();
    assert!(report.context.contains(state.market()));
    assert!(report.context.contains(state.competitors()));
    assert!(report.context.contains(state.financials()));
    assert!(report.context.starts_with("Idea: pet-sitting marketplace"));

    assert_eq!(
        run.trace.iter().map(|o| o.phase).collect::<Vec<_>>(),
        vec![Phase::Market, Phase::Competitor, Phase::Finance, Phase::Report]
    );
}

#[tokio::test]
async fn test_market_is_unaffected_by_later_stages() {
    let pipeline = echo_pipeline(fixed_hints(), fixed_hints());
    let fresh = SharedState::new("pet-sitting marketplace", Mode::Fast);

    let market_only = MarketResearcher.execute(&fresh, pipeline.context()).await;
    let full = pipeline.run("pet-sitting marketplace", "fast").await;

    assert_eq!(market_only.key, StateKey::Market);
    assert_eq!(market_only.text, full.market());
}

#[tokio::test]
async fn test_stage_does_not_mutate_input_state() {
    let pipeline = echo_pipeline(fixed_hints(), fixed_hints());
    let state = SharedState::new("pet-sitting marketplace", Mode::Fast);
    let before = state.clone();

    let _ = CompetitorAnalyst.execute(&state, pipeline.context()).await;

    assert_eq!(state, before);
}

#[tokio::test]
async fn test_deep_requests_more_hints_than_fast() {
    let web = Arc::new(RecordingHints::default());
    let forum = Arc::new(RecordingHints::default());
    let pipeline = echo_pipeline(web.clone(), forum.clone());

    pipeline.run("meal kits", "fast").await;
    pipeline.run("meal kits", "deep").await;

    let web_limits = web.limits.lock().unwrap().clone();
    assert_eq!(
        web_limits,
        vec![
            ("meal kits".to_string(), 5),
            ("meal kits competitors".to_string(), 5),
            ("meal kits".to_string(), 12),
            ("meal kits competitors".to_string(), 12),
        ]
    );
    let forum_limits = forum.limits.lock().unwrap().clone();
    assert_eq!(
        forum_limits,
        vec![("meal kits".to_string(), 5), ("meal kits".to_string(), 12)]
    );
}

#[tokio::test]
async fn test_hint_signature_variants_never_abort_stage() {
    let unbounded: Arc<dyn HintProvider> = Arc::new(SearchFn::unbounded("query-only", |q| {
        Ok((0..50).map(|i| format!("{}-{}", q, i)).collect())
    }));
    let positional: Arc<dyn HintProvider> = Arc::new(SearchFn::positional("positional", |q, n| {
        Ok((0..n).map(|i| format!("{}-{}", q, i)).collect())
    }));
    let raising: Arc<dyn HintProvider> = Arc::new(SearchFn::positional("raising", |_, _| {
        Err(anyhow!("unexpected keyword argument 'limit'"))
    }));

    for provider in [unbounded, positional, raising] {
        let pipeline = echo_pipeline(provider.clone(), provider);
        let run = pipeline.run_traced("tutoring", "fast").await;

        assert!(run.state.is_complete());
        let market = run.stage(Phase::Market).unwrap();
        // 标题行以外的线索条数不超过上限
        let web_section = market
            .context
            .split("\n\nForum discussions:")
            .next()
            .unwrap();
        assert!(web_section.lines().count() - 1 <= 5);
    }
}

#[tokio::test]
async fn test_placeholder_hints_reach_market_context() {
    let pipeline = echo_pipeline(
        Arc::new(PlaceholderHints::web()),
        Arc::new(PlaceholderHints::forum()),
    );

    let run = pipeline.run_traced("drone delivery", "deep").await;
    let market = run.stage(Phase::Market).unwrap();

    assert!(market
        .context
        .contains("(hint) Search result for: drone delivery [12]"));
    assert!(market
        .context
        .contains("(HN) Possibly related thread: drone delivery #12"));
}
