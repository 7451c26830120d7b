use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use sonara_core::ai::{AiError, Completion, CompletionClient};
use sonara_core::models::history::ClientHistory;
use sonara_core::models::note::{GenerationStrategy, ProcessingMode, TransactionStatus};
use sonara_notes::engine::PLACEHOLDER_MARKER;
use sonara_notes::{ComplexityWeights, NoteEngine, score_complexity, select_strategy};

fn note_json(summary: &str, plan: &str) -> String {
    serde_json::json!({
        "summary": summary,
        "presenting_issues": "low mood reported",
        "interventions": "grounding exercise",
        "client_response": "engaged",
        "plan": plan,
    })
    .to_string()
}

/// Canned provider that counts calls and remembers the system prompts it saw.
struct CannedClient {
    id: String,
    response: String,
    calls: AtomicUsize,
    system_prompts: std::sync::Mutex<Vec<String>>,
}

impl CannedClient {
    fn new(id: &str, response: String) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            response,
            calls: AtomicUsize::new(0),
            system_prompts: std::sync::Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for CannedClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(&self, system: &str, _user: &str) -> Result<Completion, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.system_prompts.lock().unwrap().push(system.to_string());
        Ok(Completion {
            text: self.response.clone(),
            usage: None,
        })
    }
}

struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    fn id(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<Completion, AiError> {
        Err(AiError::Invocation("timeout".into()))
    }
}

// ── Routing table ────────────────────────────────────────────────────────────

#[test]
fn standard_mode_below_cutoff_selects_single() {
    assert_eq!(
        select_strategy(ProcessingMode::Standard, 0.3, 0.7),
        GenerationStrategy::Single
    );
}

#[test]
fn standard_mode_at_or_above_cutoff_selects_hybrid() {
    assert_eq!(
        select_strategy(ProcessingMode::Standard, 0.8, 0.7),
        GenerationStrategy::Hybrid
    );
    assert_eq!(
        select_strategy(ProcessingMode::Standard, 0.7, 0.7),
        GenerationStrategy::Hybrid
    );
}

#[test]
fn premium_mode_always_selects_hybrid() {
    assert_eq!(
        select_strategy(ProcessingMode::Premium, 0.1, 0.7),
        GenerationStrategy::Hybrid
    );
}

#[test]
fn consultation_mode_always_selects_consultation() {
    for complexity in [0.0, 0.5, 1.0] {
        assert_eq!(
            select_strategy(ProcessingMode::Consultation, complexity, 0.7),
            GenerationStrategy::Consultation
        );
    }
}

// ── Complexity ───────────────────────────────────────────────────────────────

#[test]
fn history_complexity_weights_and_caps() {
    let weights = ComplexityWeights::default();
    let history = ClientHistory {
        session_count: 25,
        record_text: "x".repeat(100_000),
        risk_factors: vec!["prior hospitalization".into()],
    };
    // 0.5*0.4 + 0.5*0.4 + 0.2*0.2 = 0.44
    let score = score_complexity("transcript", Some(&history), &weights);
    assert!((score - 0.44).abs() < 1e-9);
}

#[test]
fn history_terms_cap_at_one() {
    let weights = ComplexityWeights::default();
    let history = ClientHistory {
        session_count: 500,
        record_text: "x".repeat(1_000_000),
        risk_factors: (0..20).map(|i| format!("factor {i}")).collect(),
    };
    let score = score_complexity("t", Some(&history), &weights);
    assert!((score - 1.0).abs() < 1e-9);
}

#[test]
fn transcript_estimate_counts_risk_keywords() {
    let weights = ComplexityWeights::default();
    let plain = score_complexity("a short calm check-in", None, &weights);
    let loaded = score_complexity(
        "client feels worthless and overwhelmed and is giving up",
        None,
        &weights,
    );
    assert!(loaded > plain);
}

// ── Strategy execution ───────────────────────────────────────────────────────

#[tokio::test]
async fn standard_low_complexity_only_calls_primary() {
    let primary = CannedClient::new("primary", note_json("summary text", "plan text"));
    let secondary = CannedClient::new("secondary", note_json("other", "other"));
    let engine = NoteEngine::new(primary.clone(), secondary.clone());

    let outcome = engine
        .process_note("a short calm check-in", ProcessingMode::Standard, None)
        .await;

    assert_eq!(outcome.transaction.strategy, GenerationStrategy::Single);
    assert_eq!(outcome.transaction.status, TransactionStatus::Complete);
    assert_eq!(outcome.transaction.model_ids, vec!["primary".to_string()]);
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 0);
}

#[tokio::test]
async fn premium_mode_generates_on_the_secondary_provider() {
    let primary = CannedClient::new("primary", note_json("p", "p"));
    let secondary = CannedClient::new("secondary", note_json("from secondary", "plan"));
    let engine = NoteEngine::new(primary.clone(), secondary.clone());

    let outcome = engine
        .process_note("short note", ProcessingMode::Premium, None)
        .await;

    assert_eq!(outcome.transaction.strategy, GenerationStrategy::Hybrid);
    assert_eq!(outcome.note.summary, "from secondary");
    assert_eq!(primary.call_count(), 0);
    assert_eq!(secondary.call_count(), 1);
}

#[tokio::test]
async fn oversized_record_triggers_a_summary_pass() {
    let primary = CannedClient::new("primary", note_json("p", "p"));
    let secondary = CannedClient::new("secondary", note_json("s", "s"));
    let engine = NoteEngine::new(primary.clone(), secondary.clone());

    let history = ClientHistory {
        session_count: 10,
        record_text: "history ".repeat(2_000),
        risk_factors: vec![],
    };
    let outcome = engine
        .process_note("short note", ProcessingMode::Premium, Some(&history))
        .await;

    // Primary compressed the record, secondary generated the note.
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 1);
    assert_eq!(
        outcome.transaction.model_ids,
        vec!["primary".to_string(), "secondary".to_string()]
    );
    let prompts = primary.system_prompts.lock().unwrap();
    assert!(prompts[0].contains("Summarize"));
}

#[tokio::test]
async fn consultation_merges_sections_by_length() {
    let primary = CannedClient::new(
        "primary",
        note_json("a considerably longer summary from the single pass", "brief"),
    );
    let secondary = CannedClient::new(
        "secondary",
        note_json("short", "a considerably longer plan from the hybrid branch"),
    );
    let engine = NoteEngine::new(primary.clone(), secondary.clone());

    let outcome = engine
        .process_note("short note", ProcessingMode::Consultation, None)
        .await;

    assert_eq!(outcome.transaction.strategy, GenerationStrategy::Consultation);
    assert_eq!(outcome.transaction.status, TransactionStatus::Complete);
    assert_eq!(
        outcome.note.summary,
        "a considerably longer summary from the single pass"
    );
    assert_eq!(
        outcome.note.plan,
        "a considerably longer plan from the hybrid branch"
    );
    assert_eq!(
        outcome.transaction.model_ids,
        vec!["primary".to_string(), "secondary".to_string()]
    );
}

#[tokio::test]
async fn consultation_survives_one_failed_branch() {
    let primary = CannedClient::new("primary", note_json("single branch summary", "plan"));
    let engine = NoteEngine::new(primary.clone(), Arc::new(FailingClient));

    let outcome = engine
        .process_note("short note", ProcessingMode::Consultation, None)
        .await;

    assert_eq!(outcome.transaction.status, TransactionStatus::Fallback);
    assert_eq!(outcome.note.summary, "single branch summary");
}

#[tokio::test]
async fn failed_hybrid_falls_back_to_single_pass() {
    let primary = CannedClient::new("primary", note_json("fallback summary", "plan"));
    let engine = NoteEngine::new(primary.clone(), Arc::new(FailingClient));

    let outcome = engine
        .process_note("short note", ProcessingMode::Premium, None)
        .await;

    assert_eq!(outcome.transaction.status, TransactionStatus::Fallback);
    assert_eq!(outcome.note.summary, "fallback summary");
    assert_eq!(primary.call_count(), 1);
}

#[tokio::test]
async fn total_failure_returns_the_marked_placeholder() {
    let engine = NoteEngine::new(Arc::new(FailingClient), Arc::new(FailingClient));

    let outcome = engine
        .process_note("short note", ProcessingMode::Standard, None)
        .await;

    assert_eq!(outcome.transaction.status, TransactionStatus::Failed);
    assert!(outcome.note.summary.starts_with(PLACEHOLDER_MARKER));
    assert!(outcome.transaction.model_ids.is_empty());
}
