use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use sonara_core::ai::{AiError, CompletionClient, extract_json_object};
use sonara_core::models::history::ClientHistory;
use sonara_core::models::note::{
    GenerationStrategy, NoteTransaction, ProcessingMode, StructuredNote, TransactionStatus,
};
use sonara_core::models::usage::TokenUsage;

use crate::complexity::{ComplexityWeights, score_complexity};
use crate::context::{build_record_block, compose_note_input};

const NOTE_SYSTEM_PROMPT: &str = "\
You draft structured clinical session notes from a de-identified therapy \
transcript. Return ONLY a JSON object with the string fields summary, \
presenting_issues, interventions, client_response and plan. Be factual and \
concise; do not invent events that are not in the transcript.";

const SUMMARY_SYSTEM_PROMPT: &str = "\
Summarize the following de-identified client record for a treating \
clinician. Preserve diagnoses, risk factors, treatment history and current \
goals. Return plain text, at most a few paragraphs.";

/// Marker prefix on placeholder notes so a degraded result can never be
/// mistaken for a generated one.
pub const PLACEHOLDER_MARKER: &str = "[AUTOMATED NOTE UNAVAILABLE]";

/// Tunables for routing and the hybrid summarization pass.
#[derive(Debug, Clone, Copy)]
pub struct NoteConfig {
    /// Complexity at or above which standard-mode requests go hybrid.
    pub hybrid_complexity_cutoff: f64,
    /// Record size (chars) above which hybrid compresses it first.
    pub summary_threshold_chars: usize,
    pub weights: ComplexityWeights,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            hybrid_complexity_cutoff: 0.7,
            summary_threshold_chars: 10_000,
            weights: ComplexityWeights::default(),
        }
    }
}

/// Routing rule: mode and complexity select the strategy.
pub fn select_strategy(
    mode: ProcessingMode,
    complexity: f64,
    hybrid_cutoff: f64,
) -> GenerationStrategy {
    match mode {
        ProcessingMode::Consultation => GenerationStrategy::Consultation,
        ProcessingMode::Premium => GenerationStrategy::Hybrid,
        ProcessingMode::Standard => {
            if complexity >= hybrid_cutoff {
                GenerationStrategy::Hybrid
            } else {
                GenerationStrategy::Single
            }
        }
    }
}

/// The result of one note request.
#[derive(Debug, Clone)]
pub struct NoteOutcome {
    pub note: StructuredNote,
    pub transaction: NoteTransaction,
    pub complexity: f64,
}

struct GeneratedNote {
    note: StructuredNote,
    model_ids: Vec<String>,
    usage: TokenUsage,
    degraded: bool,
}

/// Note orchestrator over two injected providers.
pub struct NoteEngine {
    primary: Arc<dyn CompletionClient>,
    secondary: Arc<dyn CompletionClient>,
    config: NoteConfig,
}

impl NoteEngine {
    pub fn new(primary: Arc<dyn CompletionClient>, secondary: Arc<dyn CompletionClient>) -> Self {
        Self::with_config(primary, secondary, NoteConfig::default())
    }

    pub fn with_config(
        primary: Arc<dyn CompletionClient>,
        secondary: Arc<dyn CompletionClient>,
        config: NoteConfig,
    ) -> Self {
        Self {
            primary,
            secondary,
            config,
        }
    }

    /// Generate a structured note for a de-identified transcript.
    ///
    /// Never fails: a failed strategy falls back to the single pass, and a
    /// failed single pass yields the marked placeholder note.
    pub async fn process_note(
        &self,
        transcript: &str,
        mode: ProcessingMode,
        history: Option<&ClientHistory>,
    ) -> NoteOutcome {
        let complexity = score_complexity(transcript, history, &self.config.weights);
        let strategy = select_strategy(mode, complexity, self.config.hybrid_complexity_cutoff);

        info!(
            ?mode,
            ?strategy,
            complexity,
            transcript_len = transcript.len(),
            "routing note generation"
        );

        let generated = match strategy {
            GenerationStrategy::Single => self.single_pass(transcript, history).await,
            GenerationStrategy::Hybrid => match self.hybrid(transcript, history).await {
                Ok(generated) => Ok(generated),
                Err(e) => {
                    warn!(error = %e, "hybrid strategy failed, falling back to single pass");
                    self.single_pass(transcript, history)
                        .await
                        .map(GeneratedNote::into_degraded)
                }
            },
            GenerationStrategy::Consultation => self.consultation(transcript, history).await,
        };

        let (note, model_ids, usage, status) = match generated {
            Ok(g) => {
                let status = if g.degraded {
                    TransactionStatus::Fallback
                } else {
                    TransactionStatus::Complete
                };
                (g.note, g.model_ids, g.usage, status)
            }
            Err(e) => {
                warn!(error = %e, "note generation failed, returning placeholder note");
                (
                    placeholder_note(),
                    Vec::new(),
                    TokenUsage::default(),
                    TransactionStatus::Failed,
                )
            }
        };

        NoteOutcome {
            note,
            transaction: NoteTransaction {
                id: Uuid::new_v4(),
                strategy,
                model_ids,
                status,
                usage,
                created_at: jiff::Timestamp::now(),
            },
            complexity,
        }
    }

    /// One provider, one pass, full record context inline.
    async fn single_pass(
        &self,
        transcript: &str,
        history: Option<&ClientHistory>,
    ) -> Result<GeneratedNote, AiError> {
        let record_block = history
            .map(|h| build_record_block(&h.record_text))
            .unwrap_or_default();
        let input = compose_note_input(&record_block, transcript);

        let completion = self.primary.complete(NOTE_SYSTEM_PROMPT, &input).await?;
        let note = parse_note_response(&completion.text)?;

        let mut usage = TokenUsage::default();
        if let Some(u) = completion.usage {
            usage.accumulate(u);
        }

        Ok(GeneratedNote {
            note,
            model_ids: vec![self.primary.id().to_string()],
            usage,
            degraded: false,
        })
    }

    /// Summarize-then-analyze: compress an oversized record on the primary
    /// provider, then generate the note on the secondary.
    async fn hybrid(
        &self,
        transcript: &str,
        history: Option<&ClientHistory>,
    ) -> Result<GeneratedNote, AiError> {
        let mut usage = TokenUsage::default();
        let mut model_ids = Vec::new();

        let record_text = match history {
            Some(h) if h.record_text.len() > self.config.summary_threshold_chars => {
                info!(
                    record_len = h.record_text.len(),
                    "record exceeds summary threshold, compressing"
                );
                let completion = self
                    .primary
                    .complete(SUMMARY_SYSTEM_PROMPT, &h.record_text)
                    .await?;
                if let Some(u) = completion.usage {
                    usage.accumulate(u);
                }
                model_ids.push(self.primary.id().to_string());
                completion.text
            }
            Some(h) => h.record_text.clone(),
            None => String::new(),
        };

        let input = compose_note_input(&build_record_block(&record_text), transcript);
        let completion = self.secondary.complete(NOTE_SYSTEM_PROMPT, &input).await?;
        let note = parse_note_response(&completion.text)?;

        if let Some(u) = completion.usage {
            usage.accumulate(u);
        }
        model_ids.push(self.secondary.id().to_string());

        Ok(GeneratedNote {
            note,
            model_ids,
            usage,
            degraded: false,
        })
    }

    /// Run both strategies concurrently and merge section by section. A
    /// single failed branch degrades to the surviving branch; only both
    /// failing is an error.
    async fn consultation(
        &self,
        transcript: &str,
        history: Option<&ClientHistory>,
    ) -> Result<GeneratedNote, AiError> {
        let (single, hybrid) = tokio::join!(
            self.single_pass(transcript, history),
            self.hybrid(transcript, history)
        );

        match (single, hybrid) {
            (Ok(a), Ok(b)) => Ok(merge_generated(a, b)),
            (Ok(a), Err(e)) => {
                warn!(error = %e, "consultation hybrid branch failed, using single branch");
                Ok(a.into_degraded())
            }
            (Err(e), Ok(b)) => {
                warn!(error = %e, "consultation single branch failed, using hybrid branch");
                Ok(b.into_degraded())
            }
            (Err(first), Err(second)) => {
                warn!(error = %first, "both consultation branches failed");
                Err(second)
            }
        }
    }
}

impl GeneratedNote {
    fn into_degraded(mut self) -> Self {
        self.degraded = true;
        self
    }
}

/// Merge two consultation branches: per section, keep whichever text is
/// longer after trimming. Ties keep the single branch. Deliberately a
/// length comparison, not a semantic quality judgment.
fn merge_generated(single: GeneratedNote, hybrid: GeneratedNote) -> GeneratedNote {
    let note = StructuredNote {
        summary: longer(single.note.summary, hybrid.note.summary),
        presenting_issues: longer(single.note.presenting_issues, hybrid.note.presenting_issues),
        interventions: longer(single.note.interventions, hybrid.note.interventions),
        client_response: longer(single.note.client_response, hybrid.note.client_response),
        plan: longer(single.note.plan, hybrid.note.plan),
    };

    let mut model_ids = single.model_ids;
    for id in hybrid.model_ids {
        if !model_ids.contains(&id) {
            model_ids.push(id);
        }
    }

    let mut usage = single.usage;
    usage.accumulate(hybrid.usage);

    GeneratedNote {
        note,
        model_ids,
        usage,
        degraded: false,
    }
}

fn longer(first: String, second: String) -> String {
    if second.trim().len() > first.trim().len() {
        second
    } else {
        first
    }
}

fn placeholder_note() -> StructuredNote {
    StructuredNote {
        summary: format!(
            "{PLACEHOLDER_MARKER} Note generation did not complete for this session; \
             the treating clinician must draft this note manually."
        ),
        presenting_issues: String::new(),
        interventions: String::new(),
        client_response: String::new(),
        plan: String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct RawNote {
    summary: String,
    presenting_issues: String,
    interventions: String,
    client_response: String,
    plan: String,
}

/// Parse a model response into a [`StructuredNote`].
fn parse_note_response(text: &str) -> Result<StructuredNote, AiError> {
    let body = extract_json_object(text)
        .ok_or_else(|| AiError::ResponseParse(format!("no JSON object in note response: {text}")))?;

    let raw: RawNote = serde_json::from_str(body).map_err(|e| {
        AiError::SchemaViolation(format!("failed to parse StructuredNote: {e}. Response: {text}"))
    })?;

    Ok(StructuredNote {
        summary: raw.summary,
        presenting_issues: raw.presenting_issues,
        interventions: raw.interventions,
        client_response: raw.client_response,
        plan: raw.plan,
    })
}
