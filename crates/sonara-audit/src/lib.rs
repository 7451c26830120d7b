//! sonara-audit
//!
//! Structured audit events and the opaque sink the pipeline reports into.
//! Every de-identified submission to an AI provider is recorded: who asked,
//! for which resource, and whether access was permitted. Storage is an
//! external collaborator — the default sink emits through `tracing` and the
//! platform's subscriber ships the events onward.

pub mod events;

pub use events::{AccessEvent, AuditSink, ModificationEvent, TracingAuditSink};
