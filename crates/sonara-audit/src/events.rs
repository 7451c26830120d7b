use serde::Serialize;
use tracing::info;

/// A structured record of a data access, emitted before de-identified text
/// leaves the process.
#[derive(Debug, Clone, Serialize)]
pub struct AccessEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_sub: String,
    pub permitted: bool,
    pub details: Option<serde_json::Value>,
}

impl AccessEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_sub: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_sub: user_sub.into(),
            permitted: true,
            details: None,
        }
    }

    pub fn denied(mut self) -> Self {
        self.permitted = false;
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// A structured record of a data modification.
#[derive(Debug, Clone, Serialize)]
pub struct ModificationEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_sub: String,
}

impl ModificationEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_sub: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_sub: user_sub.into(),
        }
    }
}

/// Opaque audit destination. The pipeline calls it; where the events land
/// is the platform's concern.
pub trait AuditSink: Send + Sync {
    fn log_access(&self, event: &AccessEvent);
    fn log_modification(&self, event: &ModificationEvent);
}

/// Default sink: emit events as structured `tracing` fields so the
/// configured subscriber carries them to the platform's log pipeline.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn log_access(&self, event: &AccessEvent) {
        info!(
            audit.action = %event.action,
            audit.resource_type = %event.resource_type,
            audit.resource_id = %event.resource_id,
            audit.user_sub = %event.user_sub,
            audit.permitted = event.permitted,
            "access event"
        );
    }

    fn log_modification(&self, event: &ModificationEvent) {
        info!(
            audit.action = %event.action,
            audit.resource_type = %event.resource_type,
            audit.resource_id = %event.resource_id,
            audit.user_sub = %event.user_sub,
            "modification event"
        );
    }
}
