//! Best-effort audit event emission.
//!
//! Every successful mutation emits an event to an external append-only
//! sink. Emission is fire-and-forget from the engines' perspective: a slow
//! or failing sink is surfaced on the operator channel via `tracing` and
//! never rolls back or fails the domain mutation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clubhouse_shared::types::StaffId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// The aggregate an audit event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntity {
    /// Occupancy records.
    Occupancy,
    /// Credit purchases.
    Purchase,
    /// Daily cash drawers.
    Drawer,
}

/// The action recorded by an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A member entered a facility.
    Checkin,
    /// A member left a facility (manual or automatic).
    Checkout,
    /// A record or purchase was voided.
    Void,
    /// A credit purchase was recorded.
    Create,
    /// A cash drawer was opened.
    Open,
    /// A cash drawer was closed.
    Close,
}

/// One append-only audit trail entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The aggregate kind.
    pub entity: AuditEntity,
    /// The aggregate's identifier, stringified.
    pub entity_id: String,
    /// What happened.
    pub action: AuditAction,
    /// Snapshot of the mutated state and operation inputs.
    pub payload: serde_json::Value,
    /// The staff member who performed the action, if any.
    pub actor: Option<StaffId>,
    /// Source IP as reported by the request layer, if any.
    pub source_ip: Option<String>,
    /// When the event was emitted.
    pub recorded_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates an event with no payload, actor, or source IP.
    #[must_use]
    pub fn new(
        entity: AuditEntity,
        entity_id: impl ToString,
        action: AuditAction,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity,
            entity_id: entity_id.to_string(),
            action,
            payload: serde_json::Value::Null,
            actor: None,
            source_ip: None,
            recorded_at,
        }
    }

    /// Attaches a payload snapshot.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Attaches the acting staff member.
    #[must_use]
    pub fn with_actor(mut self, actor: StaffId) -> Self {
        self.actor = Some(actor);
        self
    }
}

/// Serializes a value into an audit payload, degrading to `null` rather
/// than failing the mutation.
pub fn payload<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_default()
}

/// Errors reported by an audit sink.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The sink rejected or could not persist the event.
    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),
}

/// External append-only audit trail.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Records one event.
    async fn record(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// Emits an event, tolerating sink failure.
///
/// Failures are logged to the operator channel and otherwise swallowed;
/// the caller's mutation has already committed.
pub async fn emit(sink: &dyn AuditSink, event: AuditEvent) {
    let entity = event.entity;
    let action = event.action;
    let entity_id = event.entity_id.clone();
    if let Err(err) = sink.record(event).await {
        warn!(?entity, ?action, %entity_id, %err, "audit event dropped");
    }
}

/// Audit sink that writes events to the tracing log.
///
/// Useful for development and as a last-resort trail when no durable sink
/// is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn record(&self, event: AuditEvent) -> Result<(), AuditError> {
        tracing::info!(
            entity = ?event.entity,
            action = ?event.action,
            entity_id = %event.entity_id,
            actor = ?event.actor,
            payload = %event.payload,
            "audit"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_event_builder() {
        let staff = StaffId::new();
        let event = AuditEvent::new(AuditEntity::Drawer, "d-1", AuditAction::Open, at())
            .with_payload(serde_json::json!({"opening_balance": "100.00"}))
            .with_actor(staff);

        assert_eq!(event.entity, AuditEntity::Drawer);
        assert_eq!(event.entity_id, "d-1");
        assert_eq!(event.action, AuditAction::Open);
        assert_eq!(event.actor, Some(staff));
        assert_eq!(event.payload["opening_balance"], "100.00");
    }

    #[test]
    fn test_action_wire_names() {
        assert_eq!(
            serde_json::to_string(&AuditAction::Checkin).unwrap(),
            "\"CHECKIN\""
        );
        assert_eq!(
            serde_json::to_string(&AuditAction::Close).unwrap(),
            "\"CLOSE\""
        );
    }

    #[tokio::test]
    async fn test_log_sink_accepts_events() {
        let sink = LogAuditSink;
        let event = AuditEvent::new(AuditEntity::Purchase, "p-1", AuditAction::Create, at());
        assert!(sink.record(event).await.is_ok());
    }
}
