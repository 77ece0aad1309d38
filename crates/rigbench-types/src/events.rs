use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of messages moving over the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Lifecycle,
    Progress,
    Failure,
}

/// Immutable event envelope for progress display and logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub id: Uuid,
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    Lifecycle(LifecycleEvent),
    Progress(ProgressUpdate),
    Failure(FailureEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub phase: LifecyclePhase,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LifecyclePhase {
    MatrixStart,
    MatrixEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub status: String,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

impl ProgressUpdate {
    pub fn new(status: impl Into<String>, completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        Self {
            status: status.into(),
            completed,
            total,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEvent {
    pub message: String,
}

impl RunEvent {
    pub fn new(kind: EventKind, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            timestamp: Utc::now(),
            payload,
        }
    }

    pub fn lifecycle(phase: LifecyclePhase, details: Option<String>) -> Self {
        Self::new(
            EventKind::Lifecycle,
            EventPayload::Lifecycle(LifecycleEvent { phase, details }),
        )
    }

    pub fn progress(update: ProgressUpdate) -> Self {
        Self::new(EventKind::Progress, EventPayload::Progress(update))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(
            EventKind::Failure,
            EventPayload::Failure(FailureEvent {
                message: message.into(),
            }),
        )
    }

    pub fn as_progress(&self) -> Option<&ProgressUpdate> {
        match &self.payload {
            EventPayload::Progress(update) => Some(update),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_reaches_exactly_one_hundred() {
        let update = ProgressUpdate::new("done", 6, 6);
        assert_eq!(update.percent, 100.0);
        assert!(update.is_complete());
        let update = ProgressUpdate::new("half", 3, 6);
        assert_eq!(update.percent, 50.0);
    }
}
