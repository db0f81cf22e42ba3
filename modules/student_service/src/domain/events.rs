//! Domain events for student service
//!
//! Events describe roster changes other modules may care about. The
//! default publisher is a no-op; a broker-backed implementation can be
//! swapped in without touching the domain service.

use crate::contract::model::Student;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event types for the student roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum StudentEvent {
    /// A student was enrolled into a class
    StudentEnrolled(StudentEnrolledEvent),
    /// A student was withdrawn (soft-deleted)
    StudentWithdrawn(StudentWithdrawnEvent),
    /// A student's points and rank were recomputed
    PointsSynced(PointsSyncedEvent),
}

/// Event data for an enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEnrolledEvent {
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub nisn: String,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
    /// Audit id of the actor who performed the action
    pub actor: String,
}

/// Event data for a withdrawal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentWithdrawnEvent {
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
}

/// Event data for a points sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsSyncedEvent {
    pub student_id: Uuid,
    pub total_points: i32,
    pub current_rank: i32,
    pub timestamp: DateTime<Utc>,
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a roster event
    async fn publish(&self, event: StudentEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: StudentEvent) -> anyhow::Result<()> {
        // No-op: events are not published
        Ok(())
    }
}

impl StudentEvent {
    /// Create a new StudentEnrolled event
    pub fn enrolled(student: &Student, actor: String) -> Self {
        StudentEvent::StudentEnrolled(StudentEnrolledEvent {
            student_id: student.id,
            class_id: student.class_id,
            nisn: student.nisn.clone(),
            timestamp: Utc::now(),
            actor,
        })
    }

    /// Create a new StudentWithdrawn event
    pub fn withdrawn(student: &Student, actor: String) -> Self {
        StudentEvent::StudentWithdrawn(StudentWithdrawnEvent {
            student_id: student.id,
            class_id: student.class_id,
            timestamp: Utc::now(),
            actor,
        })
    }

    /// Create a new PointsSynced event
    pub fn points_synced(student_id: Uuid, total_points: i32, current_rank: i32) -> Self {
        StudentEvent::PointsSynced(PointsSyncedEvent {
            student_id,
            total_points,
            current_rank,
            timestamp: Utc::now(),
        })
    }
}
