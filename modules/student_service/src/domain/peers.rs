//! Peer gateway trait for the sibling services
//!
//! The schedule, violation and achievement services are
//! optional-availability peers: every call can fail and callers decide
//! how much failure they tolerate (the consolidated view degrades, the
//! points sync gives up on the one student).

use crate::contract::{PointEvent, ScheduleStatus};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Outbound calls to the schedule/violation/achievement peers
#[async_trait]
pub trait PeerGateway: Send + Sync {
    /// Live schedule status for a class
    async fn class_schedule_status(&self, class_id: Uuid) -> Result<ScheduleStatus>;

    /// Point events from the violation service, newest first.
    /// `limit` of None fetches the full event log for aggregation.
    async fn student_violations(&self, student_id: Uuid, limit: Option<u32>)
        -> Result<Vec<PointEvent>>;

    /// Point events from the achievement service, newest first
    async fn student_achievements(
        &self,
        student_id: Uuid,
        limit: Option<u32>,
    ) -> Result<Vec<PointEvent>>;
}
