//! HTTP implementation of the peer gateway
//!
//! All three peers speak the platform's `{success, data}` envelope. A
//! non-success envelope, a non-2xx status or a transport error all
//! surface as plain errors; callers decide how much failure they
//! tolerate.

use crate::config::PeersConfig;
use crate::contract::{PointEvent, ScheduleStatus};
use crate::domain::peers::PeerGateway;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Reqwest-backed gateway to the schedule/violation/achievement peers
pub struct HttpPeerGateway {
    client: reqwest::Client,
    schedule_base_url: String,
    violation_base_url: String,
    achievement_base_url: String,
}

impl HttpPeerGateway {
    /// Build a gateway with the configured base URLs and a bounded
    /// per-call timeout
    pub fn new(config: &PeersConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            schedule_base_url: config.schedule_url.trim_end_matches('/').to_string(),
            violation_base_url: config.violation_url.trim_end_matches('/').to_string(),
            achievement_base_url: config.achievement_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_point_events(
        &self,
        base_url: &str,
        path: &str,
        student_id: Uuid,
        limit: Option<u32>,
    ) -> Result<Vec<PointEvent>> {
        let url = format!("{}/api/v1/{}", base_url, path);
        let mut query = vec![("studentId", student_id.to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let envelope: Envelope<ItemsData> = response.json().await?;
        let data = envelope.into_data(path)?;

        Ok(data.items.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PeerGateway for HttpPeerGateway {
    async fn class_schedule_status(&self, class_id: Uuid) -> Result<ScheduleStatus> {
        let url = format!(
            "{}/api/v1/schedules/active/{}",
            self.schedule_base_url, class_id
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;

        let envelope: Envelope<ScheduleData> = response.json().await?;
        let data = envelope.into_data("schedules")?;

        Ok(ScheduleStatus {
            status: data.status,
            lesson: data.lesson,
        })
    }

    async fn student_violations(
        &self,
        student_id: Uuid,
        limit: Option<u32>,
    ) -> Result<Vec<PointEvent>> {
        self.fetch_point_events(&self.violation_base_url, "violations", student_id, limit)
            .await
    }

    async fn student_achievements(
        &self,
        student_id: Uuid,
        limit: Option<u32>,
    ) -> Result<Vec<PointEvent>> {
        self.fetch_point_events(&self.achievement_base_url, "achievements", student_id, limit)
            .await
    }
}

// ===== Wire types =====

/// Platform response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self, peer: &str) -> Result<T> {
        if !self.success {
            anyhow::bail!("{peer} peer reported failure");
        }
        self.data
            .ok_or_else(|| anyhow::anyhow!("{peer} peer returned an empty envelope"))
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleData {
    status: String,
    lesson: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemsData {
    #[serde(default)]
    items: Vec<WirePointEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePointEvent {
    id: Option<Uuid>,
    #[serde(default)]
    points: i32,
    description: Option<String>,
    recorded_at: Option<DateTime<Utc>>,
}

impl From<WirePointEvent> for PointEvent {
    fn from(event: WirePointEvent) -> Self {
        Self {
            id: event.id,
            points: event.points,
            description: event.description,
            recorded_at: event.recorded_at,
        }
    }
}
