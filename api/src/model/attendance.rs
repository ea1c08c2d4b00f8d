use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    attendance::{AttendanceDetail, AttendanceStatus, AttendanceSummary},
    event::Event,
    id::{EventId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatusName {
    Registered,
    Attended,
}

impl From<AttendanceStatus> for AttendanceStatusName {
    fn from(value: AttendanceStatus) -> Self {
        match value {
            AttendanceStatus::Registered => Self::Registered,
            AttendanceStatus::Attended => Self::Attended,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummaryResponse {
    pub event_id: EventId,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub registered_count: u64,
    pub attended_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummariesResponse {
    pub items: Vec<AttendanceSummaryResponse>,
}

impl AttendanceSummariesResponse {
    /// Pairs each summary with its event; both lists are in the same order.
    pub fn new(events: Vec<Event>, summaries: Vec<AttendanceSummary>) -> Self {
        let items = events
            .into_iter()
            .zip(summaries)
            .map(|(event, summary)| AttendanceSummaryResponse {
                event_id: event.id,
                event_name: event.event_name,
                event_date: event.event_date,
                registered_count: summary.registered_count,
                attended_count: summary.attended_count,
            })
            .collect();
        Self { items }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDetailResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub status: AttendanceStatusName,
    pub registered_at: DateTime<Utc>,
}

impl From<AttendanceDetail> for AttendanceDetailResponse {
    fn from(value: AttendanceDetail) -> Self {
        let AttendanceDetail {
            event_id: _,
            user_id,
            user_name,
            full_name,
            email,
            status,
            registered_at,
        } = value;
        Self {
            user_id,
            user_name,
            full_name,
            email,
            status: status.into(),
            registered_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDetailsResponse {
    pub items: Vec<AttendanceDetailResponse>,
}

impl From<Vec<AttendanceDetail>> for AttendanceDetailsResponse {
    fn from(value: Vec<AttendanceDetail>) -> Self {
        Self {
            items: value
                .into_iter()
                .map(AttendanceDetailResponse::from)
                .collect(),
        }
    }
}
