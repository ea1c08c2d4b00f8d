use std::str::FromStr;

use chrono::{DateTime, Utc};
use kernel::model::{
    attendance::{AttendanceDetail, AttendanceRecord, AttendanceStatus},
    id::{EventId, UserId},
};
use shared::error::AppError;
use sqlx::FromRow;

fn parse_status(status: &str) -> Result<AttendanceStatus, AppError> {
    AttendanceStatus::from_str(status).map_err(|_| {
        AppError::ConversionEntityError(format!("unknown attendance status: {status}"))
    })
}

#[derive(FromRow)]
pub struct AttendanceRow {
    pub event_id: EventId,
    pub user_id: UserId,
    pub registered_at: DateTime<Utc>,
    pub status: String,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = AppError;

    fn try_from(value: AttendanceRow) -> Result<Self, Self::Error> {
        let AttendanceRow {
            event_id,
            user_id,
            registered_at,
            status,
        } = value;
        Ok(AttendanceRecord {
            event_id,
            user_id,
            registered_at,
            status: parse_status(&status)?,
        })
    }
}

// Joined to users with a LEFT JOIN, so the user columns may be missing.
#[derive(FromRow)]
pub struct AttendanceDetailRow {
    pub event_id: EventId,
    pub user_id: UserId,
    pub registered_at: DateTime<Utc>,
    pub status: String,
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<AttendanceDetailRow> for AttendanceDetail {
    type Error = AppError;

    fn try_from(value: AttendanceDetailRow) -> Result<Self, Self::Error> {
        let AttendanceDetailRow {
            event_id,
            user_id,
            registered_at,
            status,
            user_name,
            full_name,
            email,
        } = value;
        Ok(AttendanceDetail {
            event_id,
            user_id,
            user_name: user_name.unwrap_or_default(),
            full_name: full_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            status: parse_status(&status)?,
            registered_at,
        })
    }
}
