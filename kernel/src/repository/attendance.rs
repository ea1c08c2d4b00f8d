use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    attendance::{
        event::{MarkAttended, RegisterAttendance},
        summarize_attendance, AttendanceDetail, AttendanceRecord, AttendanceSummary,
    },
    id::EventId,
};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    // A second registration for the same pair is a no-op.
    async fn register(&self, event: RegisterAttendance) -> AppResult<()>;
    async fn mark_attended(&self, event: MarkAttended) -> AppResult<()>;
    async fn find_records_by_event_ids(
        &self,
        event_ids: &[EventId],
    ) -> AppResult<Vec<AttendanceRecord>>;
    async fn find_details_by_event_ids(
        &self,
        event_ids: &[EventId],
    ) -> AppResult<Vec<AttendanceDetail>>;

    /// Recomputed from the store on every call.
    async fn aggregate(&self, event_ids: &[EventId]) -> AppResult<Vec<AttendanceSummary>> {
        let records = self.find_records_by_event_ids(event_ids).await?;
        Ok(summarize_attendance(event_ids, &records))
    }

    async fn detail(&self, event_id: EventId) -> AppResult<Vec<AttendanceDetail>> {
        self.find_details_by_event_ids(&[event_id]).await
    }
}
