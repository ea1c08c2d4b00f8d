use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    attendance::{
        event::{MarkAttended, RegisterAttendance},
        AttendanceDetail, AttendanceRecord, AttendanceStatus,
    },
    event::EventState,
    id::EventId,
};
use kernel::repository::attendance::AttendanceRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::attendance::{AttendanceDetailRow, AttendanceRow},
    ConnectionPool,
};
use crate::repository::event::fetch_event_management;

#[derive(new)]
pub struct AttendanceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AttendanceRepository for AttendanceRepositoryImpl {
    async fn register(&self, event: RegisterAttendance) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // Registration is only open while the event is active. The shared
        // lock holds off a concurrent deactivation until this commits.
        {
            let state: Option<String> = sqlx::query_scalar(
                r#"
                    SELECT state FROM events WHERE event_id = $1
                    FOR SHARE
                "#,
            )
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            match state {
                None => {
                    return Err(AppError::EntityNotFound(format!(
                        "event {} not found",
                        event.event_id
                    )))
                }
                Some(s) if s != EventState::Active.as_ref() => {
                    return Err(AppError::UnprocessableEntity(format!(
                        "event {} is not open for registration",
                        event.event_id
                    )))
                }
                Some(_) => {}
            }
        }

        sqlx::query(
            r#"
                INSERT INTO event_attendances (event_id, user_id, status)
                VALUES ($1, $2, $3)
                ON CONFLICT (event_id, user_id) DO NOTHING
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .bind(AttendanceStatus::Registered.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn mark_attended(&self, event: MarkAttended) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        fetch_event_management(&mut tx, event.event_id, event.requested_user).await?;

        let current: Option<String> = sqlx::query_scalar(
            r#"
                SELECT status FROM event_attendances
                WHERE event_id = $1 AND user_id = $2
                FOR UPDATE
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        match current.as_deref() {
            None => {
                return Err(AppError::EntityNotFound(format!(
                    "user {} is not registered for event {}",
                    event.user_id, event.event_id
                )))
            }
            Some(s) if s == AttendanceStatus::Attended.as_ref() => {
                return Err(AppError::UnprocessableEntity(
                    "attendance has already been recorded".into(),
                ))
            }
            Some(_) => {}
        }

        let res = sqlx::query(
            r#"
                UPDATE event_attendances SET status = $3
                WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .bind(AttendanceStatus::Attended.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No attendance record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_records_by_event_ids(
        &self,
        event_ids: &[EventId],
    ) -> AppResult<Vec<AttendanceRecord>> {
        let ids: Vec<uuid::Uuid> = event_ids.iter().map(|id| id.raw()).collect();
        sqlx::query_as::<_, AttendanceRow>(
            r#"
                SELECT event_id, user_id, registered_at, status
                FROM event_attendances
                WHERE event_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(AttendanceRecord::try_from)
        .collect()
    }

    async fn find_details_by_event_ids(
        &self,
        event_ids: &[EventId],
    ) -> AppResult<Vec<AttendanceDetail>> {
        let ids: Vec<uuid::Uuid> = event_ids.iter().map(|id| id.raw()).collect();
        sqlx::query_as::<_, AttendanceDetailRow>(
            r#"
                SELECT
                a.event_id,
                a.user_id,
                a.registered_at,
                a.status,
                u.user_name,
                u.full_name,
                u.email
                FROM event_attendances AS a
                LEFT JOIN users AS u ON u.user_id = a.user_id
                WHERE a.event_id = ANY($1)
                ORDER BY a.registered_at ASC
            "#,
        )
        .bind(ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(AttendanceDetail::try_from)
        .collect()
    }
}
