use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{
        command::{CreateEvent, DeactivateEvent, EnrollCoOrganizer, UpdateEvent},
        Event, EventState,
    },
    id::{EventId, UserId},
    user::CoOrganizer,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{
        event::{EventManagementRow, EventRow},
        user::CoOrganizerRow,
    },
    ConnectionPool,
};

const EVENT_COLUMNS: &str = r#"
    e.event_id,
    e.event_name,
    e.event_date,
    e.attendee_limit,
    e.created_by,
    e.business_unit_id,
    e.sub_unit_id,
    e.state
"#;

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let event_id = EventId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO events
                (event_id, event_name, event_date, attendee_limit,
                created_by, business_unit_id, sub_unit_id, state)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event_id)
        .bind(&event.event_name)
        .bind(event.event_date)
        .bind(event.attendee_limit.map(|l| l.value()))
        .bind(event.created_by)
        .bind(event.business_unit)
        .bind(event.sub_unit)
        .bind(EventState::Active.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        tracing::info!(%event_id, created_by = %event.created_by, "event created");
        Ok(event_id)
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events AS e WHERE e.event_id = $1");
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(event_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Event::try_from)
            .transpose()
    }

    async fn find_active(&self) -> AppResult<Vec<Event>> {
        let sql = format!(
            r#"
                SELECT {EVENT_COLUMNS} FROM events AS e
                WHERE e.state = $1
                ORDER BY e.event_date ASC, e.event_name ASC
            "#
        );
        self.fetch_events(sqlx::query_as::<_, EventRow>(&sql).bind(EventState::Active.as_ref()))
            .await
    }

    async fn find_active_created_by(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        let sql = format!(
            r#"
                SELECT {EVENT_COLUMNS} FROM events AS e
                WHERE e.created_by = $1 AND e.state = $2
                ORDER BY e.event_date ASC, e.event_name ASC
            "#
        );
        self.fetch_events(
            sqlx::query_as::<_, EventRow>(&sql)
                .bind(user_id)
                .bind(EventState::Active.as_ref()),
        )
        .await
    }

    async fn find_active_co_organized_by(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        let sql = format!(
            r#"
                SELECT {EVENT_COLUMNS} FROM events AS e
                INNER JOIN event_co_organizers AS co ON co.event_id = e.event_id
                WHERE co.user_id = $1 AND e.state = $2
                ORDER BY e.event_date ASC, e.event_name ASC
            "#
        );
        self.fetch_events(
            sqlx::query_as::<_, EventRow>(&sql)
                .bind(user_id)
                .bind(EventState::Active.as_ref()),
        )
        .await
    }

    async fn find_co_organizers(&self, event_id: EventId) -> AppResult<Vec<CoOrganizer>> {
        sqlx::query_as::<_, CoOrganizerRow>(
            r#"
                SELECT u.user_id, u.user_name, u.full_name
                FROM event_co_organizers AS co
                INNER JOIN users AS u ON u.user_id = co.user_id
                WHERE co.event_id = $1
                ORDER BY co.enrolled_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(CoOrganizer::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        {
            let target =
                fetch_event_management(&mut tx, event.event_id, event.requested_user).await?;
            if !target.is_active() {
                return Err(AppError::UnprocessableEntity(format!(
                    "event {} is inactive and cannot be edited",
                    event.event_id
                )));
            }
        }

        // Absent fields fall back to the stored value.
        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    event_name = COALESCE($2, event_name),
                    event_date = COALESCE($3, event_date),
                    attendee_limit = CASE WHEN $4 THEN $5 ELSE attendee_limit END,
                    business_unit_id = COALESCE($6, business_unit_id),
                    sub_unit_id = COALESCE($7, sub_unit_id)
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .bind(&event.event_name)
        .bind(event.event_date)
        .bind(event.attendee_limit.is_some())
        .bind(event.attendee_limit.flatten().map(|l| l.value()))
        .bind(event.business_unit)
        .bind(event.sub_unit)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified event not found".into()));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn deactivate(&self, event: DeactivateEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        {
            let target =
                fetch_event_management(&mut tx, event.event_id, event.requested_user).await?;
            if !target.is_active() {
                return Err(AppError::UnprocessableEntity(format!(
                    "event {} is already inactive",
                    event.event_id
                )));
            }
        }

        let res = sqlx::query(
            r#"
                UPDATE events SET state = $2
                WHERE event_id = $1 AND state = $3
            "#,
        )
        .bind(event.event_id)
        .bind(EventState::Inactive.as_ref())
        .bind(EventState::Active.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been deactivated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(event_id = %event.event_id, by = %event.requested_user, "event deactivated");
        Ok(())
    }

    async fn enroll_co_organizer(&self, event: EnrollCoOrganizer) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        {
            let target =
                fetch_event_management(&mut tx, event.event_id, event.requested_user).await?;
            if !target.is_active() {
                return Err(AppError::UnprocessableEntity(format!(
                    "event {} is inactive",
                    event.event_id
                )));
            }
        }

        // The unique (event_id, user_id) pair makes a repeated enrollment a
        // no-op.
        sqlx::query(
            r#"
                INSERT INTO event_co_organizers (event_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (event_id, user_id) DO NOTHING
            "#,
        )
        .bind(event.event_id)
        .bind(event.user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

impl EventRepositoryImpl {
    async fn fetch_events<'q>(
        &self,
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, EventRow, sqlx::postgres::PgArguments>,
    ) -> AppResult<Vec<Event>> {
        query
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }
}

// Loads the event inside the write transaction and rejects requesters
// who neither created nor co-organize it.
pub(crate) async fn fetch_event_management(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event_id: EventId,
    requested_user: UserId,
) -> AppResult<EventManagementRow> {
    let row = sqlx::query_as::<_, EventManagementRow>(
        r#"
            SELECT
            e.created_by,
            e.state,
            EXISTS (
                SELECT 1 FROM event_co_organizers AS co
                WHERE co.event_id = e.event_id AND co.user_id = $2
            ) AS is_co_organizer
            FROM events AS e
            WHERE e.event_id = $1
            FOR UPDATE
        "#,
    )
    .bind(event_id)
    .bind(requested_user)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?
    .ok_or_else(|| AppError::EntityNotFound(format!("event {event_id} not found")))?;

    if !row.is_managed_by(requested_user) {
        return Err(AppError::ForbiddenOperation);
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::repository::test_support::insert_user;
    use kernel::model::{access::Viewer, event::AttendeeLimit, role::Role};

    fn create(created_by: UserId, limit: i32) -> CreateEvent {
        CreateEvent {
            event_name: "Science fair".into(),
            event_date: NaiveDate::from_ymd_opt(2026, 11, 5).unwrap(),
            attendee_limit: AttendeeLimit::from_requested(Some(limit)).unwrap(),
            business_unit: None,
            sub_unit: None,
            created_by,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL server"]
    async fn co_organizer_sees_event_until_it_is_deactivated(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let u1 = insert_user(&pool, "organizador1", Role::Organizer).await;
        let u2 = insert_user(&pool, "organizador2", Role::Organizer).await;
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let event_id = repo.create(create(u1, 0)).await?;
        assert_eq!(repo.find_by_id(event_id).await?.unwrap().attendee_limit, None);

        for _ in 0..2 {
            repo.enroll_co_organizer(EnrollCoOrganizer {
                event_id,
                user_id: u2,
                requested_user: u1,
            })
            .await?;
        }
        assert_eq!(repo.find_co_organizers(event_id).await?.len(), 1);

        let organizer = |user_id| Viewer {
            user_id,
            role: Role::Organizer,
        };
        let visible = repo.find_visible(organizer(u2)).await?;
        assert!(visible.iter().any(|e| e.id == event_id));

        repo.deactivate(DeactivateEvent {
            event_id,
            requested_user: u1,
        })
        .await?;

        assert!(repo.find_visible(organizer(u1)).await?.is_empty());
        let stored = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(stored.state, EventState::Inactive);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL server"]
    async fn update_keeps_fields_it_does_not_mention(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner = insert_user(&pool, "owner", Role::Organizer).await;
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));
        let event_id = repo.create(create(owner, 40)).await?;
        let update = |event_name: Option<&str>, attendee_limit| UpdateEvent {
            event_id,
            event_name: event_name.map(String::from),
            event_date: None,
            attendee_limit,
            business_unit: None,
            sub_unit: None,
            requested_user: owner,
        };

        repo.update(update(Some("Science night"), None)).await?;
        let stored = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(stored.event_name, "Science night");
        assert_eq!(stored.attendee_limit.map(AttendeeLimit::value), Some(40));
        assert_eq!(stored.event_date, NaiveDate::from_ymd_opt(2026, 11, 5).unwrap());

        repo.update(update(None, Some(None))).await?;
        let stored = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(stored.event_name, "Science night");
        assert_eq!(stored.attendee_limit, None);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL server"]
    async fn strangers_cannot_deactivate(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner = insert_user(&pool, "owner", Role::Organizer).await;
        let stranger = insert_user(&pool, "stranger", Role::Organizer).await;
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let event_id = repo.create(create(owner, 10)).await?;
        let res = repo
            .deactivate(DeactivateEvent {
                event_id,
                requested_user: stranger,
            })
            .await;

        assert!(matches!(res, Err(AppError::ForbiddenOperation)));
        assert!(repo.find_by_id(event_id).await?.unwrap().is_active());
        Ok(())
    }
}
