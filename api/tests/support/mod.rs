use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use api::route::v1;
use async_trait::async_trait;
use axum::{
    http::{header::AUTHORIZATION, HeaderValue},
    Router,
};
use axum_test::{TestRequest, TestServer};
use chrono::Utc;
use kernel::{
    model::{
        attendance::{
            event::{MarkAttended, RegisterAttendance},
            AttendanceDetail, AttendanceRecord, AttendanceStatus,
        },
        auth::{event::CreateToken, AccessToken},
        event::{
            command::{CreateEvent, DeactivateEvent, EnrollCoOrganizer, UpdateEvent},
            Event, EventState,
        },
        id::{BusinessUnitId, EventId, SubUnitId, UserId},
        role::Role,
        unit::{BusinessUnit, SubUnit},
        user::{event::UpdateUserPassword, CoOrganizer, User},
    },
    repository::{
        attendance::AttendanceRepository, auth::AuthRepository, event::EventRepository,
        health::HealthCheckRepository, unit::UnitRepository, user::UserRepository,
    },
};
use registry::{AppRegistry, Repositories};
use serde_json::json;
use shared::error::{AppError, AppResult};

pub const PASSWORD: &str = "password123";

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    tokens: HashMap<String, UserId>,
    events: Vec<Event>,
    co_organizers: Vec<(EventId, UserId)>,
    attendances: Vec<AttendanceRecord>,
    business_units: Vec<BusinessUnit>,
    sub_units: Vec<SubUnit>,
}

impl State {
    fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.iter().map(|(u, _)| u).find(|u| u.id == user_id)
    }

    fn managed_event(&self, event_id: EventId, requested_user: UserId) -> AppResult<Event> {
        let event = self
            .events
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or_else(|| AppError::EntityNotFound(format!("event {event_id} not found")))?;
        let co_organizer = self.co_organizers.contains(&(event_id, requested_user));
        if event.created_by != requested_user && !co_organizer {
            return Err(AppError::ForbiddenOperation);
        }
        Ok(event)
    }

    fn active_managed_event(
        &mut self,
        event_id: EventId,
        requested_user: UserId,
    ) -> AppResult<&mut Event> {
        let event = self.managed_event(event_id, requested_user)?;
        if !event.is_active() {
            return Err(AppError::UnprocessableEntity(format!(
                "event {event_id} is inactive"
            )));
        }
        self.events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| AppError::EntityNotFound(format!("event {event_id} not found")))
    }
}

/// In-memory stand-in for the PostgreSQL and Redis backed repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_user(&self, user_name: &str, role: Role) -> UserId {
        let user = User {
            id: UserId::new(),
            user_name: user_name.into(),
            full_name: format!("{user_name} test"),
            email: format!("{user_name}@example.com"),
            role,
        };
        let id = user.id;
        self.lock().users.push((user, PASSWORD.into()));
        id
    }

    pub fn add_business_unit(&self, name: &str) -> BusinessUnitId {
        let id = BusinessUnitId::new();
        self.lock().business_units.push(BusinessUnit {
            id,
            name: name.into(),
        });
        id
    }

    pub fn add_sub_unit(&self, name: &str, business_unit: Option<BusinessUnitId>) -> SubUnitId {
        let id = SubUnitId::new();
        self.lock().sub_units.push(SubUnit {
            id,
            name: name.into(),
            business_unit,
        });
        id
    }

    pub fn session_count(&self) -> usize {
        self.lock().tokens.len()
    }

    pub fn registry(&self) -> AppRegistry {
        let store = Arc::new(self.clone());
        AppRegistry::from_parts(Repositories {
            health_check: store.clone(),
            auth: store.clone(),
            user: store.clone(),
            event: store.clone(),
            attendance: store.clone(),
            unit: store,
        })
    }
}

#[async_trait]
impl HealthCheckRepository for InMemoryStore {
    async fn check_db(&self) -> bool {
        true
    }
}

#[async_trait]
impl AuthRepository for InMemoryStore {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        Ok(self.lock().tokens.get(&access_token.0).copied())
    }

    async fn verify_user(&self, user_name: &str, password: &str) -> AppResult<UserId> {
        self.lock()
            .users
            .iter()
            .find(|(u, p)| u.user_name == user_name && p == password)
            .map(|(u, _)| u.id)
            .ok_or(AppError::UnauthenticatedError)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        self.lock()
            .tokens
            .insert(event.access_token.clone(), event.user_id);
        Ok(AccessToken(event.access_token))
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.lock().tokens.remove(&access_token.0);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.lock().user(current_user_id).cloned())
    }

    async fn find_organizers(&self) -> AppResult<Vec<User>> {
        let mut organizers: Vec<User> = self
            .lock()
            .users
            .iter()
            .map(|(u, _)| u.clone())
            .filter(User::is_organizer)
            .collect();
        organizers.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        Ok(organizers)
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut state = self.lock();
        let (_, password) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == event.user_id)
            .ok_or_else(|| AppError::EntityNotFound("user not found".into()))?;
        if *password != event.current_password {
            return Err(AppError::UnauthenticatedError);
        }
        *password = event.new_password;
        Ok(())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let id = EventId::new();
        self.lock().events.push(Event {
            id,
            event_name: event.event_name,
            event_date: event.event_date,
            attendee_limit: event.attendee_limit,
            created_by: event.created_by,
            business_unit: event.business_unit,
            sub_unit: event.sub_unit,
            state: EventState::Active,
        });
        Ok(id)
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        Ok(self.lock().events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn find_active(&self) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .lock()
            .events
            .iter()
            .filter(|e| e.is_active())
            .cloned()
            .collect();
        kernel::model::access::sort_events(&mut events);
        Ok(events)
    }

    async fn find_active_created_by(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        Ok(self
            .lock()
            .events
            .iter()
            .filter(|e| e.is_active() && e.created_by == user_id)
            .cloned()
            .collect())
    }

    async fn find_active_co_organized_by(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        let state = self.lock();
        Ok(state
            .events
            .iter()
            .filter(|e| e.is_active() && state.co_organizers.contains(&(e.id, user_id)))
            .cloned()
            .collect())
    }

    async fn find_co_organizers(&self, event_id: EventId) -> AppResult<Vec<CoOrganizer>> {
        let state = self.lock();
        Ok(state
            .co_organizers
            .iter()
            .filter(|(e, _)| *e == event_id)
            .filter_map(|(_, u)| state.user(*u))
            .map(|u| CoOrganizer {
                user_id: u.id,
                user_name: u.user_name.clone(),
                full_name: u.full_name.clone(),
            })
            .collect())
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        let mut state = self.lock();
        let target = state.active_managed_event(event.event_id, event.requested_user)?;
        *target = event.apply_to(target.clone());
        Ok(())
    }

    async fn deactivate(&self, event: DeactivateEvent) -> AppResult<()> {
        let mut state = self.lock();
        let target = state.active_managed_event(event.event_id, event.requested_user)?;
        target.state = EventState::Inactive;
        Ok(())
    }

    async fn enroll_co_organizer(&self, event: EnrollCoOrganizer) -> AppResult<()> {
        let mut state = self.lock();
        state.active_managed_event(event.event_id, event.requested_user)?;
        let pair = (event.event_id, event.user_id);
        if !state.co_organizers.contains(&pair) {
            state.co_organizers.push(pair);
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn register(&self, event: RegisterAttendance) -> AppResult<()> {
        let mut state = self.lock();
        let target = state
            .events
            .iter()
            .find(|e| e.id == event.event_id)
            .ok_or_else(|| AppError::EntityNotFound(format!("event {} not found", event.event_id)))?;
        if !target.is_active() {
            return Err(AppError::UnprocessableEntity(
                "event is not open for registration".into(),
            ));
        }
        let exists = state
            .attendances
            .iter()
            .any(|a| a.event_id == event.event_id && a.user_id == event.user_id);
        if !exists {
            state.attendances.push(AttendanceRecord {
                event_id: event.event_id,
                user_id: event.user_id,
                registered_at: Utc::now(),
                status: AttendanceStatus::Registered,
            });
        }
        Ok(())
    }

    async fn mark_attended(&self, event: MarkAttended) -> AppResult<()> {
        let mut state = self.lock();
        state.managed_event(event.event_id, event.requested_user)?;
        let record = state
            .attendances
            .iter_mut()
            .find(|a| a.event_id == event.event_id && a.user_id == event.user_id)
            .ok_or_else(|| AppError::EntityNotFound("attendance not found".into()))?;
        if record.status == AttendanceStatus::Attended {
            return Err(AppError::UnprocessableEntity(
                "attendance has already been recorded".into(),
            ));
        }
        record.status = AttendanceStatus::Attended;
        Ok(())
    }

    async fn find_records_by_event_ids(
        &self,
        event_ids: &[EventId],
    ) -> AppResult<Vec<AttendanceRecord>> {
        Ok(self
            .lock()
            .attendances
            .iter()
            .filter(|a| event_ids.contains(&a.event_id))
            .cloned()
            .collect())
    }

    async fn find_details_by_event_ids(
        &self,
        event_ids: &[EventId],
    ) -> AppResult<Vec<AttendanceDetail>> {
        let state = self.lock();
        Ok(state
            .attendances
            .iter()
            .filter(|a| event_ids.contains(&a.event_id))
            .map(|a| {
                let user = state.user(a.user_id);
                AttendanceDetail {
                    event_id: a.event_id,
                    user_id: a.user_id,
                    user_name: user.map(|u| u.user_name.clone()).unwrap_or_default(),
                    full_name: user.map(|u| u.full_name.clone()).unwrap_or_default(),
                    email: user.map(|u| u.email.clone()).unwrap_or_default(),
                    status: a.status,
                    registered_at: a.registered_at,
                }
            })
            .collect())
    }
}

#[async_trait]
impl UnitRepository for InMemoryStore {
    async fn find_business_units(&self) -> AppResult<Vec<BusinessUnit>> {
        Ok(self.lock().business_units.clone())
    }

    async fn find_sub_units(
        &self,
        business_unit: Option<BusinessUnitId>,
    ) -> AppResult<Vec<SubUnit>> {
        Ok(self
            .lock()
            .sub_units
            .iter()
            .filter(|s| business_unit.is_none() || s.business_unit == business_unit)
            .cloned()
            .collect())
    }

    async fn find_sub_unit_by_id(&self, sub_unit_id: SubUnitId) -> AppResult<Option<SubUnit>> {
        Ok(self
            .lock()
            .sub_units
            .iter()
            .find(|s| s.id == sub_unit_id)
            .cloned())
    }
}

pub fn server(store: &InMemoryStore) -> TestServer {
    let app = Router::new()
        .merge(v1::routes())
        .with_state(store.registry());
    TestServer::new(app).unwrap()
}

pub async fn login(server: &TestServer, user_name: &str) -> String {
    let res = server
        .post("/api/v1/auth/login")
        .json(&json!({ "userName": user_name, "password": PASSWORD }))
        .await;
    res.assert_status_ok();
    res.json::<serde_json::Value>()["accessToken"]
        .as_str()
        .unwrap()
        .to_string()
}

pub trait Bearer {
    fn bearer(self, token: &str) -> Self;
}

impl Bearer for TestRequest {
    fn bearer(self, token: &str) -> Self {
        self.add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        )
    }
}
