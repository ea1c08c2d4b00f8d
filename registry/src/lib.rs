use std::sync::Arc;

use adapter::redis::RedisClient;
use adapter::repository::{
    attendance::AttendanceRepositoryImpl, auth::AuthRepositoryImpl, event::EventRepositoryImpl,
    health::HealthCheckRepositoryImpl, unit::UnitRepositoryImpl, user::UserRepositoryImpl,
};
use adapter::database::ConnectionPool;
use kernel::repository::{
    attendance::AttendanceRepository, auth::AuthRepository, event::EventRepository,
    health::HealthCheckRepository, unit::UnitRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    event_repository: Arc<dyn EventRepository>,
    attendance_repository: Arc<dyn AttendanceRepository>,
    unit_repository: Arc<dyn UnitRepository>,
}

/// Every repository the registry hands out, for wiring alternative
/// implementations.
pub struct Repositories {
    pub health_check: Arc<dyn HealthCheckRepository>,
    pub auth: Arc<dyn AuthRepository>,
    pub user: Arc<dyn UserRepository>,
    pub event: Arc<dyn EventRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub unit: Arc<dyn UnitRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let attendance_repository = Arc::new(AttendanceRepositoryImpl::new(pool.clone()));
        let unit_repository = Arc::new(UnitRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            event_repository,
            attendance_repository,
            unit_repository,
        }
    }

    pub fn from_parts(repositories: Repositories) -> Self {
        let Repositories {
            health_check,
            auth,
            user,
            event,
            attendance,
            unit,
        } = repositories;
        Self {
            health_check_repository: health_check,
            auth_repository: auth,
            user_repository: user,
            event_repository: event,
            attendance_repository: attendance,
            unit_repository: unit,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn attendance_repository(&self) -> Arc<dyn AttendanceRepository> {
        self.attendance_repository.clone()
    }

    pub fn unit_repository(&self) -> Arc<dyn UnitRepository> {
        self.unit_repository.clone()
    }
}
