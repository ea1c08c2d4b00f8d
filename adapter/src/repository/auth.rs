use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{
        auth::{session_entry, AuthorizationKey},
        user::UserCredentialRow,
    },
    ConnectionPool,
};
use crate::redis::RedisClient;

// Verified against when the user name is unknown, so both failures cost one
// bcrypt round at the default cost.
const DUMMY_PASSWORD_HASH: &str = "$2b$12$/JJa1qyCLijhFUJK4jlpPO4GgxM3ZEjvqdstFp.8JmTyv4btyNBdS";

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(|id| id.into_inner()))
    }

    async fn verify_user(&self, user_name: &str, password: &str) -> AppResult<UserId> {
        let user_item = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, password_hash FROM users
                WHERE user_name = $1;
            "#,
        )
        .bind(user_name)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // Unknown users and wrong passwords look the same to the caller.
        let Some(user_item) = user_item else {
            let _ = bcrypt::verify(password, DUMMY_PASSWORD_HASH);
            tracing::debug!(user_name, "login attempt for unknown user");
            return Err(AppError::UnauthenticatedError);
        };
        if !bcrypt::verify(password, &user_item.password_hash)? {
            tracing::debug!(user_name, "login attempt with wrong password");
            return Err(AppError::UnauthenticatedError);
        }

        Ok(user_item.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let (key, value) = session_entry(event);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = access_token.into();
        self.kv.delete(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::insert_user;
    use kernel::model::role::Role;
    use shared::config::RedisConfig;

    #[test]
    fn dummy_hash_is_a_real_bcrypt_hash() {
        assert!(!bcrypt::verify("123456", DUMMY_PASSWORD_HASH).unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a PostgreSQL server"]
    async fn wrong_password_and_unknown_user_fail_alike(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let user_id = insert_user(&pool, "organizador1", Role::Organizer).await;
        sqlx::query("UPDATE users SET password_hash = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(bcrypt::hash("123456", 4)?)
            .execute(&pool)
            .await?;
        let kv = Arc::new(RedisClient::new(&RedisConfig {
            host: "localhost".into(),
            port: 6379,
        })?);
        let repo = AuthRepositoryImpl::new(ConnectionPool::new(pool), kv, 60);

        assert_eq!(repo.verify_user("organizador1", "123456").await?, user_id);
        assert!(matches!(
            repo.verify_user("organizador1", "654321").await,
            Err(AppError::UnauthenticatedError)
        ));
        assert!(matches!(
            repo.verify_user("nobody", "123456").await,
            Err(AppError::UnauthenticatedError)
        ));
        Ok(())
    }
}
