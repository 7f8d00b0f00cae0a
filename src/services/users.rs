//! Customer and admin account management

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Local;
use rand::Rng;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ConnectionStatus,
        user::{CreateUser, LoginRequest, UpdateUser, User},
    },
    repository::Repository,
};

use super::{email::EmailService, notifications};

/// Range of generated ten digit user IDs
const USER_ID_RANGE: std::ops::Range<i64> = 1_000_000_000..1_900_000_000;
const MAX_ID_ATTEMPTS: usize = 20;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    email: EmailService,
}

impl UsersService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    pub async fn list(&self, status: Option<ConnectionStatus>) -> AppResult<Vec<User>> {
        self.repository.users.list(status).await
    }

    pub async fn get(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Register a user with a generated ID and password, and email the credentials
    pub async fn create(&self, data: CreateUser) -> AppResult<User> {
        if self.repository.users.email_exists(&data.email, None).await? {
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                data.email
            )));
        }
        if let Some(phone) = data.phone.as_deref().filter(|p| !p.is_empty()) {
            if self.repository.users.phone_exists(phone, None).await? {
                return Err(AppError::Conflict(format!(
                    "User with phone number {} already exists",
                    phone
                )));
            }
        }

        let id = self.generate_user_id().await?;
        let password = generate_password();
        let password_hash = hash_password(&password)?;

        let user = self
            .repository
            .users
            .create(id, &password_hash, &data, Local::now().date_naive())
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        self.email
            .notify(notifications::user_credentials(&user, &password))
            .await;

        Ok(user)
    }

    pub async fn update(&self, id: i64, data: UpdateUser) -> AppResult<User> {
        self.repository.users.get_by_id(id).await?;

        if let Some(email) = &data.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "User with email {} already exists",
                    email
                )));
            }
        }
        if let Some(phone) = &data.phone {
            if self.repository.users.phone_exists(phone, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "User with phone number {} already exists",
                    phone
                )));
            }
        }

        let user = self.repository.users.update(id, &data).await?;
        self.email.notify(notifications::user_updated(&user)).await;
        Ok(user)
    }

    /// Change the connection status; unchanged status is a no-op without email
    pub async fn set_status(&self, id: i64, status: ConnectionStatus) -> AppResult<User> {
        let user = self.repository.users.get_by_id(id).await?;
        if user.connection_status == status {
            return Ok(user);
        }

        let user = self.repository.users.set_connection_status(id, status).await?;
        tracing::info!(user_id = id, status = %status, "User connection status changed");
        self.email.notify(notifications::user_status_changed(&user)).await;
        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.users.get_by_id(id).await?;
        if self.repository.bookings.user_has_bookings(id).await? {
            return Err(AppError::Conflict(format!(
                "User {} has bookings and cannot be deleted",
                id
            )));
        }
        self.repository.users.delete(id).await
    }

    /// Check credentials and role for the login page
    pub async fn login(&self, request: &LoginRequest) -> AppResult<User> {
        let invalid = || AppError::Authentication("Invalid user ID or password".to_string());

        let user = match self.repository.users.get_by_id(request.user_id).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => return Err(invalid()),
            Err(e) => return Err(e),
        };

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(invalid());
        }
        if user.role != request.role {
            return Err(AppError::Authorization(format!(
                "User {} is not registered as {}",
                user.id, request.role
            )));
        }
        if user.connection_status == ConnectionStatus::Inactive {
            return Err(AppError::Authorization(
                "Your account is inactive. Please contact the agency.".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn email_available(&self, email: &str) -> AppResult<bool> {
        Ok(!self.repository.users.email_exists(email, None).await?)
    }

    pub async fn phone_available(&self, phone: &str) -> AppResult<bool> {
        Ok(!self.repository.users.phone_exists(phone, None).await?)
    }

    async fn generate_user_id(&self) -> AppResult<i64> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = rand::thread_rng().gen_range(USER_ID_RANGE);
            if !self.repository.users.exists(id).await? {
                return Ok(id);
            }
        }
        Err(AppError::Internal("Could not allocate a user ID".to_string()))
    }
}

/// Eight character initial password
fn generate_password() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("s3cret12").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret12", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_generated_password_shape() {
        let password = generate_password();
        assert_eq!(password.len(), 8);
        assert!(password.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(password, generate_password());
    }

    #[test]
    fn test_user_id_range_is_ten_digits() {
        assert_eq!(USER_ID_RANGE.start.to_string().len(), 10);
        assert_eq!((USER_ID_RANGE.end - 1).to_string().len(), 10);
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(verify_password("x", "plain"), Err(AppError::Internal(_))));
    }
}
