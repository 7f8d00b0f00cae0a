//! User model and related types

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{ConnectionStatus, ConnectionType, UserRole};

/// Ten digit phone numbers, shared with suppliers
pub static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub registration_date: NaiveDate,
    pub connection_status: ConnectionStatus,
    pub connection_type: ConnectionType,
    pub role: UserRole,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Short user representation embedded in bookings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserShort {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<&User> for UserShort {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            address: u.address.clone(),
        }
    }
}

/// User list filter
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UserQuery {
    /// ACTIVE or INACTIVE
    pub status: Option<ConnectionStatus>,
}

/// Create user request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "First name cannot be blank"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name cannot be blank"))]
    pub last_name: String,
    #[validate(email(message = "Email should be valid"))]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone number must be 10 digits"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub connection_type: ConnectionType,
    pub connection_status: Option<ConnectionStatus>,
    pub role: Option<UserRole>,
}

/// Update user request (contact details and connection type only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(email(message = "Email should be valid"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone number must be 10 digits"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub connection_type: Option<ConnectionType>,
}

/// Connection status change
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StatusQuery {
    pub status: ConnectionStatus,
}

/// Credential check request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub user_id: i64,
    pub password: String,
    pub role: UserRole,
}

/// Availability check query
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// Whether a user may place a new booking today
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingEligibility {
    pub eligible: bool,
    pub last_booking_date: Option<NaiveDate>,
    pub next_eligible_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateUser {
        CreateUser {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: Some("9876543210".to_string()),
            address: None,
            connection_type: ConnectionType::Domestic,
            connection_status: None,
            role: None,
        }
    }

    #[test]
    fn test_create_user_validation() {
        assert!(create_request().validate().is_ok());

        let mut bad_phone = create_request();
        bad_phone.phone = Some("12345".to_string());
        assert!(bad_phone.validate().is_err());

        let mut blank = create_request();
        blank.first_name = String::new();
        blank.email = "not-an-email".to_string();
        let errors = blank.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User {
            id: 1234567890,
            password_hash: "$argon2id$secret".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
            address: None,
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            connection_status: ConnectionStatus::Active,
            connection_type: ConnectionType::Domestic,
            role: UserRole::Customer,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["connection_status"], "ACTIVE");
        assert_eq!(json["registration_date"], "2024-01-02");
        assert_eq!(user.full_name(), "Asha Rao");
    }
}
