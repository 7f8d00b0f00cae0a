//! Supplier model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::EntityStatus;
use super::user::PHONE_REGEX;

/// Supplier record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub license_number: i32,
    pub status: EntityStatus,
    /// Number of cylinders registered under this supplier
    pub cylinder_count: i32,
}

/// Create or update supplier request (full replacement of the contact fields)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SupplierPayload {
    #[validate(length(min = 1, max = 100, message = "Name is mandatory and must be less than 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Contact person is mandatory and must be less than 100 characters"))]
    pub contact_person: String,
    #[validate(regex(path = *PHONE_REGEX, message = "Phone number must be 10 digits"))]
    pub phone: String,
    #[validate(email(message = "Email should be valid"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Address is mandatory and must be less than 255 characters"))]
    pub address: String,
    #[validate(range(min = 1000, max = 999_999_999, message = "License number must be 4 to 9 digits"))]
    pub license_number: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SupplierQuery {
    pub status: Option<EntityStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SupplierSearch {
    pub name: String,
    /// Exact (case-insensitive) match instead of substring
    #[serde(default)]
    pub exact: bool,
}

/// Per-status cylinder counts for one supplier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryCounts {
    pub available: i64,
    pub booked: i64,
    pub out_of_stock: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_validation_rules() {
        let valid = SupplierPayload {
            name: "Bharat Gas Depot".to_string(),
            contact_person: "R. Iyer".to_string(),
            phone: "9123456780".to_string(),
            email: "depot@example.com".to_string(),
            address: "12 Ring Road".to_string(),
            license_number: 45_678,
        };
        assert!(valid.validate().is_ok());

        let short_license = SupplierPayload { license_number: 999, ..valid.clone() };
        assert!(short_license.validate().is_err());

        let long_name = SupplierPayload { name: "x".repeat(101), ..valid.clone() };
        assert!(long_name.validate().is_err());

        let bad_phone = SupplierPayload { phone: "91234-5678".to_string(), ..valid };
        let errors = bad_phone.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }
}
