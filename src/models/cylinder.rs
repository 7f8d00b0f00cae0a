//! Cylinder model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::{CylinderStatus, CylinderType};

/// Cylinder record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Cylinder {
    pub id: i64,
    pub cylinder_type: CylinderType,
    pub status: CylinderStatus,
    pub last_refill_date: NaiveDate,
    pub supplier_id: i64,
}

/// Add cylinder request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCylinder {
    pub supplier_id: i64,
    pub cylinder_type: CylinderType,
    /// Defaults to Available
    pub status: Option<CylinderStatus>,
    pub last_refill_date: NaiveDate,
}

/// Update cylinder request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCylinder {
    pub cylinder_type: Option<CylinderType>,
    pub status: Option<CylinderStatus>,
    pub last_refill_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefillRequest {
    pub last_refill_date: Option<NaiveDate>,
}

/// Cylinder list filter
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CylinderQuery {
    pub status: Option<CylinderStatus>,
    #[serde(rename = "type")]
    pub cylinder_type: Option<CylinderType>,
    pub supplier_id: Option<i64>,
}
