//! Bill model and fee computation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::BillingConfig;

/// Bill record, one per booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Bill {
    pub id: i64,
    pub booking_id: i64,
    pub user_id: i64,
    pub price: Decimal,
    pub gst: Decimal,
    pub delivery_charge: Decimal,
    /// Cylinder Limit Exceeded penalty
    pub cle_charge: Decimal,
    pub total_price: Decimal,
}

/// Charges of a bill before it is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillCharges {
    pub price: Decimal,
    pub gst: Decimal,
    pub delivery_charge: Decimal,
    pub cle_charge: Decimal,
    pub total_price: Decimal,
}

impl BillCharges {
    /// Fixed fees for one cylinder, plus the CLE penalty when the yearly limit is reached
    pub fn compute(config: &BillingConfig, limit_exceeded: bool) -> Self {
        let subtotal = config.base_price + config.gst + config.delivery_charge;
        let cle_charge = if limit_exceeded {
            (subtotal * config.cle_rate).round_dp(2)
        } else {
            Decimal::ZERO
        };

        Self {
            price: config.base_price,
            gst: config.gst,
            delivery_charge: config.delivery_charge,
            cle_charge,
            total_price: subtotal + cle_charge,
        }
    }

    /// Apply a partial update; the total is always re-derived from the parts
    pub fn apply(&self, update: &UpdateBill) -> Self {
        let price = update.price.unwrap_or(self.price);
        let gst = update.gst.unwrap_or(self.gst);
        let delivery_charge = update.delivery_charge.unwrap_or(self.delivery_charge);
        let cle_charge = update.cle_charge.unwrap_or(self.cle_charge);

        Self {
            price,
            gst,
            delivery_charge,
            cle_charge,
            total_price: price + gst + delivery_charge + cle_charge,
        }
    }
}

impl From<&Bill> for BillCharges {
    fn from(bill: &Bill) -> Self {
        Self {
            price: bill.price,
            gst: bill.gst,
            delivery_charge: bill.delivery_charge,
            cle_charge: bill.cle_charge,
            total_price: bill.total_price,
        }
    }
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Amounts must be >= 0".into());
        return Err(err);
    }
    Ok(())
}

/// Update bill request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBill {
    pub price: Option<Decimal>,
    pub gst: Option<Decimal>,
    pub delivery_charge: Option<Decimal>,
    pub cle_charge: Option<Decimal>,
}

impl Validate for UpdateBill {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = [
            ("price", self.price),
            ("gst", self.gst),
            ("delivery_charge", self.delivery_charge),
            ("cle_charge", self.cle_charge),
        ];
        for (field, value) in fields {
            if let Some(Err(e)) = value.as_ref().map(non_negative) {
                errors.add(field, e);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bill() {
        let charges = BillCharges::compute(&BillingConfig::default(), false);
        assert_eq!(charges.price, Decimal::new(1000, 0));
        assert_eq!(charges.cle_charge, Decimal::ZERO);
        assert_eq!(charges.total_price, Decimal::new(1150, 0));
    }

    #[test]
    fn test_cle_penalty_is_twenty_percent_of_subtotal() {
        let charges = BillCharges::compute(&BillingConfig::default(), true);
        assert_eq!(charges.cle_charge, Decimal::new(230, 0));
        assert_eq!(charges.total_price, Decimal::new(1380, 0));
    }

    #[test]
    fn test_update_recomputes_total() {
        let base = BillCharges::compute(&BillingConfig::default(), true);
        let updated = base.apply(&UpdateBill {
            cle_charge: Some(Decimal::ZERO),
            delivery_charge: Some(Decimal::new(7550, 2)),
            ..Default::default()
        });
        assert_eq!(updated.price, base.price);
        assert_eq!(updated.total_price, Decimal::new(112550, 2));
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let update = UpdateBill { gst: Some(Decimal::new(-1, 0)), ..Default::default() };
        assert!(update.validate().is_err());
        let update = UpdateBill { gst: Some(Decimal::ZERO), ..Default::default() };
        assert!(update.validate().is_ok());
    }
}
