//! Cylinder inventory

use chrono::{Local, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::{
        cylinder::{CreateCylinder, Cylinder, CylinderQuery, RefillRequest, UpdateCylinder},
        enums::{CylinderStatus, EntityStatus},
    },
    repository::Repository,
};

use super::suppliers::SuppliersService;

#[derive(Clone)]
pub struct CylindersService {
    repository: Repository,
    suppliers: SuppliersService,
}

impl CylindersService {
    pub fn new(repository: Repository, suppliers: SuppliersService) -> Self {
        Self { repository, suppliers }
    }

    pub async fn list(&self, query: &CylinderQuery) -> AppResult<Vec<Cylinder>> {
        self.repository.cylinders.list(query).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Cylinder> {
        self.repository.cylinders.get_by_id(id).await
    }

    /// Add a cylinder to an active supplier's inventory
    pub async fn create(&self, data: CreateCylinder) -> AppResult<Cylinder> {
        let supplier = self.repository.suppliers.get_by_id(data.supplier_id).await?;
        if supplier.status != EntityStatus::Active {
            return Err(AppError::InvalidOperation(format!(
                "Supplier {} is inactive and cannot receive cylinders",
                supplier.id
            )));
        }

        let (cylinder, supplier) = self.repository.cylinders.create(&data).await?;
        tracing::info!(
            cylinder_id = cylinder.id,
            supplier_id = supplier.id,
            "Cylinder added"
        );
        self.suppliers.check_low_inventory(&supplier).await;
        Ok(cylinder)
    }

    pub async fn update(&self, id: i64, data: UpdateCylinder) -> AppResult<Cylinder> {
        self.repository.cylinders.update(id, &data).await
    }

    pub async fn refill(&self, id: i64, request: RefillRequest) -> AppResult<Cylinder> {
        let date = request.last_refill_date.ok_or_else(|| {
            AppError::Validation("Refill date is required".to_string())
        })?;

        let cylinder = self.repository.cylinders.get_by_id(id).await?;
        let supplier = self.repository.suppliers.get_by_id(cylinder.supplier_id).await?;
        check_refill(&cylinder, supplier.status, date, Local::now().date_naive())?;

        self.repository.cylinders.set_refill_date(id, date).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let supplier = self.repository.cylinders.delete(id).await?;
        tracing::info!(cylinder_id = id, supplier_id = supplier.id, "Cylinder deleted");
        self.suppliers.check_low_inventory(&supplier).await;
        Ok(())
    }
}

fn check_refill(
    cylinder: &Cylinder,
    supplier_status: EntityStatus,
    date: NaiveDate,
    today: NaiveDate,
) -> AppResult<()> {
    if date > today {
        return Err(AppError::Validation(
            "Refill date cannot be in the future".to_string(),
        ));
    }
    if cylinder.status != CylinderStatus::Available {
        return Err(AppError::InvalidOperation(format!(
            "Cylinder {} is {} and cannot be refilled",
            cylinder.id, cylinder.status
        )));
    }
    if supplier_status != EntityStatus::Active {
        return Err(AppError::InvalidOperation(format!(
            "Supplier {} is inactive",
            cylinder.supplier_id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::CylinderType;

    fn cylinder(status: CylinderStatus) -> Cylinder {
        Cylinder {
            id: 3,
            cylinder_type: CylinderType::Commercial,
            status,
            last_refill_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            supplier_id: 8,
        }
    }

    #[test]
    fn test_refill_rules() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();

        let available = cylinder(CylinderStatus::Available);
        assert!(check_refill(&available, EntityStatus::Active, yesterday, today).is_ok());
        assert!(check_refill(&available, EntityStatus::Active, today, today).is_ok());
        assert!(matches!(
            check_refill(&available, EntityStatus::Active, tomorrow, today),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            check_refill(&cylinder(CylinderStatus::Booked), EntityStatus::Active, today, today),
            Err(AppError::InvalidOperation(_))
        ));
        assert!(check_refill(&available, EntityStatus::Inactive, today, today).is_err());
    }
}
