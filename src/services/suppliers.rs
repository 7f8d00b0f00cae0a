//! Supplier accounts, inventory alerts and reports

use crate::{
    config::ReportsConfig,
    error::{AppError, AppResult},
    models::{
        enums::EntityStatus,
        supplier::{Supplier, SupplierPayload},
    },
    pdf,
    repository::Repository,
};

use super::{email::EmailService, notifications};

#[derive(Clone)]
pub struct SuppliersService {
    repository: Repository,
    email: EmailService,
    config: ReportsConfig,
}

impl SuppliersService {
    pub fn new(repository: Repository, email: EmailService, config: ReportsConfig) -> Self {
        Self { repository, email, config }
    }

    pub async fn list(&self, status: Option<EntityStatus>) -> AppResult<Vec<Supplier>> {
        self.repository.suppliers.list(status).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Supplier> {
        self.repository.suppliers.get_by_id(id).await
    }

    pub async fn search(&self, name: &str, exact: bool) -> AppResult<Vec<Supplier>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Search name cannot be empty".to_string()));
        }
        self.repository.suppliers.search_by_name(name, exact).await
    }

    pub async fn create(&self, data: SupplierPayload) -> AppResult<Supplier> {
        let supplier = self.repository.suppliers.create(&data).await?;
        tracing::info!(supplier_id = supplier.id, "Supplier registered");
        self.email.notify(notifications::supplier_welcome(&supplier)).await;
        Ok(supplier)
    }

    /// Replace contact details; a changed email address is told on both addresses
    pub async fn update(&self, id: i64, data: SupplierPayload) -> AppResult<Supplier> {
        let previous = self.repository.suppliers.get_by_id(id).await?;
        let supplier = self.repository.suppliers.update(id, &data).await?;

        self.email.notify(notifications::supplier_updated(&supplier)).await;
        if !previous.email.eq_ignore_ascii_case(&supplier.email) {
            self.email
                .notify(notifications::supplier_email_changed(&previous.email, &supplier))
                .await;
        }
        Ok(supplier)
    }

    pub async fn activate(&self, id: i64) -> AppResult<Supplier> {
        let supplier = self.repository.suppliers.get_by_id(id).await?;
        if supplier.status == EntityStatus::Active {
            return Err(AppError::BadRequest(format!("Supplier {} is already active", id)));
        }
        let supplier = self.repository.suppliers.set_status(id, EntityStatus::Active).await?;
        tracing::info!(supplier_id = id, "Supplier activated");
        self.email.notify(notifications::supplier_activated(&supplier)).await;
        Ok(supplier)
    }

    pub async fn deactivate(&self, id: i64) -> AppResult<Supplier> {
        let supplier = self.repository.suppliers.get_by_id(id).await?;
        if supplier.status == EntityStatus::Inactive {
            return Err(AppError::BadRequest(format!("Supplier {} is already inactive", id)));
        }
        let supplier = self.repository.suppliers.set_status(id, EntityStatus::Inactive).await?;
        tracing::info!(supplier_id = id, "Supplier deactivated");
        self.email.notify(notifications::supplier_deactivated(&supplier)).await;
        Ok(supplier)
    }

    /// PDF listing every supplier with the given status
    pub async fn status_report_pdf(&self, status: EntityStatus) -> AppResult<Vec<u8>> {
        let suppliers = self.repository.suppliers.list(Some(status)).await?;
        if suppliers.is_empty() {
            return Err(AppError::NotFound(format!("No suppliers with status {}", status)));
        }
        pdf::suppliers_report(status, &suppliers)
    }

    /// Alert the supplier when its cylinder count is below the threshold
    pub async fn check_low_inventory(&self, supplier: &Supplier) {
        if is_low_inventory(supplier, self.config.low_inventory_threshold) {
            tracing::warn!(
                supplier_id = supplier.id,
                cylinder_count = supplier.cylinder_count,
                "Low cylinder inventory"
            );
            self.email
                .notify(notifications::low_inventory_alert(
                    supplier,
                    self.config.low_inventory_threshold,
                ))
                .await;
        }
    }

    /// Daily status report and low inventory check for every supplier
    pub async fn send_daily_reports(&self) -> AppResult<usize> {
        let suppliers = self.repository.suppliers.list(None).await?;
        for supplier in &suppliers {
            let counts = self.repository.suppliers.inventory_counts(supplier.id).await?;
            self.email
                .notify(notifications::cylinder_status_report(supplier, &counts))
                .await;
            self.check_low_inventory(supplier).await;
        }
        Ok(suppliers.len())
    }
}

pub fn is_low_inventory(supplier: &Supplier, threshold: i32) -> bool {
    supplier.cylinder_count < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_inventory_threshold_is_exclusive() {
        let mut supplier = Supplier {
            id: 1,
            name: "Depot".to_string(),
            contact_person: "A".to_string(),
            phone: "9000000000".to_string(),
            email: "d@example.com".to_string(),
            address: "Road".to_string(),
            license_number: 1234,
            status: EntityStatus::Active,
            cylinder_count: 4,
        };
        assert!(is_low_inventory(&supplier, 5));
        supplier.cylinder_count = 5;
        assert!(!is_low_inventory(&supplier, 5));
    }
}
