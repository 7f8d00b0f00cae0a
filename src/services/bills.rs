//! Bills

use validator::Validate;

use crate::{
    error::AppResult,
    models::bill::{Bill, BillCharges, UpdateBill},
    repository::Repository,
};

#[derive(Clone)]
pub struct BillsService {
    repository: Repository,
}

impl BillsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Bill>> {
        self.repository.bills.list().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Bill> {
        self.repository.bills.get_by_id(id).await
    }

    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Bill>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.bills.list_by_user(user_id).await
    }

    /// Partial update; the total is recomputed from the resulting charges
    pub async fn update(&self, id: i64, data: UpdateBill) -> AppResult<Bill> {
        data.validate()?;
        let bill = self.repository.bills.get_by_id(id).await?;
        let charges = BillCharges::from(&bill).apply(&data);
        let bill = self.repository.bills.update(id, &charges).await?;
        tracing::info!(bill_id = id, total = %bill.total_price, "Bill updated");
        Ok(bill)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.bills.delete(id).await
    }
}
