//! Business logic services

pub mod bills;
pub mod bookings;
pub mod cylinders;
pub mod email;
pub mod notifications;
pub mod reports;
pub mod suppliers;
pub mod users;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub suppliers: suppliers::SuppliersService,
    pub cylinders: cylinders::CylindersService,
    pub bookings: bookings::BookingsService,
    pub bills: bills::BillsService,
    pub email: email::EmailService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let email = email::EmailService::new(config.email.clone());
        Self::with_email(repository, config, email)
    }

    /// Same as `new` with an explicit email backend
    pub fn with_email(repository: Repository, config: &AppConfig, email: email::EmailService) -> Self {
        let suppliers =
            suppliers::SuppliersService::new(repository.clone(), email.clone(), config.reports.clone());

        Self {
            users: users::UsersService::new(repository.clone(), email.clone()),
            cylinders: cylinders::CylindersService::new(repository.clone(), suppliers.clone()),
            bookings: bookings::BookingsService::new(
                repository.clone(),
                email.clone(),
                config.billing.clone(),
            ),
            bills: bills::BillsService::new(repository.clone()),
            suppliers,
            email,
            repository,
        }
    }

    /// Database readiness
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
