use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{alerts, businesses, tracked_areas, waitlist};

pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::alert::NewAlert;
pub use repositories::area::NewTrackedArea;
pub use repositories::business::NewBusiness;
pub use repositories::waitlist::NewSignup;

/// Server-assigned creation timestamp. RFC 3339 with fixed microsecond
/// precision so the stored text sorts the same as the instant it encodes.
pub(crate) fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn alert_repo(&self) -> repositories::alert::AlertRepository {
        repositories::alert::AlertRepository::new(self.conn.clone())
    }

    fn area_repo(&self) -> repositories::area::AreaRepository {
        repositories::area::AreaRepository::new(self.conn.clone())
    }

    fn business_repo(&self) -> repositories::business::BusinessRepository {
        repositories::business::BusinessRepository::new(self.conn.clone())
    }

    fn waitlist_repo(&self) -> repositories::waitlist::WaitlistRepository {
        repositories::waitlist::WaitlistRepository::new(self.conn.clone())
    }

    pub async fn list_alerts_with_business(
        &self,
        limit: u64,
    ) -> Result<Vec<(alerts::Model, Option<businesses::Model>)>> {
        self.alert_repo().list_with_business(limit).await
    }

    pub async fn create_alert(&self, new: NewAlert) -> Result<alerts::Model> {
        self.alert_repo().create(new).await
    }

    pub async fn count_alerts(&self) -> Result<u64> {
        self.alert_repo().count().await
    }

    pub async fn list_tracked_areas(&self) -> Result<Vec<tracked_areas::Model>> {
        self.area_repo().list().await
    }

    pub async fn create_tracked_area(&self, new: NewTrackedArea) -> Result<tracked_areas::Model> {
        self.area_repo().create(new).await
    }

    pub async fn count_tracked_areas(&self) -> Result<u64> {
        self.area_repo().count().await
    }

    pub async fn add_business(&self, new: NewBusiness) -> Result<businesses::Model> {
        self.business_repo().add(new).await
    }

    pub async fn count_businesses(&self) -> Result<u64> {
        self.business_repo().count().await
    }

    pub async fn list_waitlist(&self) -> Result<Vec<waitlist::Model>> {
        self.waitlist_repo().list().await
    }

    /// Raw `DbErr` on failure so the API layer can tell a duplicate email
    /// apart from every other store error.
    pub async fn add_waitlist_entry(&self, new: NewSignup) -> Result<waitlist::Model, DbErr> {
        self.waitlist_repo().add(new).await
    }

    pub async fn count_waitlist(&self) -> Result<u64> {
        self.waitlist_repo().count().await
    }
}
