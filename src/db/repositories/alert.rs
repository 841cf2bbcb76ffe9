use crate::entities::{alerts, businesses, prelude::*};
use anyhow::Result;
use sea_orm::{
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use super::super::now_utc;

/// Repository for alert rows and their read-time business join.
pub struct AlertRepository {
    conn: DatabaseConnection,
}

/// Insertable alert fields as they arrive from a client. Every field is
/// optional; anything missing is left to the store, which rejects the row
/// if a required column ends up empty.
#[derive(Debug, Default, Clone)]
pub struct NewAlert {
    pub business_id: Option<i32>,
    pub alert_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl AlertRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Newest alerts first, capped at `limit`, each with its originating
    /// business (name/address) when the reference resolves.
    pub async fn list_with_business(
        &self,
        limit: u64,
    ) -> Result<Vec<(alerts::Model, Option<businesses::Model>)>> {
        let rows = Alerts::find()
            .find_also_related(Businesses)
            .order_by_desc(alerts::Column::CreatedAt)
            .order_by_desc(alerts::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn create(&self, new: NewAlert) -> Result<alerts::Model> {
        let mut model = alerts::ActiveModel {
            created_at: Set(now_utc()),
            ..Default::default()
        };

        if let Some(v) = new.business_id {
            model.business_id = Set(Some(v));
        }
        if let Some(v) = new.alert_type {
            model.alert_type = Set(v);
        }
        if let Some(v) = new.title {
            model.title = Set(v);
        }
        if let Some(v) = new.description {
            model.description = Set(Some(v));
        }

        let res = Alerts::insert(model).exec(&self.conn).await?;
        let inserted = Alerts::find_by_id(res.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted alert {} not found", res.last_insert_id))?;

        info!("Recorded alert #{}: {}", inserted.id, inserted.title);
        Ok(inserted)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Alerts::find().count(&self.conn).await?)
    }
}
