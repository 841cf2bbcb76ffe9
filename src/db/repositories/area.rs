use crate::entities::{prelude::*, tracked_areas};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

use super::super::now_utc;

/// Repository for tracked-area rows.
pub struct AreaRepository {
    conn: DatabaseConnection,
}

#[derive(Debug, Default, Clone)]
pub struct NewTrackedArea {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl AreaRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<tracked_areas::Model>> {
        let rows = TrackedAreas::find()
            .order_by_desc(tracked_areas::Column::CreatedAt)
            .order_by_desc(tracked_areas::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn create(&self, new: NewTrackedArea) -> Result<tracked_areas::Model> {
        let mut model = tracked_areas::ActiveModel {
            created_at: Set(now_utc()),
            ..Default::default()
        };

        if let Some(v) = new.name {
            model.name = Set(v);
        }
        if let Some(v) = new.location {
            model.location = Set(v);
        }

        let res = TrackedAreas::insert(model).exec(&self.conn).await?;
        let inserted = TrackedAreas::find_by_id(res.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted area {} not found", res.last_insert_id))?;

        info!("Tracking area #{}: {}", inserted.id, inserted.name);
        Ok(inserted)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(TrackedAreas::find().count(&self.conn).await?)
    }
}
