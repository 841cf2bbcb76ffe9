use crate::entities::{businesses, prelude::*};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use super::super::now_utc;

/// Repository for business rows. Businesses have no HTTP surface of their
/// own; rows arrive via seeding and exist to be joined into alerts.
pub struct BusinessRepository {
    conn: DatabaseConnection,
}

#[derive(Debug, Default, Clone)]
pub struct NewBusiness {
    pub name: String,
    pub address: String,
    pub category: Option<String>,
    pub status: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
}

impl BusinessRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, new: NewBusiness) -> Result<businesses::Model> {
        let model = businesses::ActiveModel {
            name: Set(new.name),
            address: Set(new.address),
            category: Set(new.category),
            status: Set(new.status),
            rating: Set(new.rating),
            review_count: Set(new.review_count),
            created_at: Set(now_utc()),
            ..Default::default()
        };

        let res = Businesses::insert(model).exec(&self.conn).await?;
        let inserted = Businesses::find_by_id(res.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted business {} not found", res.last_insert_id))?;

        Ok(inserted)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Businesses::find().count(&self.conn).await?)
    }
}
