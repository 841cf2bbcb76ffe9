use crate::entities::{prelude::*, waitlist};
use anyhow::Result;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

use super::super::now_utc;

/// Repository for waitlist signups.
pub struct WaitlistRepository {
    conn: DatabaseConnection,
}

/// The three fields the signup endpoint projects out of a request body.
#[derive(Debug, Default, Clone)]
pub struct NewSignup {
    pub email: Option<String>,
    pub market_interest: Option<String>,
    pub business_type: Option<String>,
}

impl WaitlistRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<waitlist::Model>> {
        let rows = Waitlist::find()
            .order_by_desc(waitlist::Column::CreatedAt)
            .order_by_desc(waitlist::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Inserts a signup. Returns the raw `DbErr` so callers can recognize
    /// the unique-constraint violation on email and treat it as a repeat
    /// signup rather than a failure.
    pub async fn add(&self, new: NewSignup) -> Result<waitlist::Model, DbErr> {
        let mut model = waitlist::ActiveModel {
            created_at: Set(now_utc()),
            ..Default::default()
        };

        if let Some(v) = new.email {
            model.email = Set(v);
        }
        if let Some(v) = new.market_interest {
            model.market_interest = Set(Some(v));
        }
        if let Some(v) = new.business_type {
            model.business_type = Set(Some(v));
        }

        let res = Waitlist::insert(model).exec(&self.conn).await?;
        let inserted = Waitlist::find_by_id(res.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("waitlist entry {}", res.last_insert_id))
            })?;

        info!("Waitlist signup #{}: {}", inserted.id, inserted.email);
        Ok(inserted)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Waitlist::find().count(&self.conn).await?)
    }
}
