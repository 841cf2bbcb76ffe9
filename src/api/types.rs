use serde::Serialize;

use crate::entities::{alerts, businesses, tracked_areas, waitlist};

/// Response envelope shared by every JSON endpoint. Absent fields are left
/// off the wire entirely, so a success body is `{"data": ...}` and a
/// failure body is `{"error": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: None,
            error: Some(message.into()),
        }
    }
}

/// The business fields joined into an alert at read time.
#[derive(Debug, Serialize, Clone)]
pub struct BusinessRefDto {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct AlertDto {
    pub id: i32,
    pub business_id: Option<i32>,
    pub alert_type: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub businesses: Option<BusinessRefDto>,
}

impl From<(alerts::Model, Option<businesses::Model>)> for AlertDto {
    fn from((alert, business): (alerts::Model, Option<businesses::Model>)) -> Self {
        Self {
            id: alert.id,
            business_id: alert.business_id,
            alert_type: alert.alert_type,
            title: alert.title,
            description: alert.description,
            created_at: alert.created_at,
            businesses: business.map(|b| BusinessRefDto {
                name: b.name,
                address: b.address,
            }),
        }
    }
}

impl From<alerts::Model> for AlertDto {
    fn from(alert: alerts::Model) -> Self {
        Self::from((alert, None))
    }
}

#[derive(Debug, Serialize)]
pub struct TrackedAreaDto {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub last_scan: Option<String>,
    pub created_at: String,
}

impl From<tracked_areas::Model> for TrackedAreaDto {
    fn from(area: tracked_areas::Model) -> Self {
        Self {
            id: area.id,
            name: area.name,
            location: area.location,
            last_scan: area.last_scan,
            created_at: area.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WaitlistEntryDto {
    pub id: i32,
    pub email: String,
    pub market_interest: Option<String>,
    pub business_type: Option<String>,
    pub created_at: String,
}

impl From<waitlist::Model> for WaitlistEntryDto {
    fn from(entry: waitlist::Model) -> Self {
        Self {
            id: entry.id,
            email: entry.email,
            market_interest: entry.market_interest,
            business_type: entry.business_type,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub tracked_areas: u64,
    pub businesses: u64,
    pub alerts: u64,
    pub waitlist_signups: u64,
}
