//! Demo seed data, matching what the dashboard ships client-side. Useful
//! for pointing the read endpoints at something real during development.

use anyhow::Result;
use tracing::info;

use super::{NewAlert, NewBusiness, NewSignup, NewTrackedArea, Store};

pub async fn seed_demo(store: &Store) -> Result<()> {
    let areas = [
        ("Downtown Austin", "Austin, TX"),
        ("South Congress", "Austin, TX"),
        ("The Domain", "Austin, TX"),
    ];

    for (name, location) in areas {
        store
            .create_tracked_area(NewTrackedArea {
                name: Some(name.to_string()),
                location: Some(location.to_string()),
            })
            .await?;
    }

    let businesses = [
        ("Blue Bottle Coffee", "123 Main St", "Coffee Shop", "active", 4.5, 234),
        ("Ramen Tatsu-ya", "456 S Congress Ave", "Restaurant", "active", 4.8, 1205),
        ("Joe's Pizza", "789 6th St", "Restaurant", "closed", 4.2, 89),
        ("Fitness First Gym", "321 Domain Dr", "Fitness", "active", 4.0, 156),
        ("Tech Hub Coworking", "555 Congress Ave", "Office Space", "active", 4.6, 78),
    ];

    let mut business_ids = Vec::new();
    for (name, address, category, status, rating, review_count) in businesses {
        let row = store
            .add_business(NewBusiness {
                name: name.to_string(),
                address: address.to_string(),
                category: Some(category.to_string()),
                status: Some(status.to_string()),
                rating: Some(rating),
                review_count: Some(review_count),
            })
            .await?;
        business_ids.push(row.id);
    }

    let alerts = [
        (
            Some(business_ids[0]),
            "new_business",
            "New Coffee Shop",
            "Blue Bottle Coffee opened at 123 Main St",
        ),
        (
            Some(business_ids[2]),
            "closure",
            "Restaurant Closed",
            "Joe's Pizza permanently closed",
        ),
        (
            Some(business_ids[3]),
            "rating_change",
            "Rating Drop",
            "Fitness First Gym dropped from 4.5 to 4.0 stars",
        ),
    ];

    for (business_id, alert_type, title, description) in alerts {
        store
            .create_alert(NewAlert {
                business_id,
                alert_type: Some(alert_type.to_string()),
                title: Some(title.to_string()),
                description: Some(description.to_string()),
            })
            .await?;
    }

    store
        .add_waitlist_entry(NewSignup {
            email: Some("demo@localpulse.dev".to_string()),
            market_interest: Some("Austin, TX".to_string()),
            business_type: Some("Coffee Shop".to_string()),
        })
        .await?;

    info!("Demo data seeded");
    Ok(())
}
