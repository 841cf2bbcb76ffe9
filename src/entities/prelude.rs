pub use super::alerts::Entity as Alerts;
pub use super::businesses::Entity as Businesses;
pub use super::tracked_areas::Entity as TrackedAreas;
pub use super::waitlist::Entity as Waitlist;
