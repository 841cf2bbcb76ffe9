pub mod prelude;

pub mod alerts;
pub mod businesses;
pub mod tracked_areas;
pub mod waitlist;
