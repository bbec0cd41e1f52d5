mod catalogue;
mod health;
mod sky;

pub use catalogue::catalogue_summary;
pub use health::health_check;
pub use sky::{sky_for_address, sky_for_observer};
