pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use router::location_routes;
pub use services::directory::LocationDirectory;
pub use services::seed::seeded_directory;
