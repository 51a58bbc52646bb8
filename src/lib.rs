pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod page;
pub mod phone;
pub mod state;
pub mod submit;
pub mod timezone;
pub mod ui;
pub mod weekday;

pub use app::router;
pub use config::Settings;
pub use page::Page;
pub use state::AppState;
pub use submit::{SubscribeClient, submit};
pub use timezone::{ClientTimezone, FixedTimezone, SystemTimezone, TimezoneDetector};
