pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;

pub use app::router;
pub use config::SchedulerConfig;
pub use schedule::Scheduler;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
