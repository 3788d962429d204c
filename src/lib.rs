pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod roster;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Settings;
pub use models::{ChartKind, Features, TeamMember};
pub use persistence::{hydrate, load_or_default};
pub use roster::{Change, RosterStore};
pub use state::AppState;
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
