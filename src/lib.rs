pub mod api;
pub mod config;
pub mod constants;
pub mod session;
pub mod store;
pub mod utils;

pub use api::{HttpApi, TournamentApi};
pub use config::{load_config, Config};
pub use session::SessionStorage;
pub use store::{AppState, AppStore};
pub use utils::{init_logger, ApiError};
