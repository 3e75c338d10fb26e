/// Application store module - Gateway

mod actions;
mod state;

pub use state::{AppState, AppStore};
