// Gateway module for the remote service - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod traits;
mod types;

// Public re-exports - the ONLY way to access the service client
pub use client::HttpApi;
pub use traits::TournamentApi;
pub use types::{
    Match, NewMatch, NewTeam, NewTournament, Page, Participation, RegisterRequest, Team,
    TokenResponse, Tournament, TournamentQuery, TournamentUpdate, User,
};

#[cfg(test)]
pub use traits::MockTournamentApi;
