use async_trait::async_trait;

use super::types::{
    Match, NewMatch, NewTeam, NewTournament, Page, Participation, RegisterRequest, Team,
    TokenResponse, Tournament, TournamentQuery, TournamentUpdate, User,
};
use crate::utils::ApiError;

/// Every remote operation the tournament service exposes. The store talks
/// to the service exclusively through this trait, so tests can substitute
/// a mock gateway for the HTTP implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TournamentApi: Send + Sync {
    /// Exchange credentials for a bearer token. Does not update the stored
    /// session; callers decide whether to keep the grant.
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError>;

    /// Create an account. Does not authenticate.
    async fn register(&self, data: &RegisterRequest) -> Result<User, ApiError>;

    /// Fetch the profile behind the current token, refreshing the cached
    /// and persisted user record as a side effect.
    async fn fetch_current_user(&self) -> Result<User, ApiError>;

    /// Store the session pair in memory and durable storage.
    fn set_auth(&self, token: String, user: User);

    /// Drop the session pair from memory and durable storage.
    fn clear_auth(&self);

    /// True iff a token is set.
    fn is_authenticated(&self) -> bool;

    /// The cached user identity, if a session is active.
    fn current_user(&self) -> Option<User>;

    // Tournaments
    async fn list_tournaments(&self, query: &TournamentQuery)
        -> Result<Vec<Tournament>, ApiError>;
    async fn get_tournament(&self, id: i64) -> Result<Tournament, ApiError>;
    async fn create_tournament(&self, data: &NewTournament) -> Result<Tournament, ApiError>;
    async fn update_tournament(
        &self,
        id: i64,
        data: &TournamentUpdate,
    ) -> Result<Tournament, ApiError>;
    async fn delete_tournament(&self, id: i64) -> Result<(), ApiError>;

    // Teams
    async fn list_teams(&self, page: &Page) -> Result<Vec<Team>, ApiError>;
    async fn create_team(&self, data: &NewTeam) -> Result<Team, ApiError>;

    // Matches
    async fn create_match(&self, data: &NewMatch) -> Result<Match, ApiError>;
    async fn update_match_score(&self, id: i64, score1: i32, score2: i32)
        -> Result<Match, ApiError>;

    // Participations
    async fn register_for_tournament(
        &self,
        tournament_id: i64,
        team_id: i64,
    ) -> Result<Participation, ApiError>;
    async fn tournament_participants(
        &self,
        tournament_id: i64,
    ) -> Result<Vec<Participation>, ApiError>;
}
