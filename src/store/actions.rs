use crate::api::{
    Match, NewMatch, NewTeam, NewTournament, Page, Participation, RegisterRequest, Team,
    Tournament, TournamentQuery, TournamentUpdate, User,
};
use crate::constants::{
    CREATE_MATCH_FAILED, CREATE_TEAM_FAILED, CREATE_TOURNAMENT_FAILED, DELETE_TOURNAMENT_FAILED,
    LOAD_PARTICIPANTS_FAILED, LOAD_TEAMS_FAILED, LOAD_TOURNAMENTS_FAILED, LOAD_TOURNAMENT_FAILED,
    LOGIN_FAILED, REGISTER_TEAM_FAILED, REGISTRATION_FAILED, UPDATE_SCORE_FAILED,
    UPDATE_TOURNAMENT_FAILED,
};
use crate::store::state::AppStore;
use crate::utils::ApiError;

/// Asynchronous actions. Every action follows the same contract: raise the
/// loading flag, clear the previous error, call the gateway, apply the
/// matching mutation on success or record a message on failure, then drop
/// the loading flag no matter how the call went. Load-style actions swallow
/// their error after recording it; mutating actions hand it back so the
/// caller can react.
impl AppStore {
    /// Record the most recent failure for UI display.
    fn fail(&self, err: &ApiError, fallback: &str) {
        let message = err.detail().unwrap_or(fallback).to_string();
        self.set_error(Some(message));
    }

    /// Sign in and establish a session. Returns whether it worked; the
    /// failure message lands in the error field instead of propagating.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        self.set_loading(true);
        self.clear_error();

        let ok = match self.establish_session(username, password).await {
            Ok(()) => true,
            Err(err) => {
                self.fail(&err, LOGIN_FAILED);
                false
            }
        };

        self.set_loading(false);
        ok
    }

    /// Token grant, placeholder session, then the authoritative profile.
    /// The placeholder represents the session only until /users/me answers
    /// and the real record overwrites it.
    async fn establish_session(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let grant = self.api.login(username, password).await?;
        self.api
            .set_auth(grant.access_token, User::placeholder(username));

        let user = self.api.fetch_current_user().await?;
        self.set_user(Some(user));
        Ok(())
    }

    /// Create an account, then sign in with the same credentials. A failed
    /// registration returns false without attempting the login; a failed
    /// login leaves its own message in the error field.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> bool {
        self.set_loading(true);
        self.clear_error();

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.map(str::to_owned),
        };
        let ok = match self.api.register(&request).await {
            Ok(_) => self.login(username, password).await,
            Err(err) => {
                self.fail(&err, REGISTRATION_FAILED);
                false
            }
        };

        self.set_loading(false);
        ok
    }

    /// Drop the session and every cached collection. Loading and error are
    /// left alone.
    pub fn logout(&self) {
        self.api.clear_auth();
        self.set_user(None);
        self.set_tournaments(Vec::new());
        self.set_teams(Vec::new());
        self.set_matches(Vec::new());
    }

    /// Replace the tournament collection, optionally filtered by game. On
    /// failure the previous collection stays put and the error is recorded.
    pub async fn load_tournaments(&self, game: Option<&str>) {
        self.set_loading(true);
        self.clear_error();

        let query = TournamentQuery {
            game: game.map(str::to_owned),
            ..TournamentQuery::default()
        };
        match self.api.list_tournaments(&query).await {
            Ok(tournaments) => self.set_tournaments(tournaments),
            Err(err) => self.fail(&err, LOAD_TOURNAMENTS_FAILED),
        }

        self.set_loading(false);
    }

    /// Fetch a single tournament without touching the cached collection.
    pub async fn load_tournament(&self, id: i64) -> Result<Tournament, ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self.api.get_tournament(id).await;
        if let Err(err) = &result {
            self.fail(err, LOAD_TOURNAMENT_FAILED);
        }

        self.set_loading(false);
        result
    }

    /// Create a tournament and append it to the cached collection.
    pub async fn create_tournament(&self, data: &NewTournament) -> Result<Tournament, ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self.api.create_tournament(data).await;
        match &result {
            Ok(tournament) => self.add_tournament(tournament.clone()),
            Err(err) => self.fail(err, CREATE_TOURNAMENT_FAILED),
        }

        self.set_loading(false);
        result
    }

    /// Update a tournament and refresh its cached entry.
    pub async fn update_tournament(
        &self,
        id: i64,
        data: &TournamentUpdate,
    ) -> Result<Tournament, ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self.api.update_tournament(id, data).await;
        match &result {
            Ok(tournament) => self.replace_tournament(tournament.clone()),
            Err(err) => self.fail(err, UPDATE_TOURNAMENT_FAILED),
        }

        self.set_loading(false);
        result
    }

    /// Delete a tournament and drop it from the cached collection.
    pub async fn delete_tournament(&self, id: i64) -> Result<(), ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self.api.delete_tournament(id).await;
        match &result {
            Ok(()) => self.remove_tournament(id),
            Err(err) => self.fail(err, DELETE_TOURNAMENT_FAILED),
        }

        self.set_loading(false);
        result
    }

    /// Replace the team collection.
    pub async fn load_teams(&self) {
        self.set_loading(true);
        self.clear_error();

        match self.api.list_teams(&Page::default()).await {
            Ok(teams) => self.set_teams(teams),
            Err(err) => self.fail(&err, LOAD_TEAMS_FAILED),
        }

        self.set_loading(false);
    }

    /// Create a team and append it to the cached collection.
    pub async fn create_team(&self, data: &NewTeam) -> Result<Team, ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self.api.create_team(data).await;
        match &result {
            Ok(team) => self.add_team(team.clone()),
            Err(err) => self.fail(err, CREATE_TEAM_FAILED),
        }

        self.set_loading(false);
        result
    }

    /// Record a match and append it to the cached collection.
    pub async fn create_match(&self, data: &NewMatch) -> Result<Match, ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self.api.create_match(data).await;
        match &result {
            Ok(m) => self.add_match(m.clone()),
            Err(err) => self.fail(err, CREATE_MATCH_FAILED),
        }

        self.set_loading(false);
        result
    }

    /// Submit a score and refresh the cached match entry.
    pub async fn update_match_score(
        &self,
        id: i64,
        score1: i32,
        score2: i32,
    ) -> Result<Match, ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self.api.update_match_score(id, score1, score2).await;
        match &result {
            Ok(m) => self.replace_match(m.clone()),
            Err(err) => self.fail(err, UPDATE_SCORE_FAILED),
        }

        self.set_loading(false);
        result
    }

    /// Enter a team into a tournament. Returns the participation record
    /// without touching any cached collection.
    pub async fn register_team_for_tournament(
        &self,
        tournament_id: i64,
        team_id: i64,
    ) -> Result<Participation, ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self
            .api
            .register_for_tournament(tournament_id, team_id)
            .await;
        if let Err(err) = &result {
            self.fail(err, REGISTER_TEAM_FAILED);
        }

        self.set_loading(false);
        result
    }

    /// Fetch a tournament's participant list without caching it.
    pub async fn load_tournament_participants(
        &self,
        tournament_id: i64,
    ) -> Result<Vec<Participation>, ApiError> {
        self.set_loading(true);
        self.clear_error();

        let result = self.api.tournament_participants(tournament_id).await;
        if let Err(err) = &result {
            self.fail(err, LOAD_PARTICIPANTS_FAILED);
        }

        self.set_loading(false);
        result
    }
}
