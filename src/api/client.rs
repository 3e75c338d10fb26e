use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::warn;

use super::traits::TournamentApi;
use super::types::{
    Match, NewMatch, NewTeam, NewTournament, Page, Participation, RegisterRequest, Team,
    TokenResponse, Tournament, TournamentQuery, TournamentUpdate, User,
};
use crate::config::Config;
use crate::session::SessionStorage;
use crate::utils::ApiError;

/// HTTP gateway to the tournament service. Owns the bearer token and the
/// cached user identity; every other component reaches the network through
/// this object.
pub struct HttpApi {
    http: Client,
    base_url: String,
    storage: SessionStorage,
    token: RwLock<Option<String>>,
    user: RwLock<Option<User>>,
}

impl HttpApi {
    /// Build a gateway with storage resolved from the configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let storage = match &config.storage.dir {
            Some(dir) => SessionStorage::with_dir(dir),
            None => SessionStorage::new()?,
        };
        Self::with_storage(config, storage)
    }

    /// Build a gateway over an explicit storage, restoring any persisted
    /// session. Unreadable stored data loads as an absent field.
    pub fn with_storage(config: &Config, storage: SessionStorage) -> anyhow::Result<Self> {
        let token = storage.load_token();
        let user = storage.load_user();

        Ok(Self {
            http: Client::builder()
                .timeout(Duration::from_secs(config.api.timeout_secs))
                .build()?,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            storage,
            token: RwLock::new(token),
            user: RwLock::new(user),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when a session is active.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().as_ref() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn error_from(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::Server {
            status,
            detail: extract_detail(&body),
        }
    }

    /// Decode a success body, or map a non-success response to a server
    /// error carrying its detail message.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.json().await?)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<(), ApiError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}

/// Pull the human-readable `detail` field out of an error body.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_owned)
}

#[async_trait]
impl TournamentApi for HttpApi {
    // Auth endpoints

    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/token"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn register(&self, data: &RegisterRequest) -> Result<User, ApiError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(data)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn fetch_current_user(&self) -> Result<User, ApiError> {
        let response = self
            .authorize(self.http.get(self.url("/users/me")))
            .send()
            .await?;
        let user: User = Self::decode(response).await?;

        *self.user.write() = Some(user.clone());
        if let Err(err) = self.storage.save_user(&user) {
            warn!("failed to persist refreshed user: {}", err);
        }
        Ok(user)
    }

    fn set_auth(&self, token: String, user: User) {
        if let Err(err) = self.storage.save(&token, &user) {
            warn!("failed to persist session: {}", err);
        }
        *self.token.write() = Some(token);
        *self.user.write() = Some(user);
    }

    fn clear_auth(&self) {
        self.storage.clear();
        *self.token.write() = None;
        *self.user.write() = None;
    }

    fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    fn current_user(&self) -> Option<User> {
        self.user.read().clone()
    }

    // Tournament endpoints

    async fn list_tournaments(
        &self,
        query: &TournamentQuery,
    ) -> Result<Vec<Tournament>, ApiError> {
        let response = self
            .authorize(self.http.get(self.url("/tournaments")).query(query))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_tournament(&self, id: i64) -> Result<Tournament, ApiError> {
        let response = self
            .authorize(self.http.get(self.url(&format!("/tournaments/{}", id))))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_tournament(&self, data: &NewTournament) -> Result<Tournament, ApiError> {
        let response = self
            .authorize(self.http.post(self.url("/tournaments/")).json(data))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_tournament(
        &self,
        id: i64,
        data: &TournamentUpdate,
    ) -> Result<Tournament, ApiError> {
        let response = self
            .authorize(
                self.http
                    .put(self.url(&format!("/tournaments/{}", id)))
                    .json(data),
            )
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_tournament(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(&format!("/tournaments/{}", id))))
            .send()
            .await?;
        Self::ensure_success(response).await
    }

    // Team endpoints

    async fn list_teams(&self, page: &Page) -> Result<Vec<Team>, ApiError> {
        let response = self
            .authorize(self.http.get(self.url("/teams")).query(page))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_team(&self, data: &NewTeam) -> Result<Team, ApiError> {
        let response = self
            .authorize(self.http.post(self.url("/teams/")).json(data))
            .send()
            .await?;
        Self::decode(response).await
    }

    // Match endpoints

    async fn create_match(&self, data: &NewMatch) -> Result<Match, ApiError> {
        let response = self
            .authorize(self.http.post(self.url("/matches/")).json(data))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_match_score(
        &self,
        id: i64,
        score1: i32,
        score2: i32,
    ) -> Result<Match, ApiError> {
        let response = self
            .authorize(
                self.http
                    .put(self.url(&format!("/matches/{}/score", id)))
                    .query(&[("score1", score1), ("score2", score2)]),
            )
            .send()
            .await?;
        Self::decode(response).await
    }

    // Participation endpoints

    async fn register_for_tournament(
        &self,
        tournament_id: i64,
        team_id: i64,
    ) -> Result<Participation, ApiError> {
        let response = self
            .authorize(
                self.http
                    .post(self.url("/participations/"))
                    .json(&json!({ "tournament_id": tournament_id, "team_id": team_id })),
            )
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn tournament_participants(
        &self,
        tournament_id: i64,
    ) -> Result<Vec<Participation>, ApiError> {
        let response = self
            .authorize(
                self.http
                    .get(self.url(&format!("/tournaments/{}/participants", tournament_id))),
            )
            .send()
            .await?;
        Self::decode(response).await
    }
}
