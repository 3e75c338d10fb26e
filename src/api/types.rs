use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Minimal record standing in for the profile between the token grant
    /// and the authoritative /users/me fetch; only the username is real.
    pub fn placeholder(username: &str) -> Self {
        Self {
            id: 0,
            username: username.to_string(),
            email: String::new(),
            full_name: None,
            bio: None,
            is_active: true,
            is_admin: false,
            created_at: DateTime::UNIX_EPOCH,
        }
    }
}

/// A tournament as the server reports it. Status, organizer and creation
/// time are server-controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub game: String,
    pub description: Option<String>,
    pub max_teams: i32,
    pub prize_pool: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub organizer_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub tag: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A match between two teams. Winner and status are server-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub tournament_id: i64,
    pub round: i32,
    pub team1_id: i64,
    pub team2_id: i64,
    pub score1: i32,
    pub score2: i32,
    pub winner_id: Option<i64>,
    pub match_date: Option<DateTime<Utc>>,
    pub status: String,
}

/// A team's entry in a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub id: i64,
    pub tournament_id: i64,
    pub team_id: i64,
    pub registered_at: DateTime<Utc>,
    pub final_position: Option<i32>,
}

/// Response from the token endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Payload for POST /register.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Tournament creation payload; the server assigns id, status, organizer
/// and creation time.
#[derive(Debug, Clone, Serialize)]
pub struct NewTournament {
    pub name: String,
    pub game: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub max_teams: i32,
    pub prize_pool: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Partial tournament payload for PUT /tournaments/{id}; unset fields are
/// left out of the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TournamentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_teams: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_pool: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Team creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Match creation payload; the server derives winner and status.
#[derive(Debug, Clone, Serialize)]
pub struct NewMatch {
    pub tournament_id: i64,
    pub round: i32,
    pub team1_id: i64,
    pub team2_id: i64,
    pub score1: i32,
    pub score2: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_date: Option<DateTime<Utc>>,
}

/// Query parameters for the tournament listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TournamentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
}

/// Pagination window for plain listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_user_carries_only_the_username() {
        let user = User::placeholder("alice");
        assert_eq!(user.username, "alice");
        assert_eq!(user.id, 0);
        assert_eq!(user.email, "");
        assert!(user.is_active);
        assert!(!user.is_admin);
    }

    #[test]
    fn creation_payloads_omit_unset_fields() {
        let payload = NewTournament {
            name: "Cup".to_string(),
            game: "chess".to_string(),
            description: None,
            max_teams: 8,
            prize_pool: 0,
            start_date: None,
            end_date: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("start_date").is_none());
        assert_eq!(json["max_teams"], 8);
    }

    #[test]
    fn partial_update_serializes_only_set_fields() {
        let update = TournamentUpdate {
            prize_pool: Some(500),
            ..TournamentUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["prize_pool"], 500);
    }
}
