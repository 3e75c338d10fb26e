/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

// Durable session storage keys
pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

// Fallback messages used when an error response carries no detail field
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const LOAD_TOURNAMENTS_FAILED: &str = "Failed to load tournaments";
pub const LOAD_TOURNAMENT_FAILED: &str = "Failed to load tournament";
pub const CREATE_TOURNAMENT_FAILED: &str = "Failed to create tournament";
pub const UPDATE_TOURNAMENT_FAILED: &str = "Failed to update tournament";
pub const DELETE_TOURNAMENT_FAILED: &str = "Failed to delete tournament";
pub const LOAD_TEAMS_FAILED: &str = "Failed to load teams";
pub const CREATE_TEAM_FAILED: &str = "Failed to create team";
pub const CREATE_MATCH_FAILED: &str = "Failed to create match";
pub const UPDATE_SCORE_FAILED: &str = "Failed to update match score";
pub const REGISTER_TEAM_FAILED: &str = "Failed to register team";
pub const LOAD_PARTICIPANTS_FAILED: &str = "Failed to load participants";
