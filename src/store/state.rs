use parking_lot::RwLock;

use crate::api::{Match, Team, Tournament, TournamentApi, User};

/// Snapshot of everything the UI renders: the signed-in user, the cached
/// entity collections and the shared loading/error pair.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub user: Option<User>,
    pub tournaments: Vec<Tournament>,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Shared application store. One instance per session, constructed over a
/// gateway and handed to whichever layer needs it; state changes only
/// through the mutation primitives below and consumers read detached
/// snapshots.
pub struct AppStore {
    pub(super) api: Box<dyn TournamentApi>,
    state: RwLock<AppState>,
}

impl AppStore {
    /// Create the store, seeding the user from the gateway's restored
    /// session.
    pub fn new(api: Box<dyn TournamentApi>) -> Self {
        let user = api.current_user();
        Self {
            api,
            state: RwLock::new(AppState {
                user,
                ..AppState::default()
            }),
        }
    }

    /// Fresh value copy of the current state. The backing cell is never
    /// handed out, so nothing outside this impl can write to it.
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    // Scalar mutations

    pub fn set_user(&self, user: Option<User>) {
        self.state.write().user = user;
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.state.write().is_loading = is_loading;
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.write().error = error;
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    // Tournament mutations

    pub fn set_tournaments(&self, tournaments: Vec<Tournament>) {
        self.state.write().tournaments = tournaments;
    }

    /// Append a freshly created tournament. An existing entry with the
    /// same server id is overwritten so ids stay unique.
    pub fn add_tournament(&self, tournament: Tournament) {
        let mut state = self.state.write();
        match state.tournaments.iter_mut().find(|t| t.id == tournament.id) {
            Some(existing) => *existing = tournament,
            None => state.tournaments.push(tournament),
        }
    }

    /// Replace the cached tournament with the same id; no-op when absent.
    pub fn replace_tournament(&self, tournament: Tournament) {
        let mut state = self.state.write();
        if let Some(existing) = state.tournaments.iter_mut().find(|t| t.id == tournament.id) {
            *existing = tournament;
        }
    }

    pub fn remove_tournament(&self, id: i64) {
        self.state.write().tournaments.retain(|t| t.id != id);
    }

    // Team mutations

    pub fn set_teams(&self, teams: Vec<Team>) {
        self.state.write().teams = teams;
    }

    pub fn add_team(&self, team: Team) {
        let mut state = self.state.write();
        match state.teams.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => *existing = team,
            None => state.teams.push(team),
        }
    }

    // Match mutations

    pub fn set_matches(&self, matches: Vec<Match>) {
        self.state.write().matches = matches;
    }

    pub fn add_match(&self, m: Match) {
        let mut state = self.state.write();
        match state.matches.iter_mut().find(|existing| existing.id == m.id) {
            Some(existing) => *existing = m,
            None => state.matches.push(m),
        }
    }

    /// Replace the cached match with the same id; no-op when absent.
    pub fn replace_match(&self, m: Match) {
        let mut state = self.state.write();
        if let Some(existing) = state.matches.iter_mut().find(|existing| existing.id == m.id) {
            *existing = m;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTournamentApi;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn store() -> AppStore {
        let mut api = MockTournamentApi::new();
        api.expect_current_user().returning(|| None);
        AppStore::new(Box::new(api))
    }

    fn tournament(id: i64, name: &str) -> Tournament {
        Tournament {
            id,
            name: name.to_string(),
            game: "chess".to_string(),
            description: None,
            max_teams: 8,
            prize_pool: 0,
            start_date: None,
            end_date: None,
            status: "pending".to_string(),
            organizer_id: 1,
            created_at: DateTime::UNIX_EPOCH,
        }
    }

    fn game_match(id: i64, score1: i32, score2: i32) -> Match {
        Match {
            id,
            tournament_id: 1,
            round: 1,
            team1_id: 10,
            team2_id: 20,
            score1,
            score2,
            winner_id: None,
            match_date: None,
            status: "scheduled".to_string(),
        }
    }

    #[test]
    fn seeds_the_user_from_the_gateway_session() {
        let mut api = MockTournamentApi::new();
        api.expect_current_user()
            .returning(|| Some(User::placeholder("alice")));
        let store = AppStore::new(Box::new(api));

        assert_eq!(
            store.snapshot().user.map(|u| u.username),
            Some("alice".to_string())
        );
    }

    #[test]
    fn snapshots_are_detached_copies() {
        let store = store();
        let before = store.snapshot();

        store.add_tournament(tournament(1, "Cup"));

        assert!(before.tournaments.is_empty());
        assert_eq!(store.snapshot().tournaments.len(), 1);
    }

    #[test]
    fn add_tournament_keeps_ids_unique() {
        let store = store();
        store.add_tournament(tournament(1, "Cup"));
        store.add_tournament(tournament(1, "Winter Cup"));

        let tournaments = store.snapshot().tournaments;
        assert_eq!(tournaments.len(), 1);
        assert_eq!(tournaments[0].name, "Winter Cup");
    }

    #[test]
    fn replace_tournament_ignores_unknown_ids() {
        let store = store();
        store.set_tournaments(vec![tournament(1, "Cup"), tournament(2, "Open")]);

        store.replace_tournament(tournament(99, "Ghost"));

        let tournaments = store.snapshot().tournaments;
        assert_eq!(tournaments.len(), 2);
        assert_eq!(tournaments[0].name, "Cup");
        assert_eq!(tournaments[1].name, "Open");
    }

    #[test]
    fn remove_tournament_removes_exactly_the_matching_entry() {
        let store = store();
        store.set_tournaments(vec![
            tournament(1, "Cup"),
            tournament(2, "Open"),
            tournament(3, "Invitational"),
        ]);

        store.remove_tournament(2);

        let ids: Vec<i64> = store.snapshot().tournaments.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn mutation_sequences_never_duplicate_ids() {
        let store = store();
        store.set_tournaments(vec![tournament(1, "Cup"), tournament(2, "Open")]);
        store.add_tournament(tournament(2, "Open II"));
        store.replace_tournament(tournament(1, "Cup Finals"));
        store.add_tournament(tournament(3, "Invitational"));
        store.remove_tournament(1);
        store.add_tournament(tournament(3, "Invitational II"));

        let tournaments = store.snapshot().tournaments;
        let mut ids: Vec<i64> = tournaments.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), tournaments.len());
    }

    #[test]
    fn replace_match_updates_only_the_matching_entry() {
        let store = store();
        store.set_matches(vec![game_match(1, 0, 0), game_match(2, 0, 0)]);

        store.replace_match(game_match(2, 3, 1));

        let matches = store.snapshot().matches;
        assert_eq!(matches[0].score1, 0);
        assert_eq!(matches[1].score1, 3);
        assert_eq!(matches[1].score2, 1);
    }

    #[test]
    fn replace_match_is_a_no_op_for_unknown_ids() {
        let store = store();
        store.set_matches(vec![game_match(1, 0, 0)]);

        store.replace_match(game_match(9, 5, 5));

        assert_eq!(store.snapshot().matches, vec![game_match(1, 0, 0)]);
    }

    #[test]
    fn error_mutations_hold_at_most_one_message() {
        let store = store();
        store.set_error(Some("first".to_string()));
        store.set_error(Some("second".to_string()));
        assert_eq!(store.snapshot().error.as_deref(), Some("second"));

        store.clear_error();
        assert!(store.snapshot().error.is_none());
    }
}
