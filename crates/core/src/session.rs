//! Session module - one game plus the high score boundary
//!
//! [`Session`] owns a [`GameState`] and the host's [`KeyValueStore`]. It forwards ticks and
//! commands, reloads the record whenever a game starts and, on the transition into game
//! over, persists a score that beats the record. Store failures never reach the game: a
//! failed write only means the record is not remembered.

use crate::game_state::GameState;
use crate::snapshot::GameSnapshot;
use crate::store::{
    HighScoreRecord, KeyValueStore, KEY_HIGH_SCORE, KEY_HIGH_SCORE_COUNTRY, KEY_HIGH_SCORE_NAME,
};
use crate::types::{GameAction, SessionState, ANONYMOUS_NAME};

#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    game: GameState,
    store: S,
    record: HighScoreRecord,
    /// A new record was set and its holder has not been entered yet
    record_pending: bool,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(seed: u32, store: S) -> Self {
        let record = HighScoreRecord::load(&store);
        Self {
            game: GameState::new(seed),
            store,
            record,
            record_pending: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn state(&self) -> SessionState {
        self.game.state()
    }

    pub fn record(&self) -> &HighScoreRecord {
        &self.record
    }

    pub fn is_record_pending(&self) -> bool {
        self.record_pending
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Forward a UI command; returns true if it changed the game
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> bool {
        let was_over = self.game.is_game_over();
        let changed = self.game.apply_action(action, now_ms);

        if changed && action == GameAction::Start {
            self.record = HighScoreRecord::load(&self.store);
            self.record_pending = false;
            return true;
        }

        if !was_over {
            self.check_game_over();
        }
        changed
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        let was_over = self.game.is_game_over();
        let changed = self.game.tick(now_ms);
        if !was_over {
            self.check_game_over();
        }
        changed
    }

    /// Persist the score if this game just ended above the record
    fn check_game_over(&mut self) {
        if !self.game.is_game_over() {
            return;
        }

        let score = self.game.score();
        if score <= self.record.score {
            return;
        }

        // Best effort: the in-memory record still updates if a write fails. The previous
        // holder stays blank until the new one is named.
        let _ = self.store.set(KEY_HIGH_SCORE, &score.to_string());
        let _ = self.store.set(KEY_HIGH_SCORE_NAME, "");
        let _ = self.store.set(KEY_HIGH_SCORE_COUNTRY, "");
        self.record = HighScoreRecord {
            score,
            name: None,
            country: None,
        };
        self.record_pending = true;
    }

    /// Name the holder of the pending record.
    ///
    /// Both fields are trimmed; an empty name becomes the anonymous placeholder and an empty
    /// country is stored empty. Returns false if no record is pending.
    pub fn submit_record_holder(&mut self, name: &str, country: &str) -> bool {
        if !self.record_pending {
            return false;
        }

        let name = match name.trim() {
            "" => ANONYMOUS_NAME,
            trimmed => trimmed,
        };
        let country = country.trim();

        let _ = self.store.set(KEY_HIGH_SCORE_NAME, name);
        let _ = self.store.set(KEY_HIGH_SCORE_COUNTRY, country);

        self.record.name = Some(name.to_string());
        self.record.country = (!country.is_empty()).then(|| country.to_string());
        self.record_pending = false;
        true
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
        out.high_score = self.record.score;
        out.record_pending = self.record_pending;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}
