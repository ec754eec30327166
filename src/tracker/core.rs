use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::clock::{Clock, SystemClock, Timestamp};
use super::errors::TrackerError;
use super::game::{Game, GameState};
use super::player::{Player, PlayerConfig, PlayerView};

/// Behaviour switches for the tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerOptions {
    /// Subbing on a player who is already on commits their running time
    /// instead of restarting it from zero.
    pub resub_commits_time: bool,
}

/// Result of a per-player operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerUpdate {
    /// The player exists and was updated, returns their statistics afterwards
    Applied(PlayerView),
    /// No player by that name is on the roster; nothing changed
    UnknownPlayer,
}

impl PlayerUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, PlayerUpdate::Applied(_))
    }
}

/// Game and roster as seen at a single instant
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub game: Game,
    pub players: Vec<PlayerView>,
    pub taken_at: Timestamp,
}

impl Snapshot {
    pub fn state(&self) -> GameState {
        self.game.state()
    }

    pub fn game_elapsed(&self) -> Duration {
        self.game.elapsed(self.taken_at)
    }
}

#[derive(Debug, Default)]
struct Inner {
    game: Game,
    players: BTreeMap<String, Player>, // name -> player
}

impl Inner {
    fn reset_all(&mut self) {
        self.players.values_mut().for_each(Player::reset);
    }

    fn sub_off_all(&mut self, now: Timestamp) {
        for player in self.players.values_mut() {
            player.sub_off(now);
        }
    }

    fn views(&self, now: Timestamp) -> Vec<PlayerView> {
        // BTreeMap iterates in name order
        self.players.values().map(|p| p.view(now)).collect()
    }
}

/// Tracks the game clock and per-player play time.
///
/// Game and roster share one lock: every mutation, including the roster
/// sweeps inside game transitions, happens under a single write guard.
pub struct Tracker {
    clock: Arc<dyn Clock + Send + Sync>,
    options: TrackerOptions,
    inner: RwLock<Inner>,
}

impl Tracker {
    pub fn new(players: Vec<PlayerConfig>, options: TrackerOptions) -> Self {
        Self::with_clock(players, options, Arc::new(SystemClock))
    }

    pub fn with_clock(
        players: Vec<PlayerConfig>,
        options: TrackerOptions,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        let mut roster = BTreeMap::new();
        for config in players {
            let name = config.name.clone();
            if roster.insert(name.clone(), Player::from(config)).is_some() {
                warn!(player = %name, "Duplicate player in roster, keeping the last entry");
            }
        }

        Self {
            clock,
            options,
            inner: RwLock::new(Inner {
                game: Game::default(),
                players: roster,
            }),
        }
    }

    // Game

    /// Starts the game clock and zeroes every player's statistics.
    #[instrument(skip(self))]
    pub async fn start_game(&self) -> GameState {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        inner.game.open_period(now);
        inner.game.overall_start = Some(now);
        inner.game.overall_end = None;
        inner.reset_all();

        info!(periods = inner.game.periods.len(), "Game started");
        inner.game.state()
    }

    /// Stops the clock for the current period and subs everyone off.
    #[instrument(skip(self))]
    pub async fn pause_game(&self) -> Result<GameState, TrackerError> {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        if !inner.game.close_period(now) {
            warn!("Attempt to pause a game that has not started");
            return Err(TrackerError::InvalidGameTransition {
                action: "pause",
                state: inner.game.state(),
            });
        }
        inner.sub_off_all(now);

        info!(periods = inner.game.periods.len(), "Game paused");
        Ok(inner.game.state())
    }

    /// Opens a new period. Players stay off until subbed on again.
    #[instrument(skip(self))]
    pub async fn resume_game(&self) -> GameState {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        inner.sub_off_all(now);
        inner.game.open_period(now);

        info!(periods = inner.game.periods.len(), "Game resumed");
        inner.game.state()
    }

    /// Stops the clock for good. Statistics are kept.
    #[instrument(skip(self))]
    pub async fn end_game(&self) -> Result<GameState, TrackerError> {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        if !inner.game.close_period(now) {
            warn!("Attempt to end a game that has not started");
            return Err(TrackerError::InvalidGameTransition {
                action: "end",
                state: inner.game.state(),
            });
        }
        inner.game.overall_end = Some(now);
        inner.sub_off_all(now);

        info!(
            elapsed_ms = inner.game.elapsed(now).as_millis() as u64,
            "Game ended"
        );
        Ok(inner.game.state())
    }

    /// Clears the clock and zeroes every player's statistics.
    #[instrument(skip(self))]
    pub async fn reset_game(&self) -> GameState {
        let mut inner = self.inner.write().await;

        inner.game.clear();
        inner.reset_all();

        info!("Game reset");
        inner.game.state()
    }

    pub async fn state(&self) -> GameState {
        self.inner.read().await.game.state()
    }

    pub async fn game(&self) -> Game {
        self.inner.read().await.game.clone()
    }

    // Players

    /// All players sorted by name, with running play time projected to now.
    pub async fn list_players(&self) -> Vec<PlayerView> {
        let inner = self.inner.read().await;
        inner.views(self.clock.now())
    }

    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().await;
        let now = self.clock.now();

        Snapshot {
            game: inner.game.clone(),
            players: inner.views(now),
            taken_at: now,
        }
    }

    #[instrument(skip(self))]
    pub async fn player_reset(&self, name: &str) -> PlayerUpdate {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        match inner.players.get_mut(name) {
            Some(player) => {
                player.reset();
                debug!(player = %name, "Player reset");
                PlayerUpdate::Applied(player.view(now))
            }
            None => {
                warn!(player = %name, "Attempt to reset non-existent player");
                PlayerUpdate::UnknownPlayer
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn player_set(
        &self,
        name: &str,
        play_count: u32,
        play_duration: Duration,
    ) -> PlayerUpdate {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        match inner.players.get_mut(name) {
            Some(player) => {
                player.set(play_count, play_duration);
                debug!(player = %name, play_count, "Player statistics set");
                PlayerUpdate::Applied(player.view(now))
            }
            None => PlayerUpdate::UnknownPlayer,
        }
    }

    /// Bulk form of [`Tracker::player_set`], applied under one write guard.
    pub async fn player_set_many(
        &self,
        updates: &[(String, u32, Duration)],
    ) -> Vec<(String, PlayerUpdate)> {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        updates
            .iter()
            .map(|(name, play_count, play_duration)| {
                let update = match inner.players.get_mut(name) {
                    Some(player) => {
                        player.set(*play_count, *play_duration);
                        PlayerUpdate::Applied(player.view(now))
                    }
                    None => PlayerUpdate::UnknownPlayer,
                };
                (name.clone(), update)
            })
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn player_sub_on(&self, name: &str) -> PlayerUpdate {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();
        let commit_running = self.options.resub_commits_time;

        match inner.players.get_mut(name) {
            Some(player) => {
                if player.is_playing() && !commit_running {
                    debug!(player = %name, "Player already on, restarting play timer");
                }
                player.sub_on(now, commit_running);
                debug!(player = %name, play_count = player.play_count, "Player subbed on");
                PlayerUpdate::Applied(player.view(now))
            }
            None => {
                warn!(player = %name, "Attempt to sub on non-existent player");
                PlayerUpdate::UnknownPlayer
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn player_sub_off(&self, name: &str) -> PlayerUpdate {
        let mut inner = self.inner.write().await;
        let now = self.clock.now();

        match inner.players.get_mut(name) {
            Some(player) => {
                player.sub_off(now);
                debug!(player = %name, "Player subbed off");
                PlayerUpdate::Applied(player.view(now))
            }
            None => {
                warn!(player = %name, "Attempt to sub off non-existent player");
                PlayerUpdate::UnknownPlayer
            }
        }
    }
}
