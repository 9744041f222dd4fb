//! Engine module - owns the complete game and drives the piece lifecycle
//!
//! Lifecycle: Spawning → Falling → Locking → Clearing → Spawning, with
//! Spawning → GameOver when a fresh piece collides at its spawn position.
//! Spawning, Locking and Clearing complete inside a single call, so the only
//! externally visible phases are `Playing` and `GameOver`.
//!
//! All mutation goes through `&mut Engine`; callers serialize timer fires and
//! player intents onto one thread of control and read snapshots in between.

use log::{debug, info, trace};
use serde::Serialize;

use crate::board::Board;
use crate::catalog::CatalogEntry;
use crate::config::{ConfigError, GameConfig};
use crate::piece::ActivePiece;
use crate::rng::PieceQueue;
use crate::scoring::{ScoreRules, ScoreState, SpeedRules};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::timer::{FallTimer, TimerHandle};
use crate::types::{GameAction, Phase};

/// Emitted after every lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    /// Rows fallen by the hard drop that caused the lock (0 for gravity locks)
    pub rows_dropped: u32,
    pub lines_cleared: u32,
    pub points: u64,
    /// Combo after this lock
    pub combo: u32,
    /// New fall interval when this lock crossed a speed threshold
    pub new_interval_ms: Option<u32>,
}

/// The game: board, active piece, next piece, score and fall timer
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    score_rules: ScoreRules,
    speed_rules: SpeedRules,
    board: Board,
    active: Option<ActivePiece>,
    queue: PieceQueue,
    score: ScoreState,
    phase: Phase,
    timer: FallTimer,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    last_event: Option<LockEvent>,
}

impl Engine {
    /// Validate `config`, build an empty board and spawn the first piece
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let board = Board::new(config.rows, config.cols);
        Self::with_board(config, board)
    }

    /// Start from a prepared board whose dimensions match `config`
    pub fn with_board(config: GameConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.rows() != config.rows || board.cols() != config.cols {
            return Err(ConfigError::BoardMismatch {
                rows: config.rows,
                cols: config.cols,
                board_rows: board.rows(),
                board_cols: board.cols(),
            });
        }

        let catalog = config.catalog()?;
        let speed_rules = config.speed_rules();
        let mut engine = Self {
            score_rules: config.score_rules(),
            speed_rules,
            board,
            active: None,
            queue: PieceQueue::new(catalog, config.seed, config.lookahead),
            score: ScoreState::new(&speed_rules),
            phase: Phase::Playing,
            timer: FallTimer::new(speed_rules.initial_ms),
            episode_id: 0,
            last_event: None,
            config,
        };
        engine.timer.schedule(speed_rules.initial_ms);
        engine.spawn_piece();
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Lookahead piece, when enabled
    pub fn next(&self) -> Option<&CatalogEntry> {
        self.queue.peek()
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn combo(&self) -> u32 {
        self.score.combo()
    }

    pub fn lines(&self) -> u32 {
        self.score.lines()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.score.fall_interval_ms()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn fall_timer(&self) -> &FallTimer {
        &self.timer
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Apply a player intent; returns true if state changed.
    ///
    /// While the game is over, everything but `Restart` is discarded.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.is_game_over() && action != GameAction::Restart {
            trace!("discarding {} while game over", action.as_str());
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_shift(-1),
            GameAction::MoveRight => self.try_shift(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    fn try_shift(&mut self, d_col: i32) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.try_move(&self.board, 0, d_col),
            None => false,
        }
    }

    fn try_rotate(&mut self) -> bool {
        match self.active.as_mut() {
            Some(piece) => piece.try_rotate(&self.board),
            None => false,
        }
    }

    /// One step down; locks the piece when it cannot move.
    ///
    /// Returns true if anything changed (a move or a lock).
    pub fn soft_drop(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        if piece.try_move(&self.board, 1, 0) {
            return true;
        }
        let piece = *piece;
        self.active = None;
        self.lock_piece(piece, 0);
        true
    }

    /// One fall-timer tick: identical to a soft drop
    pub fn tick(&mut self) -> bool {
        self.soft_drop()
    }

    /// Drop the active piece to its resting row and lock it
    pub fn hard_drop(&mut self) -> Option<LockEvent> {
        if self.is_game_over() {
            return None;
        }
        let mut piece = self.active.take()?;
        let fallen = piece.hard_drop(&self.board);
        Some(self.lock_piece(piece, fallen))
    }

    /// Feed elapsed time to the fall timer and run every due tick.
    ///
    /// Returns the number of ticks run. Stops early when a tick reschedules
    /// or cancels the timer.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.timer.accumulate(elapsed_ms);
        let mut ticks = 0;
        while self.timer.take_due() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    /// Fire delivered by an external scheduler; stale handles are ignored
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if !self.timer.is_current(handle) {
            trace!("ignoring stale timer generation {}", handle.generation);
            return false;
        }
        self.tick()
    }

    /// Reset board and score, re-arm the timer and spawn a fresh piece
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = ScoreState::new(&self.speed_rules);
        self.active = None;
        self.queue.reset();
        self.last_event = None;
        self.phase = Phase::Playing;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.timer.schedule(self.speed_rules.initial_ms);
        info!("restart: episode {}", self.episode_id);
        self.spawn_piece();
    }

    /// Locking → Clearing → Spawning. The piece is consumed.
    fn lock_piece(&mut self, piece: ActivePiece, rows_dropped: u32) -> LockEvent {
        self.board.lock(&piece.shape, piece.row, piece.col, piece.color);

        let lines = self.board.clear_full_rows() as u32;
        let outcome = self.score.apply_clear(&self.score_rules, lines);
        let new_interval_ms = self.score.apply_speed(&self.speed_rules);

        if lines > 0 {
            debug!(
                "locked {:?} at ({}, {}): cleared {} for {} points, combo {}",
                piece.kind, piece.row, piece.col, lines, outcome.points, outcome.combo
            );
        } else {
            debug!("locked {:?} at ({}, {})", piece.kind, piece.row, piece.col);
        }

        if let Some(interval) = new_interval_ms {
            info!("speed up: fall interval {}ms", interval);
            self.timer.schedule(interval);
        }

        let event = LockEvent {
            rows_dropped,
            lines_cleared: lines,
            points: outcome.points,
            combo: outcome.combo,
            new_interval_ms,
        };
        self.last_event = Some(event);

        self.spawn_piece();
        event
    }

    /// Spawning: draw, place, and detect a blocked spawn
    fn spawn_piece(&mut self) {
        let entry = self.queue.draw();
        let piece = ActivePiece::spawn(entry, &self.board);

        if piece.collides(&self.board) {
            self.phase = Phase::GameOver;
            self.active = None;
            self.timer.cancel();
            info!(
                "game over: {:?} blocked at spawn, score {}",
                piece.kind,
                self.score.score()
            );
            return;
        }

        self.active = Some(piece);
    }

    /// Write the current state into `out`, reusing its allocation
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.board.rows();
        out.cols = self.board.cols();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.active.map(|p| p.ghost_row(&self.board));
        out.next = self.queue.peek().copied().map(NextSnapshot::from);
        out.score = self.score.score();
        out.combo = self.score.combo();
        out.lines = self.score.lines();
        out.fall_interval_ms = self.score.fall_interval_ms();
        out.phase = self.phase;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, PieceKind, Rgb};

    const GRAY: Rgb = Rgb::new(100, 100, 100);

    fn only(kind: PieceKind) -> GameConfig {
        GameConfig {
            pieces: vec![kind],
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_new_engine_spawns_piece() {
        let engine = Engine::new(GameConfig::default()).unwrap();
        assert_eq!(engine.phase(), Phase::Playing);
        assert!(engine.active().is_some());
        assert!(engine.next().is_some());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.fall_interval_ms(), 500);
        assert!(engine.fall_timer().is_armed());
    }

    #[test]
    fn test_no_lookahead_has_no_next() {
        let config = GameConfig {
            lookahead: false,
            ..GameConfig::default()
        };
        let engine = Engine::new(config).unwrap();
        assert!(engine.next().is_none());
        assert!(engine.snapshot().next.is_none());
    }

    #[test]
    fn test_next_piece_becomes_active() {
        let mut engine = Engine::new(GameConfig::default()).unwrap();
        for _ in 0..5 {
            let next = *engine.next().unwrap();
            engine.hard_drop().unwrap();
            if engine.is_game_over() {
                break;
            }
            assert_eq!(engine.active().unwrap().kind, next.kind);
        }
    }

    #[test]
    fn test_tick_moves_down_then_locks() {
        let mut engine = Engine::new(only(PieceKind::O)).unwrap();
        for _ in 0..18 {
            assert!(engine.tick());
        }
        assert_eq!(engine.active().unwrap().row, 18);
        assert!(engine.take_last_event().is_none());

        // Blocked: this tick locks and respawns.
        assert!(engine.tick());
        let event = engine.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(engine.board().occupied_count(), 4);
        assert_eq!(engine.active().unwrap().row, 0);
    }

    #[test]
    fn test_hard_drop_reports_rows() {
        let mut engine = Engine::new(only(PieceKind::I)).unwrap();
        let event = engine.hard_drop().unwrap();
        assert_eq!(event.rows_dropped, 19);
        assert!(engine.board().is_occupied(19, 3));
        assert!(engine.board().is_occupied(19, 6));
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let mut engine = Engine::new(only(PieceKind::O)).unwrap();
        assert_eq!(engine.advance(499), 0);
        assert_eq!(engine.advance(1), 1);
        assert_eq!(engine.active().unwrap().row, 1);
        assert_eq!(engine.advance(1000), 2);
        assert_eq!(engine.active().unwrap().row, 3);
    }

    #[test]
    fn test_on_timer_ignores_stale_handle() {
        let mut engine = Engine::new(only(PieceKind::O)).unwrap();
        let handle = engine.fall_timer().handle().unwrap();
        assert!(engine.on_timer(handle));

        engine.restart();
        assert!(!engine.on_timer(handle));
        let fresh = engine.fall_timer().handle().unwrap();
        assert!(engine.on_timer(fresh));
    }

    #[test]
    fn test_line_clear_scores_and_combo() {
        let mut board = Board::default();
        for col in 0..10 {
            if col != 4 && col != 5 {
                board.set(19, col, Cell::Occupied(GRAY));
                board.set(18, col, Cell::Occupied(GRAY));
            }
        }
        let mut engine = Engine::with_board(only(PieceKind::O), board).unwrap();

        let event = engine.hard_drop().unwrap();
        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.points, 200);
        assert_eq!(engine.combo(), 1);
        assert_eq!(engine.board().occupied_count(), 0);

        // Nothing cleared: combo resets.
        let event = engine.hard_drop().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.score(), 200);
    }

    #[test]
    fn test_speed_change_reschedules_timer() {
        let mut board = Board::default();
        for col in 2..10 {
            board.set(19, col, Cell::Occupied(GRAY));
            board.set(18, col, Cell::Occupied(GRAY));
        }
        let config = GameConfig {
            speed_score_step: 100,
            ..only(PieceKind::O)
        };
        let mut engine = Engine::with_board(config, board).unwrap();
        let before = engine.fall_timer().handle().unwrap();

        // Slide the O into the two-column gap on the left.
        assert!(engine.apply_action(GameAction::MoveLeft));
        while engine.apply_action(GameAction::MoveLeft) {}
        let event = engine.hard_drop().unwrap();

        assert_eq!(event.lines_cleared, 2);
        // 200 points crosses two 100-point steps: 500 → 450 → 405.
        assert_eq!(event.new_interval_ms, Some(405));
        assert_eq!(engine.fall_timer().interval_ms(), 405);
        assert!(!engine.fall_timer().is_current(before));
    }

    #[test]
    fn test_game_over_cancels_timer_and_discards_intents() {
        let mut board = Board::default();
        for row in 1..20 {
            for col in 0..10 {
                if col != 0 {
                    board.set(row, col, Cell::Occupied(GRAY));
                }
            }
        }
        // T at row 0 has its stem at row 1, col 5.
        let mut engine = Engine::with_board(only(PieceKind::T), board).unwrap();
        assert!(engine.is_game_over());
        assert!(engine.active().is_none());
        assert!(!engine.fall_timer().is_armed());

        assert!(!engine.apply_action(GameAction::MoveLeft));
        assert!(!engine.apply_action(GameAction::HardDrop));
        assert_eq!(engine.advance(10_000), 0);

        assert!(engine.apply_action(GameAction::Restart));
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.board().occupied_count(), 0);
        assert_eq!(engine.episode_id(), 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let engine = Engine::new(only(PieceKind::T)).unwrap();
        let snap = engine.snapshot();
        assert_eq!(snap.cells.len(), 200);
        let active = snap.active.unwrap();
        assert_eq!((active.row, active.col), (0, 4));
        assert_eq!(snap.ghost_row, Some(18));
        assert_eq!(snap.next.unwrap().kind, PieceKind::T);
        assert!(snap.playable());
    }
}
