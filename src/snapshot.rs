use std::time::{Duration, Instant};

use serde::Serialize;

use crate::collision::DeathReason;
use crate::config::{COUNTDOWN_DURATION, LEVEL_UP_DISPLAY};
use crate::game::{GameStatus, Session};
use crate::grid::{Board, Position, Rect};

/// Which screen the frontend should show.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    LevelUp,
    Countdown,
    GameOver,
}

/// A banana as seen by the frontend.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct BonusView {
    pub cell: Position,
    pub remaining_ms: u64,
}

/// Read-only picture of a session at one instant. Everything a renderer needs,
/// nothing it could use to change the game.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub screen: Screen,
    pub snake: Vec<Position>,
    /// Empty while the viper is not active.
    pub hazard: Vec<Position>,
    pub obstacles: Vec<Rect>,
    pub food: Position,
    pub bonus: Option<BonusView>,
    pub score: u32,
    pub level: u8,
    pub level_label: String,
    /// Level-up warning, only while the briefing is on screen.
    pub briefing: Option<&'static str>,
    /// Time left on the level-up briefing or the resume countdown.
    pub timer_remaining_ms: Option<u64>,
    pub tick_delay_ms: u64,
    pub death_reason: Option<DeathReason>,
}

impl Snapshot {
    /// Captures `session` as of `now`.
    #[must_use]
    pub fn capture(session: &Session, now: Instant) -> Self {
        let (screen, timer_remaining, death_reason) = match session.status {
            GameStatus::Menu => (Screen::Menu, None, None),
            GameStatus::Playing => (Screen::Playing, None, None),
            GameStatus::Paused => (Screen::Paused, None, None),
            GameStatus::LevelUp { since } => (
                Screen::LevelUp,
                Some(remaining(LEVEL_UP_DISPLAY, since, now)),
                None,
            ),
            GameStatus::Countdown { since } => (
                Screen::Countdown,
                Some(remaining(COUNTDOWN_DURATION, since, now)),
                None,
            ),
            GameStatus::GameOver { reason } => (Screen::GameOver, None, Some(reason)),
        };

        Self {
            board: session.board(),
            screen,
            snake: session.snake.segments().copied().collect(),
            hazard: session
                .hazard
                .as_ref()
                .map(|hazard| hazard.segments().copied().collect())
                .unwrap_or_default(),
            obstacles: session.obstacles.clone(),
            food: session.food.position,
            bonus: session.bonus.map(|bonus| BonusView {
                cell: bonus.position,
                remaining_ms: millis(bonus.remaining(now)),
            }),
            score: session.score,
            level: session.level.number(),
            level_label: session.level.to_string(),
            briefing: (screen == Screen::LevelUp).then(|| session.level.briefing()),
            timer_remaining_ms: timer_remaining.map(millis),
            tick_delay_ms: millis(session.tick_delay()),
            death_reason,
        }
    }

    /// Whole seconds left on the visible timer, rounded up so a countdown
    /// reads 3, 2, 1.
    #[must_use]
    pub fn timer_seconds(&self) -> Option<u64> {
        self.timer_remaining_ms.map(|ms| ms.div_ceil(1000))
    }
}

fn remaining(total: Duration, since: Instant, now: Instant) -> Duration {
    total.saturating_sub(now.saturating_duration_since(since))
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::DEFAULT_BOARD;
    use crate::food::{Bonus, Food};
    use crate::game::{GameStatus, Session};
    use crate::grid::Position;

    use super::Screen;

    #[test]
    fn menu_snapshot_shows_single_cell_snake_and_food() {
        let session = Session::new_with_seed(DEFAULT_BOARD, 21);

        let snapshot = session.snapshot(Instant::now());

        assert_eq!(snapshot.screen, Screen::Menu);
        assert_eq!(snapshot.snake, vec![DEFAULT_BOARD.center()]);
        assert!(snapshot.hazard.is_empty());
        assert_eq!(snapshot.level_label, "level 1");
        assert_eq!(snapshot.tick_delay_ms, 130);
        assert_eq!(snapshot.timer_remaining_ms, None);
    }

    #[test]
    fn countdown_snapshot_reports_remaining_time() {
        let start = Instant::now();
        let mut session = Session::new_with_seed(DEFAULT_BOARD, 22);
        session.status = GameStatus::Countdown { since: start };

        let snapshot = session.snapshot(start + Duration::from_millis(1200));

        assert_eq!(snapshot.screen, Screen::Countdown);
        assert_eq!(snapshot.timer_remaining_ms, Some(1800));
        assert_eq!(snapshot.timer_seconds(), Some(2));
        assert_eq!(snapshot.briefing, None);
    }

    #[test]
    fn bonus_snapshot_carries_lifetime_left() {
        let start = Instant::now();
        let mut session = Session::new_with_seed(DEFAULT_BOARD, 23);
        session.food = Food::new(Position::new(0, 0));
        session.bonus = Some(Bonus::new(Position::new(50, 50), start));

        let snapshot = session.snapshot(start + Duration::from_millis(4500));
        let bonus = snapshot.bonus.expect("banana is on the board");

        assert_eq!(bonus.cell, Position::new(50, 50));
        assert_eq!(bonus.remaining_ms, 500);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let session = Session::new_with_seed(DEFAULT_BOARD, 24);

        let json = serde_json::to_value(session.snapshot(Instant::now()))
            .expect("snapshot should serialize");

        assert_eq!(json["screen"], "Menu");
        assert_eq!(json["score"], 0);
        assert_eq!(json["board"]["cell_size"], 25);
        assert!(json["bonus"].is_null());
    }
}
