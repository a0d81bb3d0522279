use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::snapshot::Snapshot;

const HUD_MARGIN_X: u16 = 1;
const SEPARATOR: &str = " │ ";

/// Renders the one-line HUD at the bottom and returns the area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let status_area = inset_horizontal(status_area, HUD_MARGIN_X);

    let bonus_line = bonus_line(snapshot, theme);
    let bonus_width = u16::try_from(bonus_line.width()).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(bonus_width)])
            .areas(status_area);

    let compact = stats_width(snapshot, false) > usize::from(left.width);
    frame.render_widget(
        Paragraph::new(stats_line(snapshot, theme, compact))
            .alignment(Alignment::Left)
            .style(Style::default().fg(theme.hud_muted)),
        left,
    );
    frame.render_widget(
        Paragraph::new(bonus_line).alignment(Alignment::Right),
        right,
    );

    play_area
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

fn labels(compact: bool) -> (&'static str, &'static str) {
    if compact {
        ("S", "L")
    } else {
        ("Score", "Length")
    }
}

fn stats_line(snapshot: &Snapshot, theme: &Theme, compact: bool) -> Line<'static> {
    let (score_label, length_label) = labels(compact);
    let value = Style::default().fg(theme.hud_value);

    Line::from(vec![
        Span::raw(format!("{score_label}: ")),
        Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
        Span::raw(SEPARATOR),
        Span::styled(snapshot.level_label.clone(), value),
        Span::raw(SEPARATOR),
        Span::raw(format!("{length_label}: ")),
        Span::styled(snapshot.snake.len().to_string(), value),
    ])
}

fn stats_width(snapshot: &Snapshot, compact: bool) -> usize {
    let (score_label, length_label) = labels(compact);

    format!("{score_label}: {}", snapshot.score).width()
        + SEPARATOR.width()
        + snapshot.level_label.width()
        + SEPARATOR.width()
        + format!("{length_label}: {}", snapshot.snake.len()).width()
}

/// Banana countdown, empty while no banana is out.
fn bonus_line(snapshot: &Snapshot, theme: &Theme) -> Line<'static> {
    let Some(bonus) = snapshot.bonus else {
        return Line::default();
    };

    Line::from(vec![
        Span::styled("Banana ", Style::default().fg(theme.bonus)),
        Span::styled(
            format!("{}s", bonus.remaining_ms.div_ceil(1000)),
            Style::default()
                .fg(theme.hud_alert)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::{DEFAULT_BOARD, THEME_MEADOW};
    use crate::food::Bonus;
    use crate::game::Session;
    use crate::grid::Position;

    use super::{bonus_line, stats_width};

    #[test]
    fn compact_labels_are_narrower() {
        let session = Session::new_with_seed(DEFAULT_BOARD, 41);
        let snapshot = session.snapshot(Instant::now());

        assert!(stats_width(&snapshot, true) < stats_width(&snapshot, false));
        assert_eq!(
            stats_width(&snapshot, false),
            "Score: 0 │ level 1 │ Length: 1".chars().count()
        );
    }

    #[test]
    fn bonus_countdown_rounds_up_to_whole_seconds() {
        let start = Instant::now();
        let mut session = Session::new_with_seed(DEFAULT_BOARD, 42);
        session.bonus = Some(Bonus::new(Position::new(0, 0), start));

        let snapshot = session.snapshot(start + Duration::from_millis(2500));

        assert_eq!(bonus_line(&snapshot, &THEME_MEADOW).to_string(), "Banana 3s");
    }

    #[test]
    fn bonus_line_is_empty_without_banana() {
        let session = Session::new_with_seed(DEFAULT_BOARD, 43);
        let snapshot = session.snapshot(Instant::now());

        assert_eq!(bonus_line(&snapshot, &THEME_MEADOW).width(), 0);
    }
}
