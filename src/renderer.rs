use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_PLAYFIELD, COLUMNS_PER_CELL, GLYPH_BONUS, GLYPH_FOOD, GLYPH_HEAD, GLYPH_OBSTACLE,
    GLYPH_SEGMENT, Theme,
};
use crate::grid::{Board, Position};
use crate::snapshot::{Screen, Snapshot};
use crate::ui::hud::render_hud;
use crate::ui::menu::{
    render_countdown, render_game_over_menu, render_level_up, render_pause_menu,
    render_start_menu,
};

/// Renders the full game frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, theme: &Theme) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, theme);
    let board_area = centered_board(play_area, snapshot.board);

    let block = Block::bordered()
        .border_set(BORDER_PLAYFIELD)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    if snapshot.screen == Screen::Menu {
        render_start_menu(frame, board_area, theme);
        return;
    }

    render_obstacles(frame, inner, snapshot, theme);
    render_collectibles(frame, inner, snapshot, theme);
    render_hazard(frame, inner, snapshot, theme);
    render_snake(frame, inner, snapshot, theme);

    match snapshot.screen {
        Screen::Paused => render_pause_menu(frame, board_area, theme),
        Screen::LevelUp => render_level_up(frame, board_area, snapshot, theme),
        Screen::Countdown => render_countdown(frame, board_area, snapshot, theme),
        Screen::GameOver => render_game_over_menu(frame, board_area, snapshot, theme),
        Screen::Menu | Screen::Playing => {}
    }
}

/// Returns the bordered board rectangle centered in `area`, clipped to fit.
fn centered_board(area: Rect, board: Board) -> Rect {
    let columns = u16::try_from(board.columns()).unwrap_or(u16::MAX);
    let rows = u16::try_from(board.rows()).unwrap_or(u16::MAX);
    let width = columns.saturating_mul(COLUMNS_PER_CELL).saturating_add(2);
    let height = rows.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board_area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    board_area
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let style = Style::new().fg(theme.obstacle);
    let buffer = frame.buffer_mut();

    for obstacle in &snapshot.obstacles {
        for cell in obstacle.cells(snapshot.board.cell_size) {
            if let Some((x, y)) = logical_to_terminal(inner, snapshot.board, cell) {
                buffer.set_string(x, y, GLYPH_OBSTACLE, style);
            }
        }
    }
}

fn render_collectibles(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();

    if let Some((x, y)) = logical_to_terminal(inner, snapshot.board, snapshot.food) {
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
    }

    if let Some(bonus) = snapshot.bonus {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.board, bonus.cell) {
            buffer.set_string(
                x,
                y,
                GLYPH_BONUS,
                Style::new().fg(theme.bonus).add_modifier(Modifier::BOLD),
            );
        }
    }
}

fn render_hazard(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();

    for (index, segment) in snapshot.hazard.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.board, *segment) else {
            continue;
        };
        let color = if index == 0 {
            theme.hazard_head
        } else {
            theme.hazard_body
        };
        buffer.set_string(x, y, GLYPH_SEGMENT, Style::new().fg(color));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();

    // Tail first so the head wins when it overlaps the body on a fatal tick.
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.board, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SEGMENT, Style::new().fg(theme.snake_body));
        }
    }
}

/// Maps a board position to the terminal cell of its left column, or `None`
/// when it lies off the board or outside `inner`.
fn logical_to_terminal(inner: Rect, board: Board, position: Position) -> Option<(u16, u16)> {
    if !position.is_within(board) {
        return None;
    }

    let column = u16::try_from(position.x / board.cell_size).ok()?;
    let row = u16::try_from(position.y / board.cell_size).ok()?;

    let x = inner
        .x
        .saturating_add(column.saturating_mul(COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
