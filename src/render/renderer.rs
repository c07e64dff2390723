use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CellClass, GameOverCause, Snapshot};
use crate::metrics::GameMetrics;

/// What the header should say about the previous game, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastGame {
    pub cause: GameOverCause,
    pub final_score: u32,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
        last_game: Option<LastGame>,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics, last_game), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];
        frame.render_widget(self.render_grid(snapshot, paused), game_area);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot, paused: bool) -> Paragraph<'static> {
        let lines: Vec<Line> = (0..snapshot.rows)
            .map(|row| {
                let spans: Vec<Span> = snapshot
                    .row_cells(row)
                    .map(|cell| match snapshot.cell_class(cell) {
                        CellClass::Snake if cell == snapshot.head => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        CellClass::Snake => Span::styled("□ ", Style::default().fg(Color::Green)),
                        CellClass::Food => Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        CellClass::FoodReversing => Span::styled(
                            "@ ",
                            Style::default()
                                .fg(Color::Magenta)
                                .add_modifier(Modifier::BOLD),
                        ),
                        CellClass::Plain => {
                            Span::styled(". ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if paused { " Snake (paused) " } else { " Snake " };
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
        last_game: Option<LastGame>,
    ) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut lines = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(snapshot.length.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        if let Some(last) = last_game {
            let cause = match last.cause {
                GameOverCause::Wall => "hit the wall",
                GameOverCause::SelfCollision => "bit itself",
                GameOverCause::BoardFilled => "filled the board",
            };
            lines.push(Line::from(Span::styled(
                format!("Last snake {} with {} points", cause, last.final_score),
                Style::default().fg(Color::Red),
            )));
        }

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("@", Style::default().fg(Color::Magenta)),
            Span::raw(" reverses | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_renders_board_and_food() {
        let mut engine = GameEngine::new(GameConfig::new(5, 6).with_seed(1));
        let snapshot = engine.new_game().snapshot();
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();

        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, &snapshot, &metrics, None, false))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Score: 0"));
        assert!(text.contains('■'));
        assert!(text.contains('O'));
    }

    #[test]
    fn test_renders_last_game_and_pause() {
        let mut engine = GameEngine::new(GameConfig::new(4, 4).with_seed(1));
        let snapshot = engine.new_game().snapshot();
        let renderer = Renderer::new();
        let last = LastGame {
            cause: GameOverCause::Wall,
            final_score: 3,
        };

        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, &snapshot, &GameMetrics::new(), Some(last), true))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("hit the wall with 3 points"));
        assert!(text.contains("paused"));
    }
}
