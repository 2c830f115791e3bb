use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::assets::FoodMarker;
use super::layout::BoardLayout;
use crate::game::{GameState, config::CELL_WIDTH};
use crate::metrics::{GameMetrics, format_time};

const BACKGROUND: Color = Color::Rgb(51, 51, 51);

pub struct Renderer {
    food_marker: FoodMarker,
    cell_width: u16,
}

impl Renderer {
    pub fn new(food_marker: FoodMarker, cell_width: u16) -> Self {
        Self {
            food_marker,
            cell_width,
        }
    }

    /// Draw one frame and return the board geometry it used
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
    ) -> BoardLayout {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let layout = BoardLayout::new(chunks[1], state.grid_size, self.cell_width);

        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake ")
                .style(Style::default().bg(BACKGROUND)),
            layout.outer(),
        );
        self.draw_cells(frame.buffer_mut(), &layout, state);

        if state.game_over {
            let popup = centered(layout.outer(), 24, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(state), popup);
        } else if state.paused {
            let banner = centered(layout.outer(), 14, 3);
            frame.render_widget(Clear, banner);
            frame.render_widget(self.render_paused(), banner);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);

        layout
    }

    fn draw_cells(&self, buf: &mut Buffer, layout: &BoardLayout, state: &GameState) {
        let width = usize::from(layout.cell_width());
        let block = "█".repeat(width);

        if let Some(food) = state.food.pos {
            if let Some((x, y)) = layout.cell_origin(food) {
                match &self.food_marker {
                    FoodMarker::Sprite(glyph) => {
                        let blank = " ".repeat(width);
                        buf.set_string(x, y, blank, Style::default().bg(BACKGROUND));
                        buf.set_string(
                            x,
                            y,
                            glyph,
                            Style::default().fg(Color::Red).bg(BACKGROUND),
                        );
                    }
                    FoodMarker::Solid => {
                        buf.set_string(x, y, &block, Style::default().fg(Color::Red));
                    }
                }
            }
        }

        // Tail first so the head is drawn last when segments overlap
        let head = state.snake.head();
        for segment in state.snake.body.iter().rev() {
            if let Some((x, y)) = layout.cell_origin(*segment) {
                let style = if *segment == head {
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green)
                };
                buf.set_string(x, y, &block, style);
            }
        }
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let best = metrics.high_score.max(state.score);
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(best.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(format_time(state.play_time), Style::default().fg(Color::White)),
        ];

        if state.board_full {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "Board full!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(""), Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::styled(" restart  ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::styled(" quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_paused(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Click left/right half", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to turn | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(FoodMarker::Solid, CELL_WIDTH)
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Food, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> GameState {
        GameState::new(
            Snake::new(Position::new(10, 10), Direction::Right, 3),
            Food::at(Position::new(0, 0)),
            20,
        )
    }

    fn draw(renderer: &Renderer, state: &GameState) -> (Buffer, BoardLayout) {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        let metrics = GameMetrics::new();
        let mut layout = None;
        terminal
            .draw(|frame| layout = Some(renderer.render(frame, state, &metrics)))
            .unwrap();
        (terminal.backend().buffer().clone(), layout.unwrap())
    }

    fn symbol_at(buffer: &Buffer, (x, y): (u16, u16)) -> String {
        buffer.content()[buffer.index_of(x, y)].symbol().to_string()
    }

    fn text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_draws_snake_and_solid_food() {
        let state = state();
        let (buffer, layout) = draw(&Renderer::default(), &state);

        let food = layout.cell_origin(Position::new(0, 0)).unwrap();
        assert_eq!(symbol_at(&buffer, food), "█");

        let head = layout.cell_origin(state.snake.head()).unwrap();
        assert_eq!(symbol_at(&buffer, head), "█");
        assert_eq!(buffer.content()[buffer.index_of(head.0, head.1)].fg, Color::LightGreen);

        assert!(text(&buffer).contains("Score: 0"));
        assert!(!text(&buffer).contains("GAME OVER"));
    }

    #[test]
    fn test_food_sprite_used_when_loaded() {
        let renderer = Renderer::new(FoodMarker::Sprite("@".to_string()), 2);
        let (buffer, layout) = draw(&renderer, &state());

        let food = layout.cell_origin(Position::new(0, 0)).unwrap();
        assert_eq!(symbol_at(&buffer, food), "@");
    }

    #[test]
    fn test_game_over_panel_shows_score() {
        let mut state = state();
        state.score = 7;
        state.game_over = true;

        let (buffer, _) = draw(&Renderer::default(), &state);
        let text = text(&buffer);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Score: 7"));
    }

    #[test]
    fn test_paused_banner() {
        let mut state = state();
        state.paused = true;

        let (buffer, _) = draw(&Renderer::default(), &state);
        assert!(text(&buffer).contains("PAUSED"));
    }

    #[test]
    fn test_off_grid_head_is_not_drawn() {
        let mut state = state();
        state.snake.body.insert(0, Position::new(20, 10));
        state.game_over = true;

        // Must not panic drawing a head outside the board
        let (buffer, _) = draw(&Renderer::default(), &state);
        assert!(text(&buffer).contains("GAME OVER"));
    }
}
