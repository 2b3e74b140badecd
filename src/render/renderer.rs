use std::f32::consts::TAU;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::framebuffer::Framebuffer;
use super::hud::Hud;
use super::surface::Surface;
use crate::game::{GameState, Phase};
use crate::metrics::GameMetrics;

pub const HEAD_COLOR: Color = Color::Rgb(0x2e, 0xcc, 0x71);
pub const BODY_COLOR: Color = Color::Rgb(0x27, 0xae, 0x60);
pub const OUTLINE_COLOR: Color = Color::Rgb(0x2c, 0x3e, 0x50);
pub const FOOD_COLOR: Color = Color::Rgb(0xf3, 0x9c, 0x12);

/// Food radius as a fraction of half a cell
const FOOD_SCALE: f32 = 0.8;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Repaint the whole surface from the state
    pub fn draw<S: Surface + ?Sized>(&self, state: &GameState, surface: &mut S) {
        let (width, height) = (surface.width(), surface.height());
        surface.clear_rect(0, 0, width, height);

        let size = state.cell_size;
        surface.set_stroke_color(OUTLINE_COLOR);
        for (index, segment) in state.snake.body.iter().enumerate() {
            let fill = if index == 0 { HEAD_COLOR } else { BODY_COLOR };
            surface.set_fill_color(fill);
            surface.fill_rect(segment.x, segment.y, size, size);
            surface.stroke_rect(segment.x, segment.y, size, size);
        }

        if let Some(food) = state.food {
            let half = size as f32 / 2.0;
            surface.set_fill_color(FOOD_COLOR);
            surface.fill_arc(
                food.x as f32 + half,
                food.y as f32 + half,
                half * FOOD_SCALE,
                0.0,
                TAU,
            );
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        framebuffer: &mut Framebuffer,
    ) {
        let hud = Hud::from_state(state);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Message
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        self.draw(state, framebuffer);
        let view = framebuffer.view(state.cell_size);
        let board_width = (view.columns() * 2 + 2).min(chunks[1].width as u32) as u16;
        let board_height = (view.rows() + 2).min(chunks[1].height as u32) as u16;
        let board = centered(chunks[1], board_width, board_height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(self.border_style(state.phase))
            .title(" Snake ");
        let inner = block.inner(board);
        frame.render_widget(block, board);
        frame.render_widget(view, inner);

        frame.render_widget(self.render_message(state, &hud), chunks[2]);
        frame.render_widget(self.render_controls(&hud), chunks[3]);
    }

    fn border_style(&self, phase: Phase) -> Style {
        match phase {
            Phase::GameOver => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::White),
        }
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(
                    state.score.to_string(),
                    value.add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", label),
                Span::styled(metrics.best_score.to_string(), value),
                Span::raw("    "),
                Span::styled("Longest: ", label),
                Span::styled(metrics.longest_snake.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), value),
                Span::raw("    "),
                Span::styled("Speed: ", label),
                Span::styled(format!("{}ms", state.tick_interval.as_millis()), value),
                Span::raw("    "),
                Span::styled("Last: ", label),
                Span::styled(metrics.last_reason_label(), value),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_message(&self, state: &GameState, hud: &Hud) -> Paragraph<'_> {
        let line = match state.phase {
            Phase::GameOver => Line::from(Span::styled(
                hud.message_text.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Phase::Ready => Line::from(Span::styled(
                "Press Enter to start",
                Style::default().fg(Color::Gray),
            )),
            Phase::Running => Line::from(""),
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_controls(&self, hud: &Hud) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move"),
        ];
        if hud.start_enabled {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("Enter", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" to start"));
        }
        if hud.restart_visible {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("R", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" to restart"));
        }
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
