use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::App;
use tapr::session::Phase;
use tapr::window;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;

        match session.phase() {
            Phase::Typing => render_typing(self, area, buf),
            Phase::Finished(_) => render_results(self, area, buf),
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    // One stats line, the word window roughly centered, input echo at the
    // bottom.
    let filler = area.height.saturating_sub(3) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(filler),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    stats_line(app).alignment(Alignment::Center).render(chunks[0], buf);

    let words_line = Paragraph::new(Line::from(word_spans(app)));
    words_line.render(chunks[2], buf);

    let echo = format!("> {}_", app.session.typed_chars().iter().join(""));
    Paragraph::new(echo).render(chunks[4], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    stats_line(app).alignment(Alignment::Center).render(chunks[1], buf);

    let legend = Paragraph::new(Span::styled("(esc)ape", italic_style))
        .alignment(Alignment::Center);
    legend.render(chunks[3], buf);
}

/// Current WPM and accuracy, floored to whole numbers for display.
fn stats_line(app: &App) -> Paragraph<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let stats = app.session.stats();

    let spans = vec![
        Span::styled(
            format!("{} wpm", stats.wpm.floor() as u64),
            Style::default().patch(bold_style).fg(wpm_color(stats.wpm)),
        ),
        Span::raw("   "),
        Span::styled(format!("{}% acc", stats.accuracy.floor() as i64), bold_style),
    ];

    Paragraph::new(Line::from(spans))
}

/// Speed bands for coloring the WPM readout.
fn wpm_color(wpm: f64) -> Color {
    let wpm = wpm.floor();
    if wpm <= 50.0 {
        Color::Red
    } else if wpm <= 70.0 {
        Color::Yellow
    } else if wpm <= 90.0 {
        Color::Green
    } else {
        Color::Blue
    }
}

/// Assemble the visible word window into styled spans. The current word is
/// rendered per character so mistakes and the cursor position show inline;
/// other words render whole, red when they were typed wrong.
fn word_spans(app: &App) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let cursor_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);

    let session = &app.session;
    let progress = session.progress();
    let visible = window::select(
        session.words(),
        progress.word_index,
        app.width_budget as usize,
    );

    let mut spans = Vec::new();

    for idx in visible.start..visible.end {
        if idx > visible.start {
            spans.push(Span::raw(" "));
        }

        let word = &session.words()[idx];

        if idx == progress.word_index {
            for (char_idx, c) in word.chars().enumerate() {
                let style = if char_idx < progress.typed_length {
                    if progress.wrong_char_indices.contains(&char_idx) {
                        red_bold_style
                    } else {
                        green_bold_style
                    }
                } else if char_idx == progress.typed_length {
                    cursor_style
                } else {
                    dim_bold_style
                };
                spans.push(Span::styled(c.to_string(), style));
            }
        } else {
            let style = if session.wrong_word_indices().contains(&idx) {
                red_bold_style
            } else {
                dim_bold_style
            };
            spans.push(Span::styled(word.clone(), style));
        }
    }

    spans
}
