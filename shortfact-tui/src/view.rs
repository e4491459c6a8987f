use crate::form::RequestState;
use crate::styles;
use anyhow::Result;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use std::io::Stdout;
use textwrap::wrap;

const URL_PLACEHOLDER: &str = "https://youtube.com/shorts/...";
const CLAIM_PLACEHOLDER: &str = "e.g. 'Drinking coffee can make you taller.'";

/// Which input box receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Claim,
}

/// Immutable snapshot handed from the actor to the renderer.
pub struct ViewSnap {
    pub url_input: String,
    pub url_cursor: usize,
    pub claim_input: String,
    pub claim_cursor: usize,
    pub focus: Field,
    pub state: RequestState,
    pub notice: Option<String>,
    pub scroll: usize,
    pub spinner: &'static str,
}

pub fn draw(term: &mut Terminal<CrosstermBackend<Stdout>>, snap: &ViewSnap) -> Result<()> {
    term.draw(|frame| {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new(Line::from(vec![
            Span::styled(" Shortfact ", styles::title()),
            Span::styled("separate fact from fiction in YouTube Shorts", styles::dim()),
        ]));
        frame.render_widget(header, layout[0]);

        // Input boxes
        draw_input(
            frame,
            layout[1],
            " YouTube Shorts URL ",
            &snap.url_input,
            URL_PLACEHOLDER,
            snap.focus == Field::Url,
        );
        draw_input(
            frame,
            layout[2],
            " What is the claim made in the video? ",
            &snap.claim_input,
            CLAIM_PLACEHOLDER,
            snap.focus == Field::Claim,
        );

        // Caret placement for the focused field
        let (focused_area, focused_text, focused_cursor) = match snap.focus {
            Field::Url => (layout[1], &snap.url_input, snap.url_cursor),
            Field::Claim => (layout[2], &snap.claim_input, snap.claim_cursor),
        };
        let caret_x = focused_area.x + 1 + visual_caret_col(focused_text, focused_cursor);
        let caret_y = focused_area.y + 1;
        frame.set_cursor_position(Position {
            x: caret_x,
            y: caret_y,
        });

        // Result window
        let visible_h = layout[3].height.saturating_sub(2) as usize;
        let content_width = layout[3].width.saturating_sub(2) as usize;
        let wrapped = wrap_lines(&result_lines(snap), content_width);
        let max_scroll = wrapped.len().saturating_sub(visible_h);
        let start = snap.scroll.min(max_scroll);

        let items: Vec<ListItem> = wrapped
            .iter()
            .skip(start)
            .take(visible_h)
            .map(|(text, style)| ListItem::new(Line::from(Span::styled(text.clone(), *style))))
            .collect();

        let body = List::new(items).block(Block::default().borders(Borders::ALL).title(" Result "));
        frame.render_widget(body, layout[3]);

        // Status bar
        let (status_word, status_style) = match &snap.state {
            RequestState::Loading => ("Analyzing...", styles::label()),
            _ => ("Idle", styles::system()),
        };
        let status_line = Line::from(vec![
            Span::raw(" "),
            Span::styled(snap.spinner, styles::label()),
            Span::raw(" "),
            Span::styled(status_word, status_style),
            Span::styled(
                "   Tab switch field, Enter check, Ctrl+C quit",
                styles::dim(),
            ),
        ]);
        let status =
            Paragraph::new(status_line).block(Block::default().borders(Borders::ALL).title(" Status "));
        frame.render_widget(status, layout[4]);
    })?;

    Ok(())
}

fn draw_input(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    content: &str,
    placeholder: &str,
    focused: bool,
) {
    let border = if focused {
        styles::focused_border()
    } else {
        styles::unfocused_border()
    };

    let text: Line = if content.is_empty() {
        Line::from(Span::styled(placeholder.to_string(), styles::dim()))
    } else {
        Line::from(Span::styled(content.to_string(), styles::value()))
    };

    let input_box = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title.to_string()),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(input_box, area);
}

/// Flatten the current request state into styled lines for the result pane.
fn result_lines(snap: &ViewSnap) -> Vec<(String, Style)> {
    let mut lines = Vec::new();

    if let Some(notice) = &snap.notice {
        lines.push((format!("× {notice}"), styles::error()));
        lines.push((String::new(), styles::dim()));
    }

    match &snap.state {
        RequestState::Idle => {
            lines.push((
                "Enter a URL and the claim made in the video, then press Enter.".into(),
                styles::dim(),
            ));
        }
        RequestState::Loading => {
            lines.push((
                format!("{} Analyzing claim with web search grounding...", snap.spinner),
                styles::system(),
            ));
        }
        RequestState::Failed(message) => {
            lines.push((format!("× {message}"), styles::error()));
            lines.push((String::new(), styles::dim()));
            lines.push(("Press Enter to try again.".into(), styles::dim()));
        }
        RequestState::Succeeded(result) => {
            lines.push((
                format!("[ {} ]", result.verdict.label()),
                styles::verdict(result.verdict),
            ));
            lines.push((String::new(), styles::dim()));
            for line in result.explanation.lines() {
                lines.push((line.to_string(), styles::value()));
            }
            if !result.sources.is_empty() {
                lines.push((String::new(), styles::dim()));
                lines.push(("Sources Found".into(), styles::label()));
                for source in &result.sources {
                    lines.push((format!("  • {}", source.title), styles::source()));
                    lines.push((format!("    {}", source.uri), styles::dim()));
                }
            }
        }
    }

    lines
}

fn visual_caret_col(input: &str, cursor: usize) -> u16 {
    use unicode_width::UnicodeWidthStr;
    UnicodeWidthStr::width(&input[..cursor]) as u16
}

fn wrap_lines(lines: &[(String, Style)], width: usize) -> Vec<(String, Style)> {
    let effective_width = width.max(1);
    let mut out = Vec::new();

    for (text, style) in lines {
        if text.is_empty() {
            out.push((String::new(), *style));
            continue;
        }

        let segments = wrap(text, effective_width);
        if segments.is_empty() {
            out.push((String::new(), *style));
        } else {
            out.extend(segments.into_iter().map(|seg| (seg.into_owned(), *style)));
        }
    }

    out
}
