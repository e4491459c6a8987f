use ratatui::style::{Color, Modifier, Style};
use shortfact_common::Verdict;

pub fn title() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn verdict(v: Verdict) -> Style {
    let color = match v {
        Verdict::Fact => Color::Green,
        Verdict::Myth => Color::Red,
        Verdict::Inconclusive => Color::Yellow,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn label() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn value() -> Style {
    Style::default().fg(Color::White)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn system() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn source() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn focused_border() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(Color::DarkGray)
}
