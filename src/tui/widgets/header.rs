//! Top header bar with title, platform and catalog status.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::catalog::{CatalogSnapshot, CatalogStatus};
use crate::tui::theme::Theme;

pub(crate) fn draw_header(
    area: Rect,
    f: &mut ratatui::Frame,
    theme: &Theme,
    snapshot: &CatalogSnapshot,
    spinner: char,
) {
    let mut spans = vec![
        Span::styled(
            "INGAME",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  //  ", Style::default().fg(theme.text_dim)),
        Span::styled(
            snapshot.platform.label(),
            Style::default()
                .fg(theme.platform_color(snapshot.platform))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
    ];

    match &snapshot.status {
        CatalogStatus::Loading => spans.push(Span::styled(
            format!("{spinner} loading catalog"),
            Style::default().fg(theme.text_dim),
        )),
        CatalogStatus::Ready => {
            let mut status = format!("{} games", snapshot.records.len());
            if let Some(at) = snapshot.fetched_at {
                status.push_str(&format!(
                    "  ·  updated {}",
                    at.with_timezone(&chrono::Local).format("%H:%M")
                ));
            }
            spans.push(Span::styled(status, Style::default().fg(theme.muted)));
        }
        CatalogStatus::Failed(_) => spans.push(Span::styled(
            "fetch failed  ·  F5 to retry",
            Style::default()
                .fg(theme.critical)
                .add_modifier(Modifier::BOLD),
        )),
    }

    let header_line = Line::from(spans);
    let rule = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(theme.border),
    ));

    f.render_widget(Paragraph::new(vec![header_line, rule]), area);
}
