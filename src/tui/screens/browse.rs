//! Browse screen: search box, suggestion dropdown, paged results.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListState, Paragraph, Wrap};

use crate::browse::Listing;
use crate::tui::state::{App, Focus, SuggestionRow};
use crate::tui::theme::Theme;
use crate::tui::widgets::footer::draw_footer;
use crate::tui::widgets::game_card::{game_list_item, see_more_item, suggestion_item};

pub(crate) fn draw_browse(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Min(0),    // results
            Constraint::Length(1), // pager
            Constraint::Length(1), // footer
        ])
        .split(area);

    draw_search_box(layout[0], f, app, &theme);
    draw_results(layout[1], f, app, &theme);
    draw_pager(layout[2], f, app, &theme);

    let hints: &[(&str, &str)] = match app.focus {
        Focus::Search => &[
            ("Type", "Search"),
            ("↓", "Suggestions"),
            ("Enter", "Results"),
            ("F2", "Platform"),
            ("Esc", "Clear/Quit"),
        ],
        Focus::Suggestions => &[
            ("↑/↓", "Navigate"),
            ("Enter", "Pick"),
            ("Esc", "Close"),
        ],
        Focus::Results => &[
            ("↑/↓", "Navigate"),
            ("◄/►", "Page"),
            ("Enter", "Details"),
            ("F2", "Platform"),
        ],
    };
    draw_footer(layout[3], f, &theme, hints, Some("F5 reload  Ctrl+Q quit"));

    if app.browse.suggestions().is_open() {
        let below = Rect {
            x: layout[0].x,
            y: layout[0].y.saturating_add(layout[0].height),
            width: layout[0].width,
            height: layout[1].height.saturating_add(layout[2].height),
        };
        draw_suggestions(below, f, app, &theme);
    }
}

fn draw_search_box(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Search;
    let query = app.browse.query();

    let line = if query.is_empty() && !focused {
        Line::from(Span::styled(
            " Search...",
            Style::default().fg(theme.muted),
        ))
    } else {
        let mut spans = vec![Span::styled(
            format!(" {query}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )];
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    };

    let border = if focused { theme.accent } else { theme.border };
    let block = Block::default()
        .title(Span::styled(" Search ", Style::default().fg(theme.text_dim)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_suggestions(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let rows = app.suggestion_rows();
    let revealed = app.browse.revealed_suggestions();
    let height = (rows.len() as u16).saturating_add(2).min(area.height);
    if height < 3 {
        return;
    }
    let popup = Rect {
        height,
        ..area
    };

    let focused = app.focus == Focus::Suggestions;
    let items: Vec<_> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let selected = focused && i == app.suggestion_cursor;
            match *row {
                SuggestionRow::Game(pos) => revealed
                    .get(pos)
                    .map(|game| suggestion_item(game, selected, theme)),
                SuggestionRow::SeeMore => Some(see_more_item(selected, theme)),
            }
        })
        .collect();

    let total = app.browse.suggestions().matches().len();
    let title = format!(" {} of {} ", revealed.len(), total);
    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(title, Style::default().fg(theme.text_dim)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent)),
    );

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.suggestion_cursor));
    }
    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

fn draw_results(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let count = app.browse.filtered().len();
    let title = format!(" {} game{} ", count, if count == 1 { "" } else { "s" });
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(theme.text_dim)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let message = match app.browse.listing() {
        Listing::Populated => None,
        Listing::Loading => Some(vec![Line::from(Span::styled(
            format!("{}  Loading...", app.animation.spinner_char()),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))]),
        Listing::Empty => {
            let text = if app.browse.query().is_empty() {
                "No games in this catalog"
            } else {
                "No result found"
            };
            Some(vec![Line::from(Span::styled(
                text,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ))])
        }
        Listing::Failed(reason) => Some(vec![
            Line::from(Span::styled(
                "Could not load the catalog",
                Style::default()
                    .fg(theme.critical)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(reason, Style::default().fg(theme.text_dim))),
            Line::from(""),
            Line::from(Span::styled(
                "Press F5 to retry",
                Style::default().fg(theme.accent),
            )),
        ]),
    };

    if let Some(lines) = message {
        let para = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(para, area);
        return;
    }

    let focused = app.focus == Focus::Results;
    let items: Vec<_> = app
        .browse
        .page_records()
        .into_iter()
        .enumerate()
        .map(|(pos, game)| game_list_item(game, focused && pos == app.result_cursor, theme))
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.result_cursor));
    f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn draw_pager(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let enabled = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(theme.muted);

    let pages = app.browse.page_count();
    let line = Line::from(vec![
        Span::styled(
            "◄ Previous",
            if app.browse.has_prev_page() {
                enabled
            } else {
                disabled
            },
        ),
        Span::styled(
            format!("   page {} / {}   ", app.browse.page().min(pages.max(1)), pages),
            Style::default().fg(theme.text_dim),
        ),
        Span::styled(
            "Next ►",
            if app.browse.has_next_page() {
                enabled
            } else {
                disabled
            },
        ),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
