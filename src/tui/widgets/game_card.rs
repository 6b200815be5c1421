//! Game list rows for results and the suggestion dropdown.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;

use crate::catalog::GameRecord;
use crate::tui::theme::Theme;

pub(crate) fn game_list_item<'a>(
    game: &'a GameRecord,
    selected: bool,
    theme: &Theme,
) -> ListItem<'a> {
    let genre_color = theme.genre_color(&game.genre);

    let name_style = if selected {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let title_line = Line::from(vec![
        Span::styled("▌", Style::default().fg(genre_color)),
        Span::styled(if selected { " › " } else { "   " }, name_style),
        Span::styled(game.title.as_str(), name_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", game.genre.trim()),
            Style::default().fg(genre_color),
        ),
        Span::raw(" "),
        Span::styled(game.platform.as_str(), Style::default().fg(theme.muted)),
    ]);

    let blurb = Line::from(vec![
        Span::styled("▌", Style::default().fg(genre_color)),
        Span::raw("   "),
        Span::styled(
            game.short_description.trim(),
            Style::default().fg(theme.text_dim),
        ),
    ]);

    ListItem::new(vec![title_line, blurb])
}

/// Single-line row for the autocomplete dropdown.
pub(crate) fn suggestion_item<'a>(
    game: &'a GameRecord,
    selected: bool,
    theme: &Theme,
) -> ListItem<'a> {
    let style = if selected {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    ListItem::new(Line::from(vec![
        Span::styled(if selected { " › " } else { "   " }, style),
        Span::styled(game.title.as_str(), style),
    ]))
}

pub(crate) fn see_more_item<'a>(selected: bool, theme: &Theme) -> ListItem<'a> {
    let style = if selected {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    ListItem::new(Line::from(Span::styled(
        if selected { " › See more" } else { "   See more" },
        style,
    )))
}
