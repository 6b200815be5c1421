//! Rounded bordered panel describing a single game.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::catalog::GameRecord;
use crate::tui::theme::Theme;

pub(crate) struct GameCard<'a> {
    game: &'a GameRecord,
    footer: Option<&'a str>,
}

impl<'a> GameCard<'a> {
    pub fn new(game: &'a GameRecord) -> Self {
        Self { game, footer: None }
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    fn field(label: &'a str, value: &'a str, theme: &Theme) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("  {label:<12}"), Style::default().fg(theme.text_dim)),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    }

    pub fn render(self, area: Rect, f: &mut ratatui::Frame, theme: &Theme) {
        let game = self.game;
        let genre_color = theme.genre_color(&game.genre);

        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", game.title),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", game.genre.trim()),
                Style::default()
                    .fg(genre_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", game.short_description.trim()),
                Style::default().fg(theme.text),
            )),
            Line::from(""),
            Self::field("Game type", &game.genre, theme),
            Self::field("Platform", &game.platform, theme),
        ];
        if let Some(publisher) = game.publisher.as_deref() {
            lines.push(Self::field("Publisher", publisher, theme));
        }
        if let Some(developer) = game.developer.as_deref() {
            lines.push(Self::field("Developer", developer, theme));
        }
        if let Some(released) = game.release_date.as_deref() {
            lines.push(Self::field("Released", released, theme));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  More info   ", Style::default().fg(theme.text_dim)),
            Span::styled(
                game.game_url.as_str(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
        if let Some(footer) = self.footer {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {footer}"),
                Style::default().fg(theme.muted),
            )));
        }

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent));

        f.render_widget(Clear, area);
        let para = Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(para, area);
    }
}
