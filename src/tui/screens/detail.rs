//! Game detail popup over the browse screen.

use ratatui::layout::Rect;

use crate::tui::screens::error::centered_rect;
use crate::tui::state::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::card::GameCard;

pub(crate) fn draw_detail(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let Some(game) = app.detail.and_then(|idx| app.browse.catalog().get(idx)) else {
        return;
    };
    let popup = centered_rect(80, 70, area);
    GameCard::new(game)
        .footer("[O open in browser]  [Esc back]")
        .render(popup, f, &theme);
}
