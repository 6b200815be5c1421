//! TUI keyboard input handling.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::*;

/// Returns `true` when the UI should exit.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        return Ok(true);
    }

    match key.code {
        KeyCode::F(2) => {
            app.toggle_platform();
            return Ok(false);
        }
        KeyCode::F(5) => {
            app.retry();
            return Ok(false);
        }
        KeyCode::Char('r') if ctrl => {
            app.retry();
            return Ok(false);
        }
        _ => {}
    }

    match app.screen {
        Screen::Browse => match app.focus {
            Focus::Search => handle_search_key(app, key),
            Focus::Suggestions => handle_suggestions_key(app, key),
            Focus::Results => handle_results_key(app, key),
        },
        Screen::Detail => handle_detail_key(app, key),
        Screen::ErrorModal => handle_error_modal_key(app, key),
    }
}

fn typed_char(key: &KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(ch) if !ch.is_control() => Some(ch),
        _ => None,
    }
}

fn type_into_search(app: &mut App, ch: char) {
    app.browse.push_char(ch);
    app.focus = Focus::Search;
    app.suggestion_cursor = 0;
    app.result_cursor = 0;
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if let Some(ch) = typed_char(&key) {
        type_into_search(app, ch);
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            if app.browse.suggestions().is_open() {
                app.browse.close_suggestions();
            } else if !app.browse.query().is_empty() {
                app.browse.clear_query();
                app.result_cursor = 0;
            } else {
                return Ok(true);
            }
        }
        KeyCode::Backspace => {
            app.browse.pop_char();
            app.suggestion_cursor = 0;
            app.result_cursor = 0;
        }
        KeyCode::Down => {
            if app.browse.suggestions().is_open() {
                app.suggestion_cursor = 0;
                app.focus = Focus::Suggestions;
            } else {
                app.focus = Focus::Results;
            }
        }
        KeyCode::Enter | KeyCode::Tab => {
            app.browse.close_suggestions();
            app.focus = Focus::Results;
        }
        KeyCode::PageDown => next_page(app),
        KeyCode::PageUp => prev_page(app),
        _ => {}
    }
    Ok(false)
}

fn handle_suggestions_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if let Some(ch) = typed_char(&key) {
        type_into_search(app, ch);
        return Ok(false);
    }

    let rows = app.suggestion_rows();
    if rows.is_empty() {
        app.focus = Focus::Search;
        return Ok(false);
    }
    app.suggestion_cursor = app.suggestion_cursor.min(rows.len() - 1);

    match key.code {
        KeyCode::Esc => {
            app.browse.close_suggestions();
            app.focus = Focus::Search;
        }
        KeyCode::Up => {
            if app.suggestion_cursor == 0 {
                app.focus = Focus::Search;
            } else {
                app.suggestion_cursor -= 1;
            }
        }
        KeyCode::Down => {
            app.suggestion_cursor = (app.suggestion_cursor + 1).min(rows.len() - 1);
        }
        KeyCode::Backspace => {
            app.browse.pop_char();
            app.suggestion_cursor = 0;
            app.focus = Focus::Search;
        }
        KeyCode::Enter => match rows[app.suggestion_cursor] {
            SuggestionRow::SeeMore => app.browse.reveal_more(),
            SuggestionRow::Game(pos) => {
                if app.browse.select_suggestion(pos) {
                    app.suggestion_cursor = 0;
                    app.result_cursor = 0;
                    app.focus = Focus::Search;
                }
            }
        },
        _ => {}
    }
    Ok(false)
}

fn handle_results_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if let Some(ch) = typed_char(&key) {
        type_into_search(app, ch);
        return Ok(false);
    }

    let visible = app.browse.page_records().len();
    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.focus = Focus::Search,
        KeyCode::Up => {
            if app.result_cursor == 0 {
                app.focus = Focus::Search;
            } else {
                app.result_cursor -= 1;
            }
        }
        KeyCode::Down => {
            app.result_cursor = (app.result_cursor + 1).min(visible.saturating_sub(1));
        }
        KeyCode::Right | KeyCode::PageDown => next_page(app),
        KeyCode::Left | KeyCode::PageUp => prev_page(app),
        KeyCode::Home => app.result_cursor = 0,
        KeyCode::End => app.result_cursor = visible.saturating_sub(1),
        KeyCode::Enter => {
            if let Some(idx) = app.selected_result() {
                app.detail = Some(idx);
                app.screen = Screen::Detail;
            }
        }
        KeyCode::Backspace => {
            app.browse.pop_char();
            app.result_cursor = 0;
            app.focus = Focus::Search;
        }
        _ => {}
    }
    Ok(false)
}

fn next_page(app: &mut App) {
    if app.browse.next_page() {
        app.result_cursor = 0;
    }
}

fn prev_page(app: &mut App) {
    if app.browse.prev_page() {
        app.result_cursor = 0;
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => app.close_detail(),
        KeyCode::Char('o') | KeyCode::Char('O') => {
            let url = app
                .detail
                .and_then(|idx| app.browse.catalog().get(idx))
                .map(|g| g.game_url.clone());
            if let Some(url) = url {
                app.pending_action = Some(Action::OpenUrl(url));
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_error_modal_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
        app.error_modal = None;
        app.screen = app.error_return_screen;
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GameRecord, Platform};
    use crate::config::Config;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn loaded_app(titles: &[&str]) -> App {
        let mut app = App::new(&Config::default());
        app.start();
        let Some(Action::Fetch(ticket)) = app.pending_action.take() else {
            panic!("start should request a fetch");
        };
        let records = titles
            .iter()
            .enumerate()
            .map(|(i, t)| GameRecord::titled(i as u64 + 1, t))
            .collect();
        app.finish_fetch((ticket, Ok(records)));
        app
    }

    #[test]
    fn test_typing_opens_suggestions() {
        let mut app = loaded_app(&["Halo", "Half-Life", "Portal"]);
        type_str(&mut app, "hal");
        assert_eq!(app.browse.query(), "hal");
        assert_eq!(app.browse.revealed_suggestions().len(), 2);
        assert_eq!(app.browse.filtered().len(), 2);
    }

    #[test]
    fn test_pick_suggestion() {
        let mut app = loaded_app(&["Halo", "Half-Life", "Portal"]);
        type_str(&mut app, "hal");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Focus::Suggestions);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.browse.query(), "Half-Life");
        assert!(!app.browse.suggestions().is_open());
        assert_eq!(app.focus, Focus::Search);
    }

    #[test]
    fn test_see_more_row() {
        let titles: Vec<String> = (1..=8).map(|i| format!("Arena {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut app = loaded_app(&refs);
        type_str(&mut app, "arena");
        assert_eq!(app.suggestion_rows().len(), 6);
        assert_eq!(app.suggestion_rows()[5], SuggestionRow::SeeMore);

        press(&mut app, KeyCode::Down);
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.browse.suggestions().reveal_limit(), 10);
        assert_eq!(app.suggestion_rows().len(), 8);
    }

    #[test]
    fn test_paging_keys() {
        let titles: Vec<String> = (1..=20).map(|i| format!("Quest {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut app = loaded_app(&refs);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Results);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.browse.page(), 2);
        assert_eq!(app.result_cursor, 0);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.browse.page(), 2);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.browse.page(), 1);
    }

    #[test]
    fn test_detail_and_open() {
        let mut app = loaded_app(&["Halo", "Portal"]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Detail);
        assert_eq!(app.detail, Some(1));
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(
            app.pending_action,
            Some(Action::OpenUrl("https://example.test/open/2".to_string()))
        );
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Browse);
    }

    #[test]
    fn test_catalog_swap_closes_detail() {
        let mut app = loaded_app(&["Halo", "Portal"]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.detail, Some(1));

        press(&mut app, KeyCode::F(2));
        let Some(Action::Fetch(ticket)) = app.pending_action.take() else {
            panic!("toggle should request a fetch");
        };
        // Still loading: the open game is unchanged.
        assert_eq!(app.screen, Screen::Detail);

        app.finish_fetch((
            ticket,
            Ok(vec![
                GameRecord::titled(7, "Slither"),
                GameRecord::titled(8, "Krunker"),
            ]),
        ));
        assert_eq!(app.screen, Screen::Browse);
        assert_eq!(app.detail, None);

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.pending_action, None);
    }

    #[test]
    fn test_typing_in_results_edits_query() {
        let mut app = loaded_app(&["Raid", "Overwatch 2"]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Results);

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.browse.query(), "o");
        assert_eq!(app.focus, Focus::Search);
        assert_eq!(app.pending_action, None);
        assert_eq!(app.browse.filtered().len(), 1);
    }

    #[test]
    fn test_platform_toggle_requests_fetch_and_drops_stale() {
        let mut app = loaded_app(&["Halo"]);
        press(&mut app, KeyCode::F(2));
        let Some(Action::Fetch(browser)) = app.pending_action.take() else {
            panic!("toggle should request a fetch");
        };
        assert_eq!(browser.platform, Platform::Browser);
        assert_eq!(app.browse.platform(), Platform::Browser);
        assert!(app.browse.snapshot().is_loading());

        press(&mut app, KeyCode::F(2));
        let Some(Action::Fetch(pc)) = app.pending_action.take() else {
            panic!("toggle should request a fetch");
        };
        app.finish_fetch((pc, Ok(vec![GameRecord::titled(1, "Halo")])));
        let late = app.finish_fetch((browser, Ok(vec![GameRecord::titled(7, "Slither")])));
        assert_eq!(late, crate::catalog::Completion::Stale);
        assert_eq!(app.browse.platform(), Platform::Pc);
        assert_eq!(app.browse.catalog()[0].title, "Halo");
    }

    #[test]
    fn test_escape_ladder() {
        let mut app = loaded_app(&["Halo", "Half-Life"]);
        type_str(&mut app, "ha");
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(!app.browse.suggestions().is_open());
        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(app.browse.query(), "");
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = loaded_app(&[]);
        let quit = handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert!(quit);
    }
}
