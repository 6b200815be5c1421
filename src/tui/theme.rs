//! TUI color theme.

use ratatui::style::Color;

use crate::catalog::Platform;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    // Primary palette
    pub accent: Color,
    pub optimal: Color,
    pub critical: Color,

    // UI chrome
    pub border: Color,
    pub muted: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Orange brand color
            accent: Color::Rgb(249, 115, 22),
            optimal: Color::Rgb(163, 230, 53),
            critical: Color::Rgb(255, 68, 85),
            border: Color::Gray,
            muted: Color::DarkGray,
            text: Color::White,
            text_dim: Color::Gray,
        }
    }
}

impl Theme {
    pub fn platform_color(&self, platform: Platform) -> Color {
        match platform {
            Platform::Pc => self.accent,
            Platform::Browser => self.optimal,
        }
    }

    /// Stable color per genre so the same genre reads the same on every page.
    pub fn genre_color(&self, genre: &str) -> Color {
        const PALETTE: [Color; 6] = [
            Color::Rgb(0, 212, 255),
            Color::Rgb(163, 230, 53),
            Color::Rgb(251, 191, 36),
            Color::Rgb(192, 132, 252),
            Color::Rgb(244, 114, 182),
            Color::Rgb(45, 212, 191),
        ];
        let sum = genre
            .trim()
            .to_ascii_lowercase()
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
        PALETTE[sum % PALETTE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_color_is_stable() {
        let theme = Theme::default();
        assert_eq!(theme.genre_color("Shooter"), theme.genre_color(" shooter "));
        assert_eq!(theme.genre_color("MMORPG"), theme.genre_color("MMORPG"));
    }
}
