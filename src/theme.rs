use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Display mode. Affects colors only, never session logic.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌞",
            Theme::Dark => "🌙",
        }
    }
}

/// Colors used by the UI for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub field: Color,
    pub correct_bg: Color,
    pub incorrect_bg: Color,
    pub restart: Color,
    pub next: Color,
    pub end: Color,
    pub hint: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            background: Color::Rgb(0xff, 0xe9, 0xf0),
            text: Color::Rgb(0x33, 0x33, 0x33),
            title: Color::Rgb(0xff, 0x4d, 0xa6),
            border: Color::Rgb(0xff, 0xb6, 0xc1),
            field: Color::Rgb(0xff, 0xff, 0xff),
            correct_bg: Color::Rgb(0xb3, 0xff, 0xb3),
            incorrect_bg: Color::Rgb(0xff, 0xb3, 0xb3),
            restart: Color::Rgb(0xff, 0x4d, 0xa6),
            next: Color::Rgb(0x4c, 0xaf, 0x50),
            end: Color::Rgb(0xff, 0x63, 0x47),
            hint: Color::Rgb(0x88, 0x88, 0x88),
        },
        Theme::Dark => Palette {
            background: Color::Rgb(0x0f, 0x20, 0x27),
            text: Color::Rgb(0xee, 0xee, 0xee),
            title: Color::Rgb(0xff, 0xa6, 0xff),
            border: Color::Rgb(0x88, 0x88, 0x88),
            field: Color::Rgb(0x1e, 0x1e, 0x1e),
            correct_bg: Color::Rgb(0x1f, 0x5c, 0x1f),
            incorrect_bg: Color::Rgb(0x6b, 0x1f, 0x1f),
            restart: Color::Rgb(0xff, 0x4d, 0xa6),
            next: Color::Rgb(0x4c, 0xaf, 0x50),
            end: Color::Rgb(0xff, 0x63, 0x47),
            hint: Color::Rgb(0x99, 0x99, 0x99),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn palettes_differ_where_mode_matters() {
        let light = palette(Theme::Light);
        let dark = palette(Theme::Dark);
        assert_ne!(light.background, dark.background);
        assert_ne!(light.text, dark.text);
        assert_ne!(light.field, dark.field);
        // the action colors are shared
        assert_eq!(light.next, dark.next);
        assert_eq!(light.end, dark.end);
    }

    #[test]
    fn palette_is_pure() {
        assert_eq!(palette(Theme::Dark), palette(Theme::Dark));
    }
}
