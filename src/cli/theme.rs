use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Foreground colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub user: Color,
    pub bot: Color,
    pub error: Color,
}

const TEAL_400: Color = Color::Rgb { r: 0x2d, g: 0xd4, b: 0xbf };
const TEAL_700: Color = Color::Rgb { r: 0x0f, g: 0x76, b: 0x6e };
const BLUE_500: Color = Color::Rgb { r: 0x3b, g: 0x82, b: 0xf6 };
const GRAY_100: Color = Color::Rgb { r: 0xf3, g: 0xf4, b: 0xf6 };
const GRAY_400: Color = Color::Rgb { r: 0x9c, g: 0xa3, b: 0xaf };
const GRAY_500: Color = Color::Rgb { r: 0x6b, g: 0x72, b: 0x80 };
const GRAY_900: Color = Color::Rgb { r: 0x11, g: 0x18, b: 0x27 };
const RED_500: Color = Color::Rgb { r: 0xef, g: 0x44, b: 0x44 };

impl Theme {
    pub fn from_light_flag(light: bool) -> Self {
        if light {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                accent: TEAL_400,
                text: GRAY_100,
                muted: GRAY_400,
                user: TEAL_400,
                bot: GRAY_100,
                error: RED_500,
            },
            Self::Light => Palette {
                accent: BLUE_500,
                text: GRAY_900,
                muted: GRAY_500,
                user: TEAL_700,
                bot: GRAY_900,
                error: RED_500,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_is_default_and_toggles() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn palettes_differ() {
        assert_ne!(Theme::Dark.palette(), Theme::Light.palette());
        assert_eq!(Theme::Light.palette().user, TEAL_700);
        assert_eq!(Theme::Dark.palette().user, TEAL_400);
    }

    #[test]
    fn flag_selects_light() {
        assert_eq!(Theme::from_light_flag(true), Theme::Light);
        assert_eq!(Theme::from_light_flag(false), Theme::Dark);
    }
}
