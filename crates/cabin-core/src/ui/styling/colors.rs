//! Per-theme color tables for every widget
//!
//! Each widget has a small color struct with a `for_theme` constructor.
//! `None` marks a transparent slot: nothing is drawn for it.

use embedded_graphics::pixelcolor::Rgb888;

use super::theme::Theme;

/// Build a color from a `0xRRGGBB` literal
pub const fn hex(rgb: u32) -> Rgb888 {
    Rgb888::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub const WHITE: Rgb888 = hex(0xffffff);
pub const BLACK: Rgb888 = hex(0x000000);

// ============================================================================
// Screen
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenColors {
    pub background: Rgb888,
}

impl ScreenColors {
    pub const fn for_theme(theme: Theme) -> Self {
        let background = match theme {
            Theme::FreeLight => hex(0xffffff),
            Theme::FreeDark => hex(0x121212),
            Theme::DreamerLight => hex(0xfafafa),
            Theme::DreamerDark => hex(0x000000),
        };
        Self { background }
    }
}

// ============================================================================
// Panel
// ============================================================================

/// Panel chrome. Transparent in every shipped theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelColors {
    pub background: Option<Rgb888>,
    pub border: Option<Rgb888>,
    pub shadow: Option<Rgb888>,
}

impl PanelColors {
    pub const fn for_theme(_theme: Theme) -> Self {
        Self {
            background: None,
            border: None,
            shadow: None,
        }
    }
}

// ============================================================================
// Tabs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabsColors {
    pub sidebar: Option<Rgb888>,
    pub selected_background: Rgb888,
    pub selected_text: Rgb888,
    pub unselected_text: Rgb888,
}

impl TabsColors {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::FreeLight => Self {
                sidebar: Some(hex(0xf1f5fb)),
                selected_background: hex(0xffffff),
                selected_text: hex(0x1a1a1a),
                unselected_text: hex(0x666666),
            },
            Theme::FreeDark => Self {
                sidebar: None,
                selected_background: hex(0x23272f),
                selected_text: hex(0x47b4ff),
                unselected_text: hex(0xcacaca),
            },
            Theme::DreamerLight => Self {
                sidebar: Some(hex(0xf5f5f5)),
                selected_background: hex(0xffffff),
                selected_text: hex(0x1a1a1a),
                unselected_text: hex(0x666666),
            },
            Theme::DreamerDark => Self {
                sidebar: Some(hex(0x0a0a0a)),
                selected_background: hex(0x2a2a2a),
                selected_text: hex(0xffffff),
                unselected_text: hex(0x888888),
            },
        }
    }
}

// ============================================================================
// Section
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionColors {
    pub background: Rgb888,
    /// Band behind the title, dark themes only
    pub title_band: Option<Rgb888>,
    pub title_text: Rgb888,
}

impl SectionColors {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::FreeLight => Self {
                background: hex(0xf1f5fb),
                title_band: None,
                title_text: hex(0x1a1a1a),
            },
            Theme::FreeDark => Self {
                background: hex(0x23272f),
                title_band: Some(hex(0x181b21)),
                title_text: WHITE,
            },
            Theme::DreamerLight => Self {
                background: hex(0xf5f0eb),
                title_band: None,
                title_text: hex(0x1a1a1a),
            },
            Theme::DreamerDark => Self {
                background: hex(0x25272b),
                title_band: Some(hex(0x18191e)),
                title_text: WHITE,
            },
        }
    }
}

// ============================================================================
// Radio
// ============================================================================

/// Direction of the selection gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientAxis {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadioColors {
    pub background: Rgb888,
    pub selected_text: Rgb888,
    pub unselected_text: Rgb888,
    pub gradient_start: Rgb888,
    pub gradient_end: Rgb888,
    pub gradient_axis: GradientAxis,
    pub border_top: Rgb888,
    pub border_side: Rgb888,
    pub border_bottom: Rgb888,
}

impl RadioColors {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::FreeLight => Self {
                background: hex(0xffffff),
                unselected_text: hex(0x2d3442),
                ..Self::free_selection()
            },
            Theme::FreeDark => Self {
                background: hex(0x373f4a),
                unselected_text: hex(0xcacaca),
                ..Self::free_selection()
            },
            Theme::DreamerLight => Self {
                background: hex(0xffffff),
                unselected_text: hex(0x2d3442),
                ..Self::dreamer_selection()
            },
            Theme::DreamerDark => Self {
                background: hex(0x40444a),
                // 50% white flattened over the track color
                unselected_text: hex(0x9fa1a4),
                ..Self::dreamer_selection()
            },
        }
    }

    const fn free_selection() -> Self {
        Self {
            background: WHITE,
            selected_text: WHITE,
            unselected_text: WHITE,
            gradient_start: hex(0x79bbfd),
            gradient_end: hex(0x2781dd),
            gradient_axis: GradientAxis::Vertical,
            border_top: hex(0x8dc6ff),
            border_side: hex(0x519ae5),
            border_bottom: hex(0x1875d2),
        }
    }

    const fn dreamer_selection() -> Self {
        Self {
            background: WHITE,
            selected_text: hex(0x2f2e36),
            unselected_text: WHITE,
            gradient_start: hex(0xeadac8),
            gradient_end: hex(0x9c8069),
            gradient_axis: GradientAxis::Horizontal,
            border_top: hex(0xeadac8),
            border_side: hex(0x9c8069),
            border_bottom: hex(0x9c8069),
        }
    }
}

// ============================================================================
// Text
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub control: Rgb888,
    pub title: Rgb888,
}

impl TextColors {
    pub const fn for_theme(theme: Theme) -> Self {
        if theme.is_light() {
            Self {
                control: hex(0x1a1a1a),
                title: BLACK,
            }
        } else {
            Self {
                control: WHITE,
                title: hex(0xf1f5fb),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0x47b4ff), Rgb888::new(0x47, 0xb4, 0xff));
        assert_eq!(hex(0xffffff), Rgb888::WHITE);
    }

    #[test]
    fn test_panel_chrome_is_transparent() {
        for theme in Theme::ALL {
            let colors = PanelColors::for_theme(theme);
            assert_eq!(colors.background, None);
            assert_eq!(colors.border, None);
            assert_eq!(colors.shadow, None);
        }
    }

    #[test]
    fn test_title_band_only_in_dark_themes() {
        for theme in Theme::ALL {
            assert_eq!(
                SectionColors::for_theme(theme).title_band.is_some(),
                theme.is_dark()
            );
        }
    }

    #[test]
    fn test_radio_gradient_axis_follows_brand() {
        assert_eq!(
            RadioColors::for_theme(Theme::FreeLight).gradient_axis,
            GradientAxis::Vertical
        );
        assert_eq!(
            RadioColors::for_theme(Theme::DreamerDark).gradient_axis,
            GradientAxis::Horizontal
        );
        assert_eq!(
            RadioColors::for_theme(Theme::DreamerLight).selected_text,
            hex(0x2f2e36)
        );
    }

    #[test]
    fn test_screen_backgrounds_differ() {
        assert_eq!(ScreenColors::for_theme(Theme::FreeDark).background, hex(0x121212));
        assert_eq!(ScreenColors::for_theme(Theme::DreamerDark).background, BLACK);
    }
}
