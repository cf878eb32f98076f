//! Visual themes of the settings screen
//!
//! A theme is the product of a brand (the vehicle trim line) and a
//! brightness. Every widget derives its colors from the active theme through
//! the tables in [`colors`](super::colors).

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Axes
// ============================================================================

/// Trim line the palette belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Brand {
    #[default]
    Free,
    Dreamer,
}

/// Light or dark variant of a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Brightness {
    Light,
    #[default]
    Dark,
}

// ============================================================================
// Theme
// ============================================================================

/// One of the four supported themes.
///
/// Serialized through its code (`"free-dark"` and so on). Parsing never
/// fails: unknown or absent codes yield [`Theme::FreeDark`].
///
/// # Examples
///
/// ```ignore
/// let theme = Theme::from_code(Some("Dreamer-Light"));
/// assert_eq!(theme, Theme::DreamerLight);
/// assert!(theme.is_light() && theme.is_dreamer());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    FreeLight,
    #[default]
    FreeDark,
    DreamerLight,
    DreamerDark,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::FreeLight,
        Theme::FreeDark,
        Theme::DreamerLight,
        Theme::DreamerDark,
    ];

    pub const fn new(brand: Brand, brightness: Brightness) -> Self {
        match (brand, brightness) {
            (Brand::Free, Brightness::Light) => Theme::FreeLight,
            (Brand::Free, Brightness::Dark) => Theme::FreeDark,
            (Brand::Dreamer, Brightness::Light) => Theme::DreamerLight,
            (Brand::Dreamer, Brightness::Dark) => Theme::DreamerDark,
        }
    }

    /// Stable string code
    pub const fn code(self) -> &'static str {
        match self {
            Theme::FreeLight => "free-light",
            Theme::FreeDark => "free-dark",
            Theme::DreamerLight => "dreamer-light",
            Theme::DreamerDark => "dreamer-dark",
        }
    }

    /// Parse a code case-insensitively, falling back to [`Theme::FreeDark`]
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|code| {
            Self::ALL
                .into_iter()
                .find(|theme| theme.code().eq_ignore_ascii_case(code.trim()))
        })
        .unwrap_or_default()
    }

    pub const fn brand(self) -> Brand {
        match self {
            Theme::FreeLight | Theme::FreeDark => Brand::Free,
            Theme::DreamerLight | Theme::DreamerDark => Brand::Dreamer,
        }
    }

    pub const fn brightness(self) -> Brightness {
        match self {
            Theme::FreeLight | Theme::DreamerLight => Brightness::Light,
            Theme::FreeDark | Theme::DreamerDark => Brightness::Dark,
        }
    }

    pub const fn is_light(self) -> bool {
        matches!(self.brightness(), Brightness::Light)
    }

    pub const fn is_dark(self) -> bool {
        matches!(self.brightness(), Brightness::Dark)
    }

    pub const fn is_free(self) -> bool {
        matches!(self.brand(), Brand::Free)
    }

    pub const fn is_dreamer(self) -> bool {
        matches!(self.brand(), Brand::Dreamer)
    }

    /// Same brand with the other brightness
    pub const fn toggled_brightness(self) -> Self {
        match self.brightness() {
            Brightness::Light => Theme::new(self.brand(), Brightness::Dark),
            Brightness::Dark => Theme::new(self.brand(), Brightness::Light),
        }
    }
}

impl From<&str> for Theme {
    fn from(code: &str) -> Self {
        Self::from_code(Some(code))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ThemeVisitor;

        impl Visitor<'_> for ThemeVisitor {
            type Value = Theme;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a theme code")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Theme, E> {
                Ok(Theme::from_code(Some(value)))
            }

            fn visit_none<E: de::Error>(self) -> Result<Theme, E> {
                Ok(Theme::default())
            }

            fn visit_unit<E: de::Error>(self) -> Result<Theme, E> {
                Ok(Theme::default())
            }
        }

        deserializer.deserialize_any(ThemeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, StrDeserializer, UnitDeserializer};

    #[test]
    fn test_code_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_code(Some(theme.code())), theme);

            let deserializer: StrDeserializer<'_, ValueError> = theme.code().into_deserializer();
            assert_eq!(Theme::deserialize(deserializer).unwrap(), theme);
        }
    }

    #[test]
    fn test_parse_fallbacks() {
        assert_eq!(Theme::from_code(None), Theme::FreeDark);
        assert_eq!(Theme::from_code(Some("sepia")), Theme::FreeDark);
        assert_eq!(Theme::from("FREE-LIGHT"), Theme::FreeLight);
        assert_eq!(Theme::from(" dreamer-dark "), Theme::DreamerDark);

        let unit: UnitDeserializer<ValueError> = ().into_deserializer();
        assert_eq!(Theme::deserialize(unit).unwrap(), Theme::FreeDark);
    }

    #[test]
    fn test_axes() {
        for theme in Theme::ALL {
            assert_eq!(Theme::new(theme.brand(), theme.brightness()), theme);
            assert_ne!(theme.is_light(), theme.is_dark());
            assert_ne!(theme.is_free(), theme.is_dreamer());
        }
        assert!(Theme::DreamerLight.is_dreamer());
        assert!(Theme::DreamerLight.is_light());
        assert_eq!(Theme::FreeLight.toggled_brightness(), Theme::FreeDark);
        assert_eq!(Theme::DreamerDark.toggled_brightness(), Theme::DreamerLight);
    }
}
