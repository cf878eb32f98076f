//! Screen geometry configuration

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};

/// Native width of the head-unit panel
pub const DISPLAY_WIDTH_PX: u32 = 1920;
/// Native height of the head-unit panel
pub const DISPLAY_HEIGHT_PX: u32 = 720;

/// Left inset of the tab strip
pub const DEFAULT_OFFSET_X: i32 = 145;
/// Top inset shared by the tab strip and the active panel
pub const DEFAULT_OFFSET_Y: i32 = 50;
/// Horizontal gap between the tab strip and the active panel
pub const DEFAULT_GAP_X: i32 = 0;

/// Geometry of a [`Screen`](crate::ui::Screen).
///
/// Offsets are signed so that a deserialized or user-supplied negative value
/// can be reported instead of wrapping; [`ScreenConfig::validate`] rejects
/// them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub gap_x: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH_PX,
            height: DISPLAY_HEIGHT_PX,
            offset_x: DEFAULT_OFFSET_X,
            offset_y: DEFAULT_OFFSET_Y,
            gap_x: DEFAULT_GAP_X,
        }
    }
}

impl ScreenConfig {
    pub fn with_offsets(mut self, offset_x: i32, offset_y: i32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn with_gap_x(mut self, gap_x: i32) -> Self {
        self.gap_x = gap_x;
        self
    }

    /// Check that every offset is a non-negative pixel distance
    pub fn validate(&self) -> UiResult<()> {
        non_negative("offset_x", self.offset_x)?;
        non_negative("offset_y", self.offset_y)?;
        non_negative("gap_x", self.gap_x)?;
        Ok(())
    }
}

/// Convert a signed pixel distance, rejecting negatives
pub(crate) fn non_negative(axis: &'static str, value: i32) -> UiResult<u32> {
    u32::try_from(value).map_err(|_| UiError::NegativeOffset { axis, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let config = ScreenConfig::default();
        assert_eq!(config.width, 1920);
        assert_eq!(config.height, 720);
        assert_eq!(config.offset_x, 145);
        assert_eq!(config.offset_y, 50);
        assert_eq!(config.gap_x, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_offsets_rejected() {
        let config = ScreenConfig::default().with_offsets(-1, 50);
        assert_eq!(
            config.validate(),
            Err(UiError::NegativeOffset {
                axis: "offset_x",
                value: -1
            })
        );

        let config = ScreenConfig::default().with_gap_x(-3);
        assert_eq!(
            config.validate(),
            Err(UiError::NegativeOffset {
                axis: "gap_x",
                value: -3
            })
        );
    }

    #[test]
    fn test_non_negative_conversion() {
        assert_eq!(non_negative("offset_y", 0), Ok(0));
        assert_eq!(non_negative("offset_y", 42), Ok(42));
        assert!(non_negative("offset_y", i32::MIN).is_err());
    }
}
