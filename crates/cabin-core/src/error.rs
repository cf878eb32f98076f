//! Error type shared by every widget setter

use thiserror_no_std::Error;

/// Precondition violations reported by widget setters and constructors.
///
/// Soft inconsistencies (unknown tab values, out-of-range panel indices,
/// unexpected child shapes during propagation) are not errors; those are
/// ignored by the widgets themselves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A theme setter was called without a theme
    #[error("Theme cannot be empty")]
    MissingTheme,

    /// A language setter was called without a language
    #[error("Language cannot be empty")]
    MissingLanguage,

    /// Screen offsets and gaps are pixel distances
    #[error("{axis} cannot be negative: {value}")]
    NegativeOffset {
        /// Which setting was rejected
        axis: &'static str,
        /// The rejected value
        value: i32,
    },

    /// Raw screen lift code outside the known set
    #[error("Invalid screen lift state: {0}")]
    InvalidScreenLift(u8),

    /// Tab and radio item values are used as keys
    #[error("Item value cannot be blank")]
    BlankValue,

    /// Labels need at least one translation
    #[error("Label must have at least one translation")]
    EmptyLabel,
}

/// Result type for widget operations
pub type UiResult<T> = Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_messages() {
        assert_eq!(UiError::MissingTheme.to_string(), "Theme cannot be empty");
        assert_eq!(
            UiError::NegativeOffset {
                axis: "offset_x",
                value: -5
            }
            .to_string(),
            "offset_x cannot be negative: -5"
        );
        assert_eq!(
            UiError::InvalidScreenLift(7).to_string(),
            "Invalid screen lift state: 7"
        );
    }
}
