//! The mask value.
//!
//! A mask is a pattern of literal characters and placeholders.
//! Every placeholder marks a slot for one char of raw input,
//! everything else is copied to the output as is.
//!
//! ```text
//! Card   ####-####-####-####
//! Phone  +### (##) ###-###
//! Date   ##/##/####
//! ```
//!
//! A mask is immutable. Any change of pattern, placeholder or
//! length enforcement creates a new mask.

use crate::_private::NonExhaustive;
use crate::MaskError;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{Bound, RangeBounds};

/// Default placeholder.
pub const DEFAULT_PLACEHOLDER: char = '#';

/// Options for constructing a [Mask].
///
/// ```rust
/// use rat_mask::{Mask, MaskConfig};
///
/// let mask = Mask::from_config(
///     "$$/$$",
///     MaskConfig {
///         placeholder: '$',
///         ..Default::default()
///     },
/// );
/// assert!(mask.is_length_enforced());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskConfig {
    /// Placeholder in the pattern. Defaults to `#`.
    pub placeholder: char,
    /// Truncate everything beyond the length of the pattern.
    /// Defaults to true.
    pub enforce_length: bool,

    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER,
            enforce_length: true,
            non_exhaustive: NonExhaustive,
        }
    }
}

/// Input mask.
///
/// Equality and hash cover pattern, placeholder and
/// length enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mask {
    pattern: String,
    placeholder: char,
    enforce_length: bool,
}

impl Default for Mask {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for Mask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl Mask {
    /// Mask with the default placeholder `#` and enforced length.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::from_config(pattern, MaskConfig::default())
    }

    /// Mask with all parts given.
    ///
    /// This never fails. Use [Mask::validate] before using the mask
    /// for a text field.
    pub fn new_with(pattern: impl Into<String>, placeholder: char, enforce_length: bool) -> Self {
        Self {
            pattern: pattern.into(),
            placeholder,
            enforce_length,
        }
    }

    /// Mask from a pattern and the options.
    pub fn from_config(pattern: impl Into<String>, config: MaskConfig) -> Self {
        Self::new_with(pattern, config.placeholder, config.enforce_length)
    }

    /// No mask at all. Every input is accepted as is.
    ///
    /// Length enforcement is off, otherwise this would accept nothing.
    pub fn empty() -> Self {
        Self::new_with("", DEFAULT_PLACEHOLDER, false)
    }

    /// Same mask with a different placeholder.
    #[inline]
    pub fn placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Same mask with different length enforcement.
    #[inline]
    pub fn enforce_length(mut self, enforce_length: bool) -> Self {
        self.enforce_length = enforce_length;
        self
    }

    /// Same mask with a different pattern.
    #[inline]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// The pattern.
    #[inline]
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// The placeholder.
    #[inline]
    pub fn placeholder_char(&self) -> char {
        self.placeholder
    }

    /// Output is truncated to the pattern length.
    #[inline]
    pub fn is_length_enforced(&self) -> bool {
        self.enforce_length
    }

    /// Length of the pattern in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.pattern.chars().count()
    }

    /// Empty pattern.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Checks that a non-empty pattern contains at least one
    /// placeholder.
    ///
    /// Slots are found char by char, so a placeholder followed by
    /// a combining mark is still a slot.
    pub fn validate(&self) -> Result<(), MaskError> {
        if !self.pattern.is_empty() && !self.pattern.contains(self.placeholder) {
            Err(MaskError::PlaceholderMissing(
                self.pattern.clone(),
                self.placeholder,
            ))
        } else {
            Ok(())
        }
    }

    /// New mask for a part of the pattern. The range counts chars.
    ///
    /// Out of bounds values are clamped to the pattern length,
    /// a reversed range gives an empty pattern.
    pub fn substring(&self, range: impl RangeBounds<usize>) -> Mask {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(v) => *v,
            Bound::Excluded(v) => v.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(v) => v.saturating_add(1),
            Bound::Excluded(v) => *v,
            Bound::Unbounded => len,
        };
        let end = end.min(len);
        let start = start.min(end);

        Mask {
            pattern: self.pattern.chars().skip(start).take(end - start).collect(),
            placeholder: self.placeholder,
            enforce_length: self.enforce_length,
        }
    }
}
