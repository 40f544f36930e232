#![doc = include_str!("../readme.md")]
#![allow(clippy::uninlined_format_args)]
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub mod mask;
pub mod mask_op;
pub mod masked_text;

mod grapheme;

pub use mask::{Mask, MaskConfig};
pub use mask_op::{is_masked, project, re_mask, strip, ReMasked};
pub use masked_text::{MaskOutcome, MaskState, MaskTarget, MaskedText};

/// Errors when configuring a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MaskError {
    /// The pattern is not empty but doesn't contain a single
    /// placeholder.
    ///
    /// Contains the pattern and the placeholder, in that order.
    PlaceholderMissing(String, char),
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MaskError::PlaceholderMissing(pattern, placeholder) => {
                write!(
                    f,
                    "mask {:?} does not contain the placeholder {:?}",
                    pattern, placeholder
                )
            }
        }
    }
}

impl Error for MaskError {}

/// Position type.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
