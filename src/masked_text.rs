//! State for a text field with an input mask.
//!
//! [MaskedText] sits between an editable control and the
//! functions in [mask_op](crate::mask_op). The control reports
//! every change of its text with [MaskedText::text_changed],
//! and gets the re-masked text and cursor back via [MaskTarget].
//!
//! ```rust
//! use rat_mask::{Mask, MaskOutcome, MaskedText};
//!
//! let mut txt = MaskedText::new(Mask::new("##-##"))?;
//! txt.text_changed("1");
//! assert_eq!(txt.text(), "1");
//! let r = txt.text_changed("12");
//! assert!(matches!(r, MaskOutcome::Remasked(_)));
//! assert_eq!(txt.text(), "12-");
//! # Ok::<(), rat_mask::MaskError>(())
//! ```
//!
//! The mask itself is immutable. Changing pattern, placeholder or
//! length enforcement replaces it, and the current raw input is
//! masked again with the new mask.

use crate::grapheme::grapheme_pos;
use crate::mask_op::{is_masked, re_mask, strip, ReMasked};
use crate::{upos_type, Mask, MaskError};
use log::debug;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

/// The editable control that shows the masked text.
pub trait MaskTarget {
    /// Replace the text.
    fn set_text(&mut self, text: &str);

    /// Move the cursor. Counts graphemes, a combining mark
    /// typed on its own doesn't move the cursor.
    fn set_caret(&mut self, caret: upos_type);
}

/// Result of a change notification.
#[allow(variant_size_differences)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskOutcome {
    /// The text already follows the mask and is used as is.
    Accepted,
    /// The text has been re-masked.
    /// The result has been sent to the target too.
    /// The caret counts chars here.
    Remasked(ReMasked),
}

/// Persistent state. Mask and raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaskState {
    pub pattern: String,
    pub placeholder: char,
    pub enforce_length: bool,
    pub raw: String,
}

impl Default for MaskState {
    fn default() -> Self {
        let mask = Mask::empty();
        Self {
            pattern: mask.pattern_str().to_string(),
            placeholder: mask.placeholder_char(),
            enforce_length: mask.is_length_enforced(),
            raw: Default::default(),
        }
    }
}

/// Masked text.
///
/// Holds the mask and the last masked text. The last masked text
/// is needed to find the edit in the next change.
#[derive(Default)]
pub struct MaskedText {
    mask: Mask,
    masked: String,
    target: Option<Weak<RefCell<dyn MaskTarget>>>,
}

impl Debug for MaskedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskedText")
            .field("mask", &self.mask)
            .field("masked", &self.masked)
            .field(
                "target",
                &self.target.as_ref().map(|v| v.strong_count() > 0),
            )
            .finish()
    }
}

impl MaskedText {
    /// New with the given mask.
    ///
    /// Fails if the pattern is not empty and doesn't contain
    /// the placeholder.
    pub fn new(mask: Mask) -> Result<Self, MaskError> {
        mask.validate()?;
        Ok(Self {
            mask,
            masked: Default::default(),
            target: None,
        })
    }

    /// New from a saved state.
    pub fn from_state(state: MaskState) -> Result<Self, MaskError> {
        let mut s = Self::default();
        s.restore_state(state)?;
        Ok(s)
    }

    /// Attach the control.
    ///
    /// Only a weak reference is kept. Once the control is dropped,
    /// updates are silently skipped.
    pub fn set_target<T: MaskTarget + 'static>(&mut self, target: &Rc<RefCell<T>>) {
        let target: Weak<RefCell<T>> = Rc::downgrade(target);
        self.target = Some(target);
    }

    /// Detach the control.
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Current mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Current masked text.
    pub fn text(&self) -> &str {
        self.masked.as_str()
    }

    /// Raw input without the mask.
    ///
    /// For `##-##` and `ab-cd` this is `abcd`.
    pub fn raw_input(&self) -> String {
        strip(&self.masked, &self.mask)
    }

    /// The text of the control has changed.
    ///
    /// `next` is the complete new text. It may differ from the
    /// last masked text in one place only.
    pub fn text_changed(&mut self, next: &str) -> MaskOutcome {
        let r = self.apply(next);
        if let MaskOutcome::Remasked(r) = &r {
            self.update_target(&r.text, r.caret as usize);
        }
        r
    }

    /// Set a new text.
    ///
    /// Same as a change from the current text to this one.
    pub fn set_text(&mut self, text: impl AsRef<str>) -> MaskOutcome {
        self.text_changed(text.as_ref())
    }

    /// Set a new pattern. Placeholder and length enforcement
    /// stay the same.
    pub fn set_mask(&mut self, pattern: impl Into<String>) -> Result<(), MaskError> {
        self.set_mask_value(self.mask.clone().pattern(pattern))
    }

    /// Set a new pattern with a different placeholder.
    pub fn set_mask_with_placeholder(
        &mut self,
        pattern: impl Into<String>,
        placeholder: char,
    ) -> Result<(), MaskError> {
        self.set_mask_value(self.mask.clone().pattern(pattern).placeholder(placeholder))
    }

    /// Cut off everything beyond the length of the pattern.
    pub fn set_enforce_length(&mut self, enforce_length: bool) {
        let mask = self.mask.clone().enforce_length(enforce_length);
        self.replace_mask(mask);
    }

    /// Remove the mask. Any input is accepted afterwards.
    pub fn remove_mask(&mut self) {
        let mask = Mask::empty().placeholder(self.mask.placeholder_char());
        self.replace_mask(mask);
    }

    /// Replace the mask.
    ///
    /// The raw input is kept and masked again. The cursor
    /// moves to the end of the text.
    pub fn set_mask_value(&mut self, mask: Mask) -> Result<(), MaskError> {
        mask.validate()?;
        self.replace_mask(mask);
        Ok(())
    }

    /// Current mask and raw input.
    pub fn save_state(&self) -> MaskState {
        MaskState {
            pattern: self.mask.pattern_str().to_string(),
            placeholder: self.mask.placeholder_char(),
            enforce_length: self.mask.is_length_enforced(),
            raw: self.raw_input(),
        }
    }

    /// Restore mask and raw input.
    ///
    /// The current text is replaced. The state is not touched
    /// if the mask is invalid.
    pub fn restore_state(&mut self, state: MaskState) -> Result<(), MaskError> {
        let mask = Mask::new_with(state.pattern, state.placeholder, state.enforce_length);
        mask.validate()?;
        self.reset(mask, &state.raw);
        Ok(())
    }

    fn replace_mask(&mut self, mask: Mask) {
        let raw = self.raw_input();
        self.reset(mask, &raw);
    }

    fn reset(&mut self, mask: Mask, raw: &str) {
        debug!("mask {:?} -> {:?}", self.mask, mask);
        self.mask = mask;
        self.masked.clear();
        self.apply(raw);

        self.update_target(&self.masked, self.masked.chars().count());
    }

    fn apply(&mut self, next: &str) -> MaskOutcome {
        if is_masked(next, &self.mask) {
            debug!("accepted {:?}", next);
            self.masked = next.to_string();
            MaskOutcome::Accepted
        } else {
            let r = re_mask(&self.masked, next, &self.mask);
            debug!("remasked {:?} -> {:?} caret {}", next, r.text, r.caret);
            self.masked = r.text.clone();
            MaskOutcome::Remasked(r)
        }
    }

    fn update_target(&self, text: &str, caret: usize) {
        let Some(target) = &self.target else {
            return;
        };
        let Some(target) = target.upgrade() else {
            debug!("target dropped");
            return;
        };
        let Ok(mut target) = target.try_borrow_mut() else {
            debug!("target busy");
            return;
        };
        target.set_text(text);
        target.set_caret(grapheme_pos(text, caret));
    }
}
