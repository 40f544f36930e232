//! Operations for applying a [Mask].
//!
//! All of these are pure functions of their arguments.
//! Lengths and positions count chars.

use crate::grapheme::upos;
use crate::{upos_type, Mask};

/// Result of [re_mask].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReMasked {
    /// New masked text.
    pub text: String,
    /// Cursor position after the edit in chars.
    /// Always <= the length of text.
    pub caret: upos_type,
}

impl ReMasked {
    pub fn new(text: impl Into<String>, caret: upos_type) -> Self {
        Self {
            text: text.into(),
            caret,
        }
    }
}

/// Apply the mask to raw input.
///
/// Each char of the input goes into the next placeholder slot,
/// the literals in between are copied. Literals after the last filled
/// slot are appended up to the next placeholder, so `12` with `##-##`
/// gives `12-`.
///
/// Input that doesn't fit the pattern is appended after the
/// pattern, or cut off if the mask enforces its length.
///
/// Placeholders in the input are not special.
pub fn project(raw: &str, mask: &Mask) -> String {
    let placeholder = mask.placeholder_char();
    let pattern: Vec<char> = mask.pattern_str().chars().collect();

    let mut out = String::with_capacity(mask.pattern_str().len() + raw.len());
    let mut mask_pos = 0;
    for (byte_pos, c) in raw.char_indices() {
        if let Some(slot) = find_from(&pattern, mask_pos, placeholder) {
            out.extend(&pattern[mask_pos..slot]);
            out.push(c);
            mask_pos = slot + 1;
        } else {
            // pattern exhausted
            out.extend(&pattern[mask_pos..]);
            out.push_str(&raw[byte_pos..]);
            mask_pos = pattern.len();
            break;
        }
    }
    let trailing = find_from(&pattern, mask_pos, placeholder).unwrap_or(pattern.len());
    out.extend(&pattern[mask_pos..trailing]);

    if mask.is_length_enforced() {
        truncate_chars(&mut out, pattern.len());
    }
    out
}

/// Remove the mask from masked text.
///
/// Keeps the chars at placeholder positions and anything
/// beyond the end of the pattern.
pub fn strip(masked: &str, mask: &Mask) -> String {
    let placeholder = mask.placeholder_char();

    let mut out = String::new();
    let mut masked = masked.chars();
    for m in mask.pattern_str().chars() {
        let Some(c) = masked.next() else {
            return out;
        };
        if m == placeholder {
            out.push(c);
        }
    }
    out.extend(masked);
    out
}

/// Does the text follow the mask?
///
/// Every literal of the pattern must be present at its position.
/// The text may end at any placeholder, a partial input is still valid.
/// Anything beyond the pattern is accepted, unless the mask
/// enforces its length.
///
/// ```text
/// Mask ###--##
///
/// "abc"          false
/// "abc-"         false
/// "abc--"        true
/// "abc--a"       true
/// "abc--ab"      true
/// "abc--abEXTRA" true if length is not enforced
/// ```
pub fn is_masked(text: &str, mask: &Mask) -> bool {
    let placeholder = mask.placeholder_char();

    let pattern: Vec<char> = mask.pattern_str().chars().collect();
    let text: Vec<char> = text.chars().collect();

    if mask.is_length_enforced() && text.len() > pattern.len() {
        return false;
    }
    for (i, m) in pattern.iter().enumerate() {
        if *m != placeholder {
            if text.get(i) != Some(m) {
                return false;
            }
        } else if i >= text.len() {
            break;
        }
    }
    true
}

/// Re-apply the mask after the text has been edited.
///
/// `prev` is the masked text before the edit, `next` the text
/// after it. Both may differ only in one place: some chars
/// removed and/or some inserted at the same position. This is not
/// checked. With more than one changed region the result is
/// still some text, but not necessarily the expected one.
///
/// ```text
/// ├──────head──────┼────change────┼caret┼───tail───┤
/// ```
///
/// * head is the common prefix of both and stays as is.
/// * change is the new text, it gets the mask applied.
/// * tail is the common suffix. It is stripped and then masked again
///   from the new position.
///
/// Deleting a single literal deletes the raw char in front
/// of it instead. `ab-c--d` minus the `-` after `c` gives `ab-d--`.
///
/// The caret is placed after the change, not at the end of the text.
pub fn re_mask(prev: &str, next: &str, mask: &Mask) -> ReMasked {
    let placeholder = mask.placeholder_char();

    let pattern: Vec<char> = mask.pattern_str().chars().collect();
    let prev_c: Vec<char> = prev.chars().collect();
    let next_c: Vec<char> = next.chars().collect();

    let (head_len, prev_end, next_end) = edit_region(&prev_c, &next_c);
    let change: String = next_c[head_len..next_end].iter().collect();
    let tail: String = next_c[next_end..].iter().collect();

    // one literal deleted
    let mut keep = head_len;
    let deleted = prev_end - head_len;
    if deleted == 1 && pattern.len() > head_len && pattern[head_len] != placeholder {
        if let Some(slot) = rfind_before(&pattern, head_len, placeholder) {
            keep = slot;
        }
    }

    let tail_raw = strip(&tail, &mask.substring(prev_end.min(pattern.len())..));

    let mut text: String = next_c[..keep].iter().collect();
    text.push_str(&project(&change, &mask.substring(keep.min(pattern.len())..)));
    let caret = text.chars().count();
    text.push_str(&project(&tail_raw, &mask.substring(caret.min(pattern.len())..)));

    if mask.is_length_enforced() {
        truncate_chars(&mut text, pattern.len());
    }
    let caret = caret.min(text.chars().count());

    ReMasked {
        text,
        caret: upos(caret),
    }
}

/// Locate the one changed region between both texts.
///
/// Returns the length of the common prefix, and the end of the
/// changed region in prev and next. The common suffix never
/// overlaps the prefix.
fn edit_region(prev: &[char], next: &[char]) -> (usize, usize, usize) {
    let head_len = prev
        .iter()
        .zip(next.iter())
        .take_while(|(p, n)| p == n)
        .count();

    let mut prev_end = prev.len();
    let mut next_end = next.len();
    while prev_end > head_len && next_end > head_len && prev[prev_end - 1] == next[next_end - 1] {
        prev_end -= 1;
        next_end -= 1;
    }

    (head_len, prev_end, next_end)
}

/// Next placeholder at or after `start`.
fn find_from(pattern: &[char], start: usize, placeholder: char) -> Option<usize> {
    pattern
        .get(start..)?
        .iter()
        .position(|v| *v == placeholder)
        .map(|v| v + start)
}

/// Last placeholder before `end`.
fn rfind_before(pattern: &[char], end: usize, placeholder: char) -> Option<usize> {
    let end = end.min(pattern.len());
    pattern[..end].iter().rposition(|v| *v == placeholder)
}

fn truncate_chars(s: &mut String, len: usize) {
    if let Some((byte_pos, _)) = s.char_indices().nth(len) {
        s.truncate(byte_pos);
    }
}
