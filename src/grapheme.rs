use crate::upos_type;
use unicode_segmentation::UnicodeSegmentation;

/// Count as position.
#[inline]
pub(crate) fn upos(n: usize) -> upos_type {
    upos_type::try_from(n).unwrap_or(upos_type::MAX)
}

/// Convert a char offset into a grapheme offset.
///
/// The engine counts chars, an editable control moves its cursor
/// by grapheme. An offset inside a grapheme is moved behind it.
/// Offsets past the end give the length of the text.
pub(crate) fn grapheme_pos(s: &str, char_pos: usize) -> upos_type {
    let byte_pos = s
        .char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    upos(
        s.grapheme_indices(true)
            .take_while(|(i, _)| *i < byte_pos)
            .count(),
    )
}
