/// Ideographic space (U+3000). It occupies two terminal columns, like the CJK
/// text the tables usually hold, so padding with it keeps columns aligned.
pub const FULL_WIDTH_SPACE: char = '\u{3000}';

/// Left-align `text` in a field of `width` characters. Longer text is kept
/// whole.
pub(crate) fn pad_end(text: &str, width: usize, fill: char) -> String {
    let missing = width.saturating_sub(text.chars().count());
    let mut padded = String::with_capacity(text.len() + missing * fill.len_utf8());
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(fill, missing));
    padded
}

/// Center `text` in a field of `width` characters. An odd remainder goes to
/// the right side.
pub(crate) fn center(text: &str, width: usize, fill: char) -> String {
    let padding = width.saturating_sub(text.chars().count());
    let left = padding / 2;
    let right = padding - left;
    let mut centered: String = std::iter::repeat_n(fill, left).collect();
    centered.push_str(text);
    centered.extend(std::iter::repeat_n(fill, right));
    centered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_end_counts_characters_not_bytes() {
        assert_eq!(pad_end("沙丘", 4, FULL_WIDTH_SPACE), "沙丘\u{3000}\u{3000}");
        assert_eq!(pad_end("Dune", 6, '.'), "Dune..");
    }

    #[test]
    fn pad_end_never_truncates() {
        assert_eq!(pad_end("Neuromancer", 4, ' '), "Neuromancer");
    }

    #[test]
    fn center_puts_extra_padding_right() {
        assert_eq!(center("ab", 5, '-'), "-ab--");
        assert_eq!(center("書名", 10, FULL_WIDTH_SPACE).chars().count(), 10);
        let heading = center("書名", 10, FULL_WIDTH_SPACE);
        assert!(heading.starts_with("\u{3000}\u{3000}\u{3000}\u{3000}書"));
    }
}
