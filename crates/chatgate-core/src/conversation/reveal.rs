//! Incremental reveal of a received reply.

/// Yields the characters of a reply one at a time.
///
/// The full reply is already in memory; the sequence only decides how much
/// of it is visible. Appending each yielded `char` to the shown text grows it
/// one prefix at a time, and multi-byte text is never split.
///
/// ```
/// use chatgate_core::conversation::RevealSequence;
///
/// let mut shown = String::new();
/// let mut frames = Vec::new();
/// for ch in RevealSequence::new("hey") {
///     shown.push(ch);
///     frames.push(shown.clone());
/// }
/// assert_eq!(frames, vec!["h", "he", "hey"]);
/// ```
#[derive(Debug, Clone)]
pub struct RevealSequence<'a> {
    text: &'a str,
    /// Byte offset just past the last yielded character.
    cursor: usize,
}

impl<'a> RevealSequence<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.text.len()
    }

    /// Skips the remaining characters and returns the full text.
    pub fn finish(&mut self) -> &'a str {
        self.cursor = self.text.len();
        self.text
    }
}

impl Iterator for RevealSequence<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let ch = self.text[self.cursor..].chars().next()?;
        self.cursor += ch.len_utf8();
        Some(ch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text[self.cursor..].chars().count();
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The text shown after each step of a full reveal.
    fn frames(text: &str) -> Vec<String> {
        let mut shown = String::new();
        RevealSequence::new(text)
            .map(|ch| {
                shown.push(ch);
                shown.clone()
            })
            .collect()
    }

    #[test]
    fn test_hello_frames_in_order() {
        assert_eq!(frames("hello"), vec!["h", "he", "hel", "hell", "hello"]);
    }

    #[test]
    fn test_frames_are_monotonic_and_end_with_full_text() {
        let text = "héllo wörld ✓";
        let frames = frames(text);

        assert_eq!(frames.len(), text.chars().count());
        for pair in frames.windows(2) {
            assert!(pair[1].len() > pair[0].len());
            assert!(pair[1].starts_with(pair[0].as_str()));
        }
        assert_eq!(frames.last().map(String::as_str), Some(text));
    }

    #[test]
    fn test_empty_text_has_no_frames() {
        let mut reveal = RevealSequence::new("");
        assert!(reveal.is_finished());
        assert_eq!(reveal.next(), None);
    }

    #[test]
    fn test_finish_skips_remaining_frames() {
        let mut reveal = RevealSequence::new("abc");
        assert_eq!(reveal.next(), Some('a'));

        assert_eq!(reveal.finish(), "abc");
        assert!(reveal.is_finished());
        assert_eq!(reveal.next(), None);
    }

    #[test]
    fn test_size_hint_counts_chars() {
        let mut reveal = RevealSequence::new("añb");
        assert_eq!(reveal.size_hint(), (3, Some(3)));
        reveal.next();
        assert_eq!(reveal.next(), Some('ñ'));
        assert_eq!(reveal.size_hint(), (1, Some(1)));
    }
}
