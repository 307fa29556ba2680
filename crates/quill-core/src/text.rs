/// Split on `'\n'` only, keeping trailing empty segments (N newlines => N+1 lines).
///
/// `'\r'` is left in place: offsets are counted over the raw buffer, so stripping it would shift
/// every column after it.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `char_offset`-th character, clamped to the end of `text`.
pub(crate) fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Number of leading `' '` characters (tabs are not indentation units here).
pub(crate) fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|&ch| ch == ' ').count()
}

/// Column of the first non-whitespace character (the line length if the line is blank).
pub(crate) fn first_non_blank(line: &str) -> usize {
    line.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// A single replacement in char offsets: `removed` chars at `start` replaced by `inserted` chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Splice {
    pub(crate) start: usize,
    pub(crate) removed: usize,
    pub(crate) inserted: usize,
}

impl Splice {
    pub(crate) fn end(&self) -> usize {
        self.start + self.removed
    }

    pub(crate) fn delta(&self) -> isize {
        self.inserted as isize - self.removed as isize
    }

    /// Map an offset from the pre-edit buffer into the post-edit buffer.
    ///
    /// Offsets inside the removed range collapse to `start`. An offset sitting exactly on a pure
    /// insertion point only moves past the inserted text when `after` is set.
    pub(crate) fn map(&self, pos: usize, after: bool) -> usize {
        let end = self.end();
        if pos < self.start {
            pos
        } else if pos > end || (pos == end && (self.removed > 0 || after)) {
            pos - self.removed + self.inserted
        } else {
            self.start
        }
    }
}
