// chat_composer — Terminal chat composer components and snapshot harness
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// Editable composer text, stored as logical lines with a (row, col) cursor.
///
/// Columns count chars, not bytes. The flat "selected range location" used by
/// the views is the char offset into `text()` where each line break counts as
/// one char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self { lines: vec![String::new()], cursor_row: 0, cursor_col: 0 }
    }

    /// Build from text with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let mut state = Self::new();
        state.set_text(text);
        state
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Whether the text holds anything besides whitespace.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.lines.iter().any(|l| !l.trim().is_empty())
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// Replace the whole text and move the cursor to its end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(|l| l.trim_end_matches('\r').to_owned()).collect();
        self.cursor_row = self.lines.len() - 1;
        self.cursor_col = self.lines[self.cursor_row].chars().count();
    }

    /// Flat char offset of the cursor.
    #[must_use]
    pub fn cursor_offset(&self) -> usize {
        let before: usize = self.lines[..self.cursor_row].iter().map(|l| l.chars().count() + 1).sum();
        before + self.cursor_col
    }

    /// Place the cursor at a flat char offset, clamped to the text length.
    pub fn set_cursor_offset(&mut self, offset: usize) {
        let mut remaining = offset;
        for (row, line) in self.lines.iter().enumerate() {
            let len = line.chars().count();
            if remaining <= len {
                self.cursor_row = row;
                self.cursor_col = remaining;
                return;
            }
            remaining -= len + 1;
        }
        self.move_to_end_of_text();
    }

    fn move_to_end_of_text(&mut self) {
        self.cursor_row = self.lines.len() - 1;
        self.cursor_col = self.lines[self.cursor_row].chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.cursor_row];
        let byte_idx = char_to_byte_index(line, self.cursor_col);
        line.insert(byte_idx, c);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let byte_idx = char_to_byte_index(line, self.cursor_col);
        let rest = line[byte_idx..].to_owned();
        line.truncate(byte_idx);
        self.cursor_row += 1;
        self.lines.insert(self.cursor_row, rest);
        self.cursor_col = 0;
    }

    pub fn insert_str(&mut self, s: &str) {
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    // \r\n counts once
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    self.insert_newline();
                }
                '\n' => self.insert_newline(),
                _ => self.insert_char(c),
            }
        }
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            self.cursor_col -= 1;
            let byte_idx = char_to_byte_index(line, self.cursor_col);
            line.remove(byte_idx);
        } else if self.cursor_row > 0 {
            let removed = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
            self.lines[self.cursor_row].push_str(&removed);
        }
    }

    pub fn delete_char_after(&mut self) {
        let line_len = self.lines[self.cursor_row].chars().count();
        if self.cursor_col < line_len {
            let line = &mut self.lines[self.cursor_row];
            let byte_idx = char_to_byte_index(line, self.cursor_col);
            line.remove(byte_idx);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
        }
    }

    pub fn move_right(&mut self) {
        let line_len = self.lines[self.cursor_row].chars().count();
        if self.cursor_col < line_len {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            let line_len = self.lines[self.cursor_row].chars().count();
            self.cursor_col = self.cursor_col.min(line_len);
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            let line_len = self.lines[self.cursor_row].chars().count();
            self.cursor_col = self.cursor_col.min(line_len);
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.lines[self.cursor_row].chars().count();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a character index to a byte index within a string.
pub(crate) fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    // =====
    // TESTS: 12
    // =====

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_is_empty() {
        let input = InputState::new();
        assert!(input.is_empty());
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor_offset(), 0);
    }

    #[test]
    fn set_text_puts_cursor_at_end() {
        let input = InputState::from_text("ab\ncde");
        assert_eq!(input.lines, vec!["ab".to_owned(), "cde".to_owned()]);
        assert_eq!((input.cursor_row, input.cursor_col), (1, 3));
        assert_eq!(input.cursor_offset(), 6);
    }

    #[test]
    fn cursor_offset_round_trips_across_lines() {
        let mut input = InputState::from_text("ab\ncde");
        input.set_cursor_offset(3);
        assert_eq!((input.cursor_row, input.cursor_col), (1, 0));
        input.set_cursor_offset(2);
        assert_eq!((input.cursor_row, input.cursor_col), (0, 2));
    }

    #[test]
    fn cursor_offset_clamps_past_end() {
        let mut input = InputState::from_text("This is a sample text");
        input.set_cursor_offset(500);
        assert_eq!(input.cursor_offset(), 21);
    }

    #[test]
    fn moving_cursor_keeps_text() {
        let mut input = InputState::from_text("This is a sample text");
        input.set_cursor_offset(3);
        assert_eq!(input.text(), "This is a sample text");
        assert_eq!(input.cursor_col, 3);
    }

    #[test]
    fn insert_at_cursor_offset() {
        let mut input = InputState::from_text("helo");
        input.set_cursor_offset(3);
        input.insert_char('l');
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor_offset(), 4);
    }

    #[test]
    fn insert_str_normalizes_crlf() {
        let mut input = InputState::new();
        input.insert_str("a\r\nb\rc");
        assert_eq!(input.lines, vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn backspace_joins_lines() {
        let mut input = InputState::from_text("ab\ncd");
        input.set_cursor_offset(3);
        input.delete_char_before();
        assert_eq!(input.text(), "abcd");
        assert_eq!(input.cursor_offset(), 2);
    }

    #[test]
    fn delete_after_joins_next_line() {
        let mut input = InputState::from_text("ab\ncd");
        input.set_cursor_offset(2);
        input.delete_char_after();
        assert_eq!(input.text(), "abcd");
    }

    #[test]
    fn multibyte_chars_edit_by_char() {
        let mut input = InputState::from_text("héllo");
        input.set_cursor_offset(2);
        input.delete_char_before();
        assert_eq!(input.text(), "hllo");
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut input = InputState::from_text("long line\nab");
        input.move_up();
        assert_eq!((input.cursor_row, input.cursor_col), (0, 2));
        input.move_end();
        input.move_down();
        assert_eq!((input.cursor_row, input.cursor_col), (1, 2));
    }

    #[test]
    fn whitespace_only_has_no_content() {
        let input = InputState::from_text("  \n ");
        assert!(!input.is_empty());
        assert!(!input.has_content());
    }
}
