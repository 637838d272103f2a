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

use crate::ui::{View, theme};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthChar;

/// Upper bound on text rows the composer grows to before scrolling.
pub const MAX_TEXT_ROWS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectedRange {
    /// Char offset of the cursor / selection start.
    pub location: usize,
    /// Selected chars after `location`.
    pub length: usize,
}

/// One visual row of wrapped text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct VisualRow {
    /// Flat char offset of the row's first char (line breaks count as one).
    start: usize,
    text: String,
}

/// Text wrapped to a fixed display width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextLayout {
    rows: Vec<VisualRow>,
    char_count: usize,
}

impl TextLayout {
    /// Wrap by display width, breaking anywhere. A line that exactly fills
    /// the width gets an extra empty row so an end-of-line cursor has a cell.
    pub(crate) fn new(text: &str, width: u16) -> Self {
        let width = usize::from(width);
        let mut rows = Vec::new();
        let mut offset = 0usize;
        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                offset += 1;
            }
            let mut seg = String::new();
            let mut seg_width = 0usize;
            let mut seg_start = offset;
            for ch in line.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if seg_width + ch_width > width && !seg.is_empty() {
                    rows.push(VisualRow { start: seg_start, text: std::mem::take(&mut seg) });
                    seg_start = offset;
                    seg_width = 0;
                }
                seg.push(ch);
                seg_width += ch_width;
                offset += 1;
            }
            let full = width > 0 && seg_width >= width;
            rows.push(VisualRow { start: seg_start, text: seg });
            if full {
                rows.push(VisualRow { start: offset, text: String::new() });
            }
        }
        Self { rows, char_count: offset }
    }

    pub(crate) fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Visual (row, column) of a flat char offset, clamped to the text end.
    pub(crate) fn locate(&self, offset: usize) -> (usize, u16) {
        let offset = offset.min(self.char_count);
        let row = self.rows.iter().rposition(|r| r.start <= offset).unwrap_or(0);
        let visual = &self.rows[row];
        let col: usize = visual
            .text
            .chars()
            .take(offset - visual.start)
            .map(|c| c.width().unwrap_or(0))
            .sum();
        (row, u16::try_from(col).unwrap_or(u16::MAX))
    }

    /// First row to draw so `cursor_row` stays inside `height` rows.
    pub(crate) fn scroll_for(cursor_row: usize, height: u16) -> usize {
        cursor_row.saturating_sub(usize::from(height.max(1)) - 1)
    }

    fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        first_row: usize,
        selection: Option<(usize, usize)>,
        style: Style,
    ) {
        for (i, row) in self.rows.iter().skip(first_row).take(usize::from(area.height)).enumerate() {
            let y = area.y + u16::try_from(i).unwrap_or(u16::MAX);
            let mut x = area.x;
            for (n, ch) in row.text.chars().enumerate() {
                let ch_width = u16::try_from(ch.width().unwrap_or(0)).unwrap_or(0);
                if x + ch_width > area.right() {
                    break;
                }
                let offset = row.start + n;
                let mut cell_style = style;
                if selection.is_some_and(|(start, end)| offset >= start && offset < end) {
                    cell_style = cell_style.add_modifier(Modifier::REVERSED);
                }
                let mut tmp = [0u8; 4];
                buf.set_string(x, y, ch.encode_utf8(&mut tmp), cell_style);
                x += ch_width;
            }
        }
    }
}

/// Low-level editable text surface: wrapped text, a cursor, and an
/// optional selection. Configure by setting the public fields after `new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTextView {
    pub frame: Rect,
    pub text: String,
    pub selected_range: SelectedRange,
    pub editable: bool,
}

impl InputTextView {
    pub fn new(frame: Rect) -> Self {
        Self { frame, text: String::new(), selected_range: SelectedRange::default(), editable: true }
    }

    fn layout(&self, area: Rect) -> TextLayout {
        TextLayout::new(&self.text, area.width)
    }
}

impl View for InputTextView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let layout = self.layout(area);
        let (cursor_row, _) = layout.locate(self.selected_range.location);
        let first = TextLayout::scroll_for(cursor_row, area.height);
        let SelectedRange { location, length } = self.selected_range;
        let selection = (length > 0).then(|| (location, location.saturating_add(length)));
        layout.render(area, buf, first, selection, Style::default());
    }

    fn cursor_position(&self, area: Rect) -> Option<Position> {
        if !self.editable || area.width == 0 || area.height == 0 {
            return None;
        }
        let layout = self.layout(area);
        let (row, col) = layout.locate(self.selected_range.location);
        let first = TextLayout::scroll_for(row, area.height);
        let y = u16::try_from(row - first).ok()?;
        let pos = Position::new(area.x + col, area.y + y);
        (pos.x < area.right() && pos.y < area.bottom()).then_some(pos)
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.frame.height.max(rows_u16(TextLayout::new(&self.text, width).row_count()))
    }
}

/// Composer text field: [`InputTextView`] plus placeholder, editability and
/// a fitted height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerTextInputView {
    pub text: String,
    /// Rows reserved before the content is measured.
    pub height: u16,
    pub selected_range_location: usize,
    /// Chars selected after `selected_range_location`.
    pub selection_length: usize,
    pub placeholder: String,
    pub editable: bool,
}

impl ComposerTextInputView {
    pub fn new(
        text: impl Into<String>,
        height: u16,
        selected_range_location: usize,
        placeholder: impl Into<String>,
        editable: bool,
    ) -> Self {
        Self {
            text: text.into(),
            height,
            selected_range_location,
            selection_length: 0,
            placeholder: placeholder.into(),
            editable,
        }
    }

    #[must_use]
    pub fn with_selection_length(mut self, length: usize) -> Self {
        self.selection_length = length;
        self
    }

    fn surface(&self, area: Rect) -> InputTextView {
        InputTextView {
            frame: area,
            text: self.text.clone(),
            selected_range: SelectedRange {
                location: self.selected_range_location,
                length: self.selection_length,
            },
            editable: self.editable,
        }
    }
}

impl View for ComposerTextInputView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.text.is_empty() {
            buf.set_stringn(
                area.x,
                area.y,
                &self.placeholder,
                usize::from(area.width),
                Style::default().fg(theme::DIM),
            );
            return;
        }
        self.surface(area).render(area, buf);
    }

    fn cursor_position(&self, area: Rect) -> Option<Position> {
        if !self.editable || area.width == 0 || area.height == 0 {
            return None;
        }
        if self.text.is_empty() {
            return Some(Position::new(area.x, area.y));
        }
        self.surface(area).cursor_position(area)
    }

    fn desired_height(&self, width: u16) -> u16 {
        let rows = rows_u16(TextLayout::new(&self.text, width).row_count());
        rows.max(self.height).clamp(1, MAX_TEXT_ROWS)
    }
}

fn rows_u16(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}
