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

use crate::chat::ChatMessage;
use crate::ui::{View, fit_width, theme};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Reply,
    Edit,
}

/// Header line above the text while replying to or editing a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedMessageView {
    pub kind: QuoteKind,
    pub author: String,
    pub text: String,
}

impl QuotedMessageView {
    pub fn new(message: &ChatMessage, kind: QuoteKind) -> Self {
        Self { kind, author: message.author.clone(), text: message.text.clone() }
    }

    fn label(&self) -> String {
        match self.kind {
            QuoteKind::Reply => format!("Reply to {}: ", self.author),
            QuoteKind::Edit => "Editing: ".to_owned(),
        }
    }
}

impl View for QuotedMessageView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let label = self.label();
        let prefix_width = 2 + label.width();
        let text_room = usize::from(area.width).saturating_sub(prefix_width);
        // First line only; the header is a single row.
        let body = self.text.lines().next().unwrap_or_default();
        let line = Line::from(vec![
            Span::styled(theme::QUOTE_BAR, Style::default().fg(theme::ACCENT)),
            Span::raw(" "),
            Span::styled(label, Style::default().fg(theme::DIM)),
            Span::styled(fit_width(body, text_room), Style::default().add_modifier(Modifier::ITALIC)),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
