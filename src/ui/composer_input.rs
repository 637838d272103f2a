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

use crate::app::{AttachmentSet, ComposerAction, ComposerCommand, ComposerState, SLOW_MODE_PLACEHOLDER};
use crate::chat::ChatMessage;
use crate::ui::factory::ViewFactory;
use crate::ui::quoted::QuoteKind;
use crate::ui::text_input::SelectedRange;
use crate::ui::{View, theme};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Widget};
use unicode_width::UnicodeWidthStr;

/// Everything the input box shows, borrowed from wherever it lives.
#[derive(Debug, Clone, Copy)]
pub struct ComposerInputProps<'a> {
    pub text: &'a str,
    pub selected_range_location: usize,
    pub selection_length: usize,
    pub command: Option<&'a ComposerCommand>,
    pub attachments: &'a AttachmentSet,
    pub quoted: Option<&'a ChatMessage>,
    pub edited: Option<&'a ChatMessage>,
    pub cooldown_duration: u32,
    pub placeholder: &'a str,
    pub editable: bool,
}

impl<'a> ComposerInputProps<'a> {
    /// `text` is passed separately because the state stores it as lines.
    pub fn from_state(state: &'a ComposerState, text: &'a str) -> Self {
        Self {
            text,
            selected_range_location: state.selected_range_location(),
            selection_length: state.selection_len,
            command: state.command.as_ref(),
            attachments: &state.attachments,
            quoted: state.quoted.as_ref(),
            edited: state.edited.as_ref(),
            cooldown_duration: state.cooldown.remaining_secs(),
            placeholder: state.effective_placeholder(),
            editable: state.editable,
        }
    }
}

/// Rows inside the box, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InputAreas {
    header: Option<Rect>,
    attachments: Option<Rect>,
    command: Option<Rect>,
    text: Rect,
    countdown: Option<Rect>,
}

/// Rounded input box: quoted/edited header, attachment strip, command chip,
/// text, and the slow-mode countdown.
pub struct ComposerInputView {
    header: Option<Box<dyn View>>,
    attachments: Option<Box<dyn View>>,
    command: Option<ComposerCommand>,
    text_input: Box<dyn View>,
    cooldown_duration: u32,
}

impl ComposerInputView {
    pub fn new(factory: &dyn ViewFactory, props: ComposerInputProps<'_>) -> Self {
        let slow_mode = props.cooldown_duration > 0;
        let header = match (props.edited, props.quoted) {
            (Some(edited), _) => Some(factory.make_quoted_message_view(edited, QuoteKind::Edit)),
            (None, Some(quoted)) => Some(factory.make_quoted_message_view(quoted, QuoteKind::Reply)),
            (None, None) => None,
        };
        let attachments =
            (!props.attachments.is_empty()).then(|| factory.make_attachment_view(props.attachments));
        let placeholder = if slow_mode { SLOW_MODE_PLACEHOLDER } else { props.placeholder };
        // An edit is not a new message, so the cooldown doesn't lock it.
        let editable = props.editable && (!slow_mode || props.edited.is_some());
        let text_input = factory.make_composer_text_input_view(
            props.text,
            SelectedRange {
                location: props.selected_range_location,
                length: props.selection_length,
            },
            placeholder,
            editable,
        );
        Self {
            header,
            attachments,
            command: props.command.cloned(),
            text_input,
            cooldown_duration: props.cooldown_duration,
        }
    }

    /// Build straight from live composer state.
    pub fn from_state(factory: &dyn ViewFactory, state: &ComposerState) -> Self {
        let text = state.text();
        Self::new(factory, ComposerInputProps::from_state(state, &text))
    }

    fn block() -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::DIM))
            .padding(Padding::horizontal(1))
    }

    fn countdown_label(&self) -> Option<String> {
        (self.cooldown_duration > 0).then(|| format!("{}s", self.cooldown_duration))
    }

    fn extra_rows(&self) -> u16 {
        u16::from(self.header.is_some())
            + u16::from(self.attachments.is_some())
            + u16::from(self.command.is_some())
    }

    fn areas(&self, area: Rect) -> InputAreas {
        let inner = Self::block().inner(area);
        let mut y = inner.y;
        let mut take_row = |present: bool| {
            (present && y < inner.bottom()).then(|| {
                let row = Rect::new(inner.x, y, inner.width, 1);
                y += 1;
                row
            })
        };
        let header = take_row(self.header.is_some());
        let attachments = take_row(self.attachments.is_some());
        let command = take_row(self.command.is_some());
        let mut text = Rect::new(inner.x, y, inner.width, inner.bottom().saturating_sub(y));

        let countdown = self.countdown_label().map(|label| {
            let label_width = u16::try_from(label.width()).unwrap_or(u16::MAX).min(text.width);
            let countdown =
                Rect::new(text.right() - label_width, text.y, label_width, text.height.min(1));
            text.width = text.width.saturating_sub(label_width + 1);
            countdown
        });
        InputAreas { header, attachments, command, text, countdown }
    }
}

impl View for ComposerInputView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Self::block().render(area, buf);
        let areas = self.areas(area);

        if let (Some(view), Some(row)) = (&self.header, areas.header) {
            view.render(row, buf);
        }
        if let (Some(view), Some(row)) = (&self.attachments, areas.attachments) {
            view.render(row, buf);
        }
        if let (Some(command), Some(row)) = (&self.command, areas.command) {
            let chip = format!("/{}", command.name());
            buf.set_stringn(
                row.x,
                row.y,
                chip,
                usize::from(row.width),
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
            );
        }
        if areas.text.height > 0 {
            self.text_input.render(areas.text, buf);
        }
        if let (Some(label), Some(slot)) = (self.countdown_label(), areas.countdown)
            && slot.height > 0
        {
            buf.set_stringn(
                slot.x,
                slot.y,
                label,
                usize::from(slot.width),
                Style::default().fg(theme::DIM),
            );
        }
    }

    fn cursor_position(&self, area: Rect) -> Option<Position> {
        let text = self.areas(area).text;
        if text.height == 0 {
            return None;
        }
        self.text_input.cursor_position(text)
    }

    fn desired_height(&self, width: u16) -> u16 {
        let text_width = Self::block().inner(Rect::new(0, 0, width, 3)).width;
        let text_width = match self.countdown_label() {
            Some(label) => text_width
                .saturating_sub(u16::try_from(label.width()).unwrap_or(u16::MAX))
                .saturating_sub(1),
            None => text_width,
        };
        2 + self.extra_rows() + self.text_input.desired_height(text_width)
    }

    fn tap(&self, area: Rect, at: Position) -> Option<ComposerAction> {
        let areas = self.areas(area);
        match (&self.attachments, areas.attachments) {
            (Some(view), Some(row)) if row.contains(at) => view.tap(row, at),
            _ => None,
        }
    }
}
