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

//! Seam for swapping out composer pieces.
//!
//! Composite views never construct their children directly. They ask a
//! [`ViewFactory`], so an embedding app can restyle one piece (the send
//! button, say) by overriding a single method and inheriting the rest.

use crate::app::{AttachmentSet, ComposerAction};
use crate::chat::ChatMessage;
use crate::ui::View;
use crate::ui::attachments::AttachmentStripView;
use crate::ui::composer::LeadingComposerView;
use crate::ui::quoted::{QuoteKind, QuotedMessageView};
use crate::ui::text_input::{ComposerTextInputView, SelectedRange};
use crate::ui::trailing::TrailingComposerView;

/// Height the text input asks for before its content grows it.
const TEXT_INPUT_MIN_HEIGHT: u16 = 1;

pub trait ViewFactory: Sync {
    fn make_trailing_composer_view(
        &self,
        enabled: bool,
        cooldown_duration: u32,
        on_tap: ComposerAction,
    ) -> Box<dyn View> {
        Box::new(TrailingComposerView::new(enabled, cooldown_duration, on_tap))
    }

    fn make_leading_composer_view(&self, can_attach: bool) -> Box<dyn View> {
        Box::new(LeadingComposerView { can_attach })
    }

    fn make_attachment_view(&self, attachments: &AttachmentSet) -> Box<dyn View> {
        Box::new(AttachmentStripView::new(attachments))
    }

    fn make_quoted_message_view(&self, message: &ChatMessage, kind: QuoteKind) -> Box<dyn View> {
        Box::new(QuotedMessageView::new(message, kind))
    }

    fn make_composer_text_input_view(
        &self,
        text: &str,
        selected_range: SelectedRange,
        placeholder: &str,
        editable: bool,
    ) -> Box<dyn View> {
        Box::new(
            ComposerTextInputView::new(
                text,
                TEXT_INPUT_MIN_HEIGHT,
                selected_range.location,
                placeholder,
                editable,
            )
            .with_selection_length(selected_range.length),
        )
    }
}

/// Factory that builds the stock views.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultViewFactory;

static SHARED: DefaultViewFactory = DefaultViewFactory;

impl DefaultViewFactory {
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }
}

impl ViewFactory for DefaultViewFactory {}
