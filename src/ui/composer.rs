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

use crate::app::{ComposerAction, ComposerState};
use crate::chat::ChatSession;
use crate::ui::composer_input::ComposerInputView;
use crate::ui::factory::ViewFactory;
use crate::ui::{View, theme};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

pub const LEADING_WIDTH: u16 = 3;
pub const TRAILING_WIDTH: u16 = 7;
const CONTROL_HEIGHT: u16 = 3;

/// Attach button in front of the input. Blank when uploads are off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingComposerView {
    pub can_attach: bool,
}

impl View for LeadingComposerView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if !self.can_attach || area.width == 0 || area.height == 0 {
            return;
        }
        let x = area.x + area.width.saturating_sub(1) / 2;
        let y = area.y + area.height.saturating_sub(1) / 2;
        buf.set_string(
            x,
            y,
            theme::ATTACH_ICON,
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        );
    }

    fn desired_height(&self, _width: u16) -> u16 {
        CONTROL_HEIGHT
    }

    fn tap(&self, area: Rect, at: Position) -> Option<ComposerAction> {
        (self.can_attach && area.contains(at)).then_some(ComposerAction::OpenAttachmentPicker)
    }
}

/// Horizontal split of the composer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerLayout {
    pub leading: Rect,
    pub input: Rect,
    pub trailing: Rect,
}

/// Leading and trailing controls keep their width and hug the bottom edge;
/// the input takes what is left.
pub fn compute_layout(area: Rect) -> ComposerLayout {
    let leading_width = LEADING_WIDTH.min(area.width);
    let trailing_width = TRAILING_WIDTH.min(area.width - leading_width);
    let input_width = area.width - leading_width - trailing_width;
    let control_height = CONTROL_HEIGHT.min(area.height);
    let control_y = area.bottom() - control_height;

    ComposerLayout {
        leading: Rect::new(area.x, control_y, leading_width, control_height),
        input: Rect::new(area.x + leading_width, area.y, input_width, area.height),
        trailing: Rect::new(
            area.x + leading_width + input_width,
            control_y,
            trailing_width,
            control_height,
        ),
    }
}

/// The full composer: attach button, input box, and send / slow-mode control,
/// bound to a chat session.
///
/// Taps on the send control report [`ComposerAction::Send`]; a successful
/// send is announced by the controller as [`ComposerAction::MessageSent`].
pub struct MessageComposerView {
    leading: Box<dyn View>,
    input: ComposerInputView,
    trailing: Box<dyn View>,
}

impl MessageComposerView {
    pub fn new(factory: &dyn ViewFactory, session: &ChatSession, state: &ComposerState) -> Self {
        let capabilities = session.channel.capabilities;
        let allowed = if state.edited.is_some() { capabilities.can_edit } else { capabilities.can_send };
        let enabled = allowed && state.has_payload();
        Self {
            leading: factory.make_leading_composer_view(capabilities.can_upload_files),
            input: ComposerInputView::from_state(factory, state),
            trailing: factory.make_trailing_composer_view(
                enabled,
                state.cooldown.remaining_secs(),
                ComposerAction::Send,
            ),
        }
    }
}

impl View for MessageComposerView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let layout = compute_layout(area);
        self.leading.render(layout.leading, buf);
        self.input.render(layout.input, buf);
        self.trailing.render(layout.trailing, buf);
    }

    fn cursor_position(&self, area: Rect) -> Option<Position> {
        self.input.cursor_position(compute_layout(area).input)
    }

    fn desired_height(&self, width: u16) -> u16 {
        let input_width = width.saturating_sub(LEADING_WIDTH + TRAILING_WIDTH);
        self.input.desired_height(input_width).max(CONTROL_HEIGHT)
    }

    fn tap(&self, area: Rect, at: Position) -> Option<ComposerAction> {
        let layout = compute_layout(area);
        if layout.leading.contains(at) {
            self.leading.tap(layout.leading, at)
        } else if layout.trailing.contains(at) {
            self.trailing.tap(layout.trailing, at)
        } else {
            self.input.tap(layout.input, at)
        }
    }
}

#[cfg(test)]
mod tests {
    // =====
    // TESTS: 10
    // =====

    use super::*;
    use crate::app::{ComposerConfig, ComposerEvent};
    use crate::chat::ChannelCapabilities;
    use crate::snapshot::Snapshot;
    use crate::ui::factory::DefaultViewFactory;
    use pretty_assertions::assert_eq;

    fn composer(session: &ChatSession, config: &ComposerConfig) -> MessageComposerView {
        MessageComposerView::new(
            DefaultViewFactory::shared(),
            session,
            &ComposerState::from_config(config),
        )
    }

    #[test]
    fn layout_splits_width() {
        let layout = compute_layout(Rect::new(0, 0, 40, 3));
        assert_eq!(layout.leading, Rect::new(0, 0, 3, 3));
        assert_eq!(layout.input, Rect::new(3, 0, 30, 3));
        assert_eq!(layout.trailing, Rect::new(33, 0, 7, 3));
    }

    #[test]
    fn controls_hug_bottom_of_tall_composer() {
        let layout = compute_layout(Rect::new(0, 10, 40, 6));
        assert_eq!(layout.trailing.y, 13);
        assert_eq!(layout.leading.y, 13);
        assert_eq!(layout.input.height, 6);
    }

    #[test]
    fn narrow_layout_never_overflows() {
        for width in 0..12 {
            let layout = compute_layout(Rect::new(0, 0, width, 3));
            assert_eq!(layout.leading.width + layout.input.width + layout.trailing.width, width);
        }
    }

    #[test]
    fn short_layout_never_overflows() {
        let layout = compute_layout(Rect::new(0, 5, 40, 1));
        assert_eq!(layout.trailing, Rect::new(33, 5, 7, 1));
    }

    #[test]
    fn cursor_sits_in_input_box() {
        let session = ChatSession::test_default();
        let view = composer(&session, &ComposerConfig::default());
        let snap = Snapshot::capture(&view, 40, 3);
        assert_eq!(snap.cursor(), Some(Position::new(5, 1)));
    }

    #[test]
    fn uploads_disabled_hides_attach_button() {
        let mut session = ChatSession::test_default();
        session.channel.capabilities =
            ChannelCapabilities { can_upload_files: false, ..ChannelCapabilities::default() };
        let view = composer(&session, &ComposerConfig::default());
        let snap = Snapshot::capture(&view, 40, 3);
        assert!(snap.rows()[1].starts_with("   │"));
        assert_eq!(view.tap(Rect::new(0, 0, 40, 3), Position::new(1, 1)), None);
    }

    #[test]
    fn attach_button_opens_picker() {
        let session = ChatSession::test_default();
        let view = composer(&session, &ComposerConfig::default());
        assert_eq!(
            view.tap(Rect::new(0, 0, 40, 3), Position::new(1, 1)),
            Some(ComposerAction::OpenAttachmentPicker)
        );
    }

    #[test]
    fn send_tap_requires_payload() {
        let session = ChatSession::test_default();
        let area = Rect::new(0, 0, 40, 3);
        let empty = composer(&session, &ComposerConfig::default());
        assert_eq!(empty.tap(area, Position::new(36, 1)), None);

        let typed = composer(&session, &ComposerConfig { text: "hi".to_owned(), ..ComposerConfig::default() });
        assert_eq!(typed.tap(area, Position::new(36, 1)), Some(ComposerAction::Send));
    }

    #[test]
    fn cooldown_switches_trailing_variant() {
        let session = ChatSession::test_default();
        let normal = Snapshot::capture(&composer(&session, &ComposerConfig::default()), 40, 3);
        let slow = Snapshot::capture(
            &composer(&session, &ComposerConfig { cooldown_secs: 15, ..ComposerConfig::default() }),
            40,
            3,
        );
        assert!(normal.rows()[1].ends_with("│  ➤  │"));
        assert!(slow.rows()[1].ends_with("│ 15  │"));
        assert!(slow.rows()[1].contains("Slow mode ON"));
    }

    #[test]
    fn sending_during_live_cooldown_renders_countdown() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let session = ChatSession::new(
            "me",
            crate::chat::ChannelController::new("c", "C").with_cooldown(30),
        );
        let mut controller = crate::app::ComposerController::new(session, tx);
        let now = std::time::Instant::now();
        controller.apply(ComposerEvent::SetText("hello".to_owned()));
        controller.send(now).unwrap();

        let view = MessageComposerView::new(
            DefaultViewFactory::shared(),
            &controller.session,
            &controller.state,
        );
        let snap = Snapshot::capture(&view, 40, 3);
        assert!(snap.rows()[1].contains("30s"));
        assert!(snap.rows()[1].ends_with("│ 30  │"));
        assert_eq!(snap.cursor(), None);
    }
}
