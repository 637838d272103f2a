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

use super::{App, keys};
use crate::ui::View as _;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use std::time::Instant;

pub fn handle_terminal_event(app: &mut App, event: Event, now: Instant) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            keys::handle_key(app, key, now);
        }
        Event::Mouse(mouse) => {
            handle_mouse_event(app, mouse, now);
        }
        Event::Paste(text) => {
            let state = &mut app.controller.state;
            if state.accepts_text() {
                state.input.insert_str(&text);
                state.promote_command();
            }
        }
        // Resize is handled automatically by ratatui
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent, now: Instant) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let at = Position::new(mouse.column, mouse.row);
    let area = app.rendered_composer_area;
    if !area.contains(at) {
        return;
    }
    if let Some(action) = app.composer_view().tap(area, at) {
        tracing::debug!(?action, x = at.x, y = at.y, "composer tapped");
        app.perform(action, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Attachment, AttachmentId, ComposerAction, ComposerEvent};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn app_with_area() -> App {
        let mut app = App::test_default();
        app.rendered_composer_area = Rect::new(0, 10, 40, 3);
        app
    }

    #[test]
    fn paste_inserts_and_promotes_command() {
        let mut app = App::test_default();
        handle_terminal_event(&mut app, Event::Paste("/giphy cats".to_owned()), Instant::now());
        assert!(app.controller.state.command.is_some());
        assert_eq!(app.controller.state.text(), "cats");
    }

    #[test]
    fn paste_ignored_during_cooldown() {
        let mut app = App::test_default();
        app.controller.apply(ComposerEvent::StartCooldown { secs: 5, at: Instant::now() });
        handle_terminal_event(&mut app, Event::Paste("hello".to_owned()), Instant::now());
        assert_eq!(app.controller.state.text(), "");
    }

    #[test]
    fn click_on_send_posts_message() {
        let mut app = app_with_area();
        app.controller.apply(ComposerEvent::SetText("hello".to_owned()));
        handle_terminal_event(&mut app, click(36, 11), Instant::now());
        assert_eq!(app.controller.session.channel.messages().len(), 1);
        assert!(matches!(app.actions_rx.try_recv(), Ok(ComposerAction::MessageSent(_))));
    }

    #[test]
    fn click_on_attach_opens_picker() {
        let mut app = app_with_area();
        handle_terminal_event(&mut app, click(1, 11), Instant::now());
        assert!(app.controller.state.command.is_some());
    }

    #[test]
    fn click_on_chip_remove_marker_drops_attachment() {
        let mut app = app_with_area();
        app.controller.apply(ComposerEvent::AddAttachment(
            Attachment::image("a.png").with_id(AttachmentId::new("a")),
        ));
        app.rendered_composer_area = Rect::new(0, 10, 40, 4);
        // strip row at y=11; "▣ a.png ×" starts at x=5, × at x=13
        handle_terminal_event(&mut app, click(13, 11), Instant::now());
        assert!(app.controller.state.attachments.is_empty());
    }

    #[test]
    fn clicks_outside_composer_are_ignored() {
        let mut app = app_with_area();
        app.controller.apply(ComposerEvent::SetText("hello".to_owned()));
        handle_terminal_event(&mut app, click(36, 2), Instant::now());
        assert!(app.controller.session.channel.messages().is_empty());
    }
}
