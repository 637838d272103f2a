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

use super::{App, ComposerAction, ComposerEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Tab inserts spaces; a literal tab has no display width in the text view.
const TAB_SPACES: &str = "    ";

fn is_ctrl_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    is_ctrl_shortcut(key.modifiers)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

#[inline]
fn is_printable_text_modifiers(modifiers: KeyModifiers) -> bool {
    let ctrl_alt =
        modifiers.contains(KeyModifiers::CONTROL) && modifiers.contains(KeyModifiers::ALT);
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) || ctrl_alt
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if is_ctrl_char_shortcut(key, 'q') || is_ctrl_char_shortcut(key, 'c') {
        app.should_quit = true;
        return;
    }
    app.status = None;

    if handle_composer_shortcuts(app, key, now) {
        return;
    }
    if app.controller.state.accepts_text() {
        handle_editing_key(app, key);
    }
}

/// Shortcuts that work even while slow mode locks the text.
fn handle_composer_shortcuts(app: &mut App, key: KeyEvent, now: Instant) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, m)
            if !m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL) =>
        {
            app.perform(ComposerAction::Send, now);
            true
        }
        (KeyCode::Esc, _) => {
            dismiss_context(app);
            true
        }
        (KeyCode::Char(c), m) if is_ctrl_shortcut(m) && c.eq_ignore_ascii_case(&'r') => {
            app.controller.quote_last_message();
            true
        }
        (KeyCode::Char(c), m) if is_ctrl_shortcut(m) && c.eq_ignore_ascii_case(&'x') => {
            if let Some(id) = app.controller.state.attachments.last().map(|a| a.id().clone()) {
                app.perform(ComposerAction::RemoveAttachment(id), now);
            }
            true
        }
        (KeyCode::Up, KeyModifiers::NONE)
            if app.controller.state.input.is_empty() && app.controller.state.edited.is_none() =>
        {
            app.controller.edit_last_message();
            true
        }
        _ => false,
    }
}

/// Esc peels off one layer: the edit, else the quote, else the command chip.
fn dismiss_context(app: &mut App) {
    let state = &app.controller.state;
    let event = if state.edited.is_some() {
        ComposerEvent::Clear
    } else if state.quoted.is_some() {
        ComposerEvent::SetQuoted(None)
    } else if state.command.is_some() {
        ComposerEvent::SetCommand(None)
    } else {
        return;
    };
    app.controller.apply(event);
}

fn handle_editing_key(app: &mut App, key: KeyEvent) {
    let state = &mut app.controller.state;
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => state.input.insert_newline(),
        (KeyCode::Char(c), m) if is_printable_text_modifiers(m) => {
            state.input.insert_char(c);
            state.promote_command();
        }
        (KeyCode::Tab, _) => state.input.insert_str(TAB_SPACES),
        (KeyCode::Backspace, _) => {
            if state.input.is_empty() && state.command.is_some() {
                state.command = None;
            } else {
                state.input.delete_char_before();
            }
        }
        (KeyCode::Delete, _) => state.input.delete_char_after(),
        (KeyCode::Left, _) => state.input.move_left(),
        (KeyCode::Right, _) => state.input.move_right(),
        (KeyCode::Up, _) => state.input.move_up(),
        (KeyCode::Down, _) => state.input.move_down(),
        (KeyCode::Home, _) => state.input.move_home(),
        (KeyCode::End, _) => state.input.move_end(),
        _ => return,
    }
    state.selection_len = 0;
}
