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

use super::attachments::AttachmentSet;
use super::command::ComposerCommand;
use super::cooldown::Cooldown;
use super::input::InputState;
use crate::chat::ChatMessage;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLACEHOLDER: &str = "Send a message";
pub const SLOW_MODE_PLACEHOLDER: &str = "Slow mode ON";

/// Serializable description of a composer, as written in fixture files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub text: String,
    /// Cursor as a char offset into `text`. `None` puts it at the end.
    pub selected_range_location: Option<usize>,
    pub selection_length: usize,
    pub placeholder: Option<String>,
    pub editable: bool,
    pub cooldown_secs: u32,
    pub command: Option<ComposerCommand>,
    pub attachments: AttachmentSet,
    pub quoted: Option<ChatMessage>,
    pub edited: Option<ChatMessage>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            selected_range_location: None,
            selection_length: 0,
            placeholder: None,
            editable: true,
            cooldown_secs: 0,
            command: None,
            attachments: AttachmentSet::new(),
            quoted: None,
            edited: None,
        }
    }
}

/// Live state behind one composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerState {
    pub input: InputState,
    /// Length in chars of the selection starting at the cursor.
    pub selection_len: usize,
    pub placeholder: String,
    pub editable: bool,
    pub command: Option<ComposerCommand>,
    pub attachments: AttachmentSet,
    pub quoted: Option<ChatMessage>,
    pub edited: Option<ChatMessage>,
    pub cooldown: Cooldown,
}

impl ComposerState {
    pub fn new() -> Self {
        Self {
            input: InputState::new(),
            selection_len: 0,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            editable: true,
            command: None,
            attachments: AttachmentSet::new(),
            quoted: None,
            edited: None,
            cooldown: Cooldown::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ComposerConfig) -> Self {
        let mut input = InputState::from_text(&config.text);
        if let Some(location) = config.selected_range_location {
            input.set_cursor_offset(location);
        }
        Self {
            input,
            selection_len: config.selection_length,
            placeholder: config.placeholder.clone().unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_owned()),
            editable: config.editable,
            command: config.command.clone(),
            attachments: config.attachments.clone(),
            quoted: config.quoted.clone(),
            edited: config.edited.clone(),
            cooldown: Cooldown::fixed(config.cooldown_secs),
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.input.text()
    }

    #[must_use]
    pub fn selected_range_location(&self) -> usize {
        self.input.cursor_offset()
    }

    /// Something would be posted if send were pressed now.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.input.has_content() || self.command.is_some() || !self.attachments.is_empty()
    }

    /// Text input is locked while slow mode counts down, unless an existing
    /// message is being edited.
    #[must_use]
    pub fn accepts_text(&self) -> bool {
        self.editable && (self.edited.is_some() || !self.cooldown.is_active())
    }

    #[must_use]
    pub fn effective_placeholder(&self) -> &str {
        if self.cooldown.is_active() { SLOW_MODE_PLACEHOLDER } else { &self.placeholder }
    }

    /// Turn a typed `/name ` prefix into the active command, keeping the rest
    /// as its argument text. Returns `true` if a command was picked up.
    /// A command that takes no argument is only picked up on its own, so
    /// `/mute hello` stays plain text.
    pub fn promote_command(&mut self) -> bool {
        if self.command.is_some() {
            return false;
        }
        let text = self.input.text();
        let Some(stripped) = text.strip_prefix('/') else {
            return false;
        };
        let Some((name, rest)) = stripped.split_once(' ') else {
            return false;
        };
        let Some(command) = ComposerCommand::parse(&format!("/{name}")) else {
            return false;
        };
        if command.argument().is_none() && !rest.trim().is_empty() {
            return false;
        }
        self.command = Some(command);
        self.input.set_text(rest);
        true
    }

    /// Message text that a send would post, with the command argument filled in.
    #[must_use]
    pub fn outgoing_text(&self) -> String {
        let text = self.input.text();
        let text = text.trim();
        match &self.command {
            Some(ComposerCommand::Giphy(_)) => ComposerCommand::Giphy(text.to_owned()).to_message_text(),
            Some(ComposerCommand::Attach(_)) => ComposerCommand::Attach(text.to_owned()).to_message_text(),
            Some(command) if text.is_empty() => command.to_message_text(),
            Some(command) => format!("{} {text}", command.to_message_text()),
            None => text.to_owned(),
        }
    }

    /// Drop everything a send consumed. Cooldown and placeholder survive.
    pub fn reset_after_send(&mut self) {
        self.input.clear();
        self.selection_len = 0;
        self.command = None;
        self.attachments.clear();
        self.quoted = None;
        self.edited = None;
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}
