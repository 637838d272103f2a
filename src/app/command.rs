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

use serde::{Deserialize, Serialize};

/// Slash command recognised at the start of the composer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "arg", rename_all = "snake_case")]
pub enum ComposerCommand {
    Giphy(String),
    Attach(String),
    Mute,
    Unmute,
}

impl ComposerCommand {
    /// Parse `text` as a command. Returns `None` for ordinary messages and
    /// for unknown commands, which are sent as plain text.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim_start().strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest.trim_end(), ""),
        };
        match name.to_ascii_lowercase().as_str() {
            "giphy" => Some(Self::Giphy(arg.to_owned())),
            "attach" => Some(Self::Attach(arg.to_owned())),
            "mute" => Some(Self::Mute),
            "unmute" => Some(Self::Unmute),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Giphy(_) => "giphy",
            Self::Attach(_) => "attach",
            Self::Mute => "mute",
            Self::Unmute => "unmute",
        }
    }

    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::Giphy(arg) | Self::Attach(arg) => Some(arg.as_str()),
            Self::Mute | Self::Unmute => None,
        }
    }

    /// Whether the command posts a message to the channel when sent.
    #[must_use]
    pub fn posts_message(&self) -> bool {
        !matches!(self, Self::Attach(_))
    }

    /// Text posted for the command, in the `/name arg` wire form.
    #[must_use]
    pub fn to_message_text(&self) -> String {
        match self.argument() {
            Some(arg) if !arg.is_empty() => format!("/{} {arg}", self.name()),
            _ => format!("/{}", self.name()),
        }
    }
}
