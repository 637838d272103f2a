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

//! In-memory stand-in for the chat backend the composer talks to.
//!
//! The composer only needs a channel to post into and, for thread replies,
//! a parent message. Networking and persistence live elsewhere.

mod channel;

pub use channel::{ChannelCapabilities, ChannelController, MessageController};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: String,
    pub text: String,
    /// Message this one replies to inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_id: Option<MessageId>,
    /// Thread parent, when posted as a thread reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<MessageId>,
    #[serde(default)]
    pub attachment_count: usize,
    #[serde(default)]
    pub edited: bool,
}

impl ChatMessage {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            author: author.into(),
            text: text.into(),
            quoted_id: None,
            parent_id: None,
            attachment_count: 0,
            edited: false,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: MessageId) -> Self {
        self.id = id;
        self
    }
}

/// Everything a send needs from the composer, already validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDraft {
    pub text: String,
    pub quoted_id: Option<MessageId>,
    pub attachment_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("channel `{0}` does not accept new messages")]
    ChannelFrozen(String),
    #[error("message {0} not found")]
    MessageNotFound(MessageId),
    #[error("only the author can edit message {0}")]
    NotAuthor(MessageId),
}

/// The chat objects a composer is bound to.
#[derive(Debug)]
pub struct ChatSession {
    pub current_user: String,
    pub channel: ChannelController,
    /// Present when composing inside a thread.
    pub message_controller: Option<MessageController>,
}

impl ChatSession {
    pub fn new(current_user: impl Into<String>, channel: ChannelController) -> Self {
        Self { current_user: current_user.into(), channel, message_controller: None }
    }

    #[must_use]
    pub fn with_thread(mut self, controller: MessageController) -> Self {
        self.message_controller = Some(controller);
        self
    }

    /// Slow mode applies unless the current user is exempt.
    #[must_use]
    pub fn effective_cooldown(&self) -> u32 {
        if self.channel.capabilities.slow_mode_exempt { 0 } else { self.channel.cooldown_secs }
    }

    /// Most recent message authored by the current user, in channel or thread.
    #[must_use]
    pub fn last_own_message(&self) -> Option<&ChatMessage> {
        let messages = match &self.message_controller {
            Some(thread) => thread.replies(),
            None => self.channel.messages(),
        };
        messages.iter().rev().find(|m| m.author == self.current_user)
    }

    /// Most recent message from anyone, used as the default quote target.
    #[must_use]
    pub fn last_message(&self) -> Option<&ChatMessage> {
        match &self.message_controller {
            Some(thread) => thread.replies().last().or(Some(thread.parent())),
            None => self.channel.messages().last(),
        }
    }

    /// Channel used by fixtures and tests: writable, uploads allowed, no slow mode.
    #[must_use]
    pub fn test_default() -> Self {
        Self::new("me", ChannelController::new("general", "General"))
    }
}
