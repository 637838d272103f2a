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

use super::{ChatError, ChatMessage, MessageDraft, MessageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ChannelCapabilities {
    pub can_send: bool,
    pub can_upload_files: bool,
    pub can_edit: bool,
    pub slow_mode_exempt: bool,
}

impl Default for ChannelCapabilities {
    fn default() -> Self {
        Self { can_send: true, can_upload_files: true, can_edit: true, slow_mode_exempt: false }
    }
}

/// A single conversation and its message list.
#[derive(Debug)]
pub struct ChannelController {
    pub id: String,
    pub name: String,
    /// Slow mode interval in seconds; 0 disables slow mode.
    pub cooldown_secs: u32,
    pub capabilities: ChannelCapabilities,
    messages: Vec<ChatMessage>,
}

impl ChannelController {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cooldown_secs: 0,
            capabilities: ChannelCapabilities::default(),
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cooldown(mut self, secs: u32) -> Self {
        self.cooldown_secs = secs;
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: ChannelCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a message that arrived from someone else.
    pub fn push_incoming(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn send_message(
        &mut self,
        author: &str,
        draft: MessageDraft,
    ) -> Result<ChatMessage, ChatError> {
        if !self.capabilities.can_send {
            return Err(ChatError::ChannelFrozen(self.id.clone()));
        }
        let mut message = ChatMessage::new(author, draft.text);
        message.quoted_id = draft.quoted_id;
        message.attachment_count = draft.attachment_count;
        tracing::debug!(channel = %self.id, message_id = %message.id, "message sent");
        self.messages.push(message.clone());
        Ok(message)
    }

    pub fn edit_message(
        &mut self,
        author: &str,
        id: &MessageId,
        text: String,
    ) -> Result<ChatMessage, ChatError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| ChatError::MessageNotFound(id.clone()))?;
        if message.author != author {
            return Err(ChatError::NotAuthor(id.clone()));
        }
        message.text = text;
        message.edited = true;
        tracing::debug!(channel = %self.id, message_id = %id, "message edited");
        Ok(message.clone())
    }
}

/// A thread rooted at one channel message.
#[derive(Debug)]
pub struct MessageController {
    parent: ChatMessage,
    replies: Vec<ChatMessage>,
}

impl MessageController {
    pub fn new(parent: ChatMessage) -> Self {
        Self { parent, replies: Vec::new() }
    }

    #[must_use]
    pub fn parent(&self) -> &ChatMessage {
        &self.parent
    }

    #[must_use]
    pub fn replies(&self) -> &[ChatMessage] {
        &self.replies
    }

    pub fn reply(&mut self, author: &str, draft: MessageDraft) -> ChatMessage {
        let mut message = ChatMessage::new(author, draft.text);
        message.quoted_id = draft.quoted_id;
        message.parent_id = Some(self.parent.id.clone());
        message.attachment_count = draft.attachment_count;
        tracing::debug!(parent = %self.parent.id, message_id = %message.id, "thread reply sent");
        self.replies.push(message.clone());
        message
    }

    pub fn edit_reply(
        &mut self,
        author: &str,
        id: &MessageId,
        text: String,
    ) -> Result<ChatMessage, ChatError> {
        let message = self
            .replies
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| ChatError::MessageNotFound(id.clone()))?;
        if message.author != author {
            return Err(ChatError::NotAuthor(id.clone()));
        }
        message.text = text;
        message.edited = true;
        Ok(message.clone())
    }
}
