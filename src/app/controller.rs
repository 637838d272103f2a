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

//! Composer state transitions and the send flow.
//!
//! Views never mutate state. Input arrives as [`ComposerEvent`]s, and
//! anything the surrounding screen must react to leaves as a
//! [`ComposerAction`] on the action channel.

use super::attachments::{Attachment, AttachmentId};
use super::command::ComposerCommand;
use super::state::ComposerState;
use crate::chat::{ChatError, ChatMessage, ChatSession, MessageDraft};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    SetText(String),
    SetSelectedRangeLocation(usize),
    SetCommand(Option<ComposerCommand>),
    AddAttachment(Attachment),
    RemoveAttachment(AttachmentId),
    SetQuoted(Option<ChatMessage>),
    SetEdited(Option<ChatMessage>),
    StartCooldown { secs: u32, at: Instant },
    Tick(Instant),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerAction {
    Send,
    MessageSent(ChatMessage),
    CustomAttachmentTapped(AttachmentId),
    RemoveAttachment(AttachmentId),
    OpenAttachmentPicker,
}

#[derive(Debug, thiserror::Error)]
pub enum ComposerError {
    #[error("nothing to send")]
    EmptyMessage,
    #[error("slow mode is on, wait {remaining}s")]
    SlowModeActive { remaining: u32 },
    #[error("sending is disabled in this channel")]
    SendingDisabled,
    #[error("editing messages is disabled in this channel")]
    EditingDisabled,
    #[error("file uploads are disabled in this channel")]
    UploadsDisabled,
    #[error("cannot attach {}: {source}", path.display())]
    AttachFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Chat(#[from] ChatError),
}

pub type ActionSender = mpsc::UnboundedSender<ComposerAction>;

pub struct ComposerController {
    pub session: ChatSession,
    pub state: ComposerState,
    actions: ActionSender,
}

impl ComposerController {
    pub fn new(session: ChatSession, actions: ActionSender) -> Self {
        Self { session, state: ComposerState::new(), actions }
    }

    /// Apply one event. Returns `true` if anything visible changed.
    pub fn apply(&mut self, event: ComposerEvent) -> bool {
        let state = &mut self.state;
        match event {
            ComposerEvent::SetText(text) => {
                state.input.set_text(&text);
                state.selection_len = 0;
                state.promote_command();
                true
            }
            ComposerEvent::SetSelectedRangeLocation(location) => {
                let before = state.input.cursor_offset();
                state.input.set_cursor_offset(location);
                state.selection_len = 0;
                before != state.input.cursor_offset()
            }
            ComposerEvent::SetCommand(command) => {
                let changed = state.command != command;
                state.command = command;
                changed
            }
            ComposerEvent::AddAttachment(attachment) => {
                state.attachments.add(attachment);
                true
            }
            ComposerEvent::RemoveAttachment(id) => state.attachments.remove(&id).is_some(),
            ComposerEvent::SetQuoted(message) => {
                if message.is_some() {
                    state.edited = None;
                }
                state.quoted = message;
                true
            }
            ComposerEvent::SetEdited(message) => {
                if let Some(edited) = &message {
                    state.input.set_text(&edited.text);
                    state.quoted = None;
                }
                state.edited = message;
                true
            }
            ComposerEvent::StartCooldown { secs, at } => {
                state.cooldown.start(secs, at);
                true
            }
            ComposerEvent::Tick(now) => state.cooldown.tick(now),
            ComposerEvent::Clear => {
                state.reset_after_send();
                true
            }
        }
    }

    /// Whether a send would currently go through. Edits skip the cooldown
    /// but need the edit capability instead of the send one.
    #[must_use]
    pub fn can_send(&self) -> bool {
        let capabilities = &self.session.channel.capabilities;
        let allowed = if self.state.edited.is_some() {
            capabilities.can_edit
        } else {
            capabilities.can_send && !self.state.cooldown.is_active()
        };
        allowed && self.state.has_payload()
    }

    /// Post the composed message. Returns `Ok(None)` when the composer
    /// consumed the input locally (`/attach`).
    pub fn send(&mut self, now: Instant) -> Result<Option<ChatMessage>, ComposerError> {
        if self.state.command.as_ref().is_some_and(|command| !command.posts_message()) {
            self.attach_from_input()?;
            return Ok(None);
        }
        if !self.state.has_payload() {
            return Err(ComposerError::EmptyMessage);
        }
        let text = self.state.outgoing_text();

        if let Some(edited) = self.state.edited.clone() {
            if !self.session.channel.capabilities.can_edit {
                return Err(ComposerError::EditingDisabled);
            }
            if text.is_empty() {
                return Err(ComposerError::EmptyMessage);
            }
            let author = self.session.current_user.clone();
            let message = match self.session.message_controller.as_mut() {
                Some(thread) => thread.edit_reply(&author, &edited.id, text)?,
                None => self.session.channel.edit_message(&author, &edited.id, text)?,
            };
            tracing::info!(message_id = %message.id, "edited message");
            self.state.reset_after_send();
            self.dispatch(ComposerAction::MessageSent(message.clone()));
            return Ok(Some(message));
        }

        if !self.session.channel.capabilities.can_send {
            return Err(ComposerError::SendingDisabled);
        }
        if self.state.cooldown.is_active() {
            return Err(ComposerError::SlowModeActive {
                remaining: self.state.cooldown.remaining_secs(),
            });
        }

        let draft = MessageDraft {
            text,
            quoted_id: self.state.quoted.as_ref().map(|m| m.id.clone()),
            attachment_count: self.state.attachments.len(),
        };
        let author = self.session.current_user.clone();
        let message = match self.session.message_controller.as_mut() {
            Some(thread) => thread.reply(&author, draft),
            None => self.session.channel.send_message(&author, draft)?,
        };
        tracing::info!(
            message_id = %message.id,
            attachments = message.attachment_count,
            "sent message"
        );

        self.state.reset_after_send();
        let cooldown = self.session.effective_cooldown();
        if cooldown > 0 {
            tracing::debug!(secs = cooldown, "slow mode cooldown started");
            self.state.cooldown.start(cooldown, now);
        }
        self.dispatch(ComposerAction::MessageSent(message.clone()));
        Ok(Some(message))
    }

    fn attach_from_input(&mut self) -> Result<(), ComposerError> {
        if !self.session.channel.capabilities.can_upload_files {
            return Err(ComposerError::UploadsDisabled);
        }
        let path = PathBuf::from(self.state.input.text().trim());
        let meta = std::fs::metadata(&path)
            .map_err(|source| ComposerError::AttachFailed { path: path.clone(), source })?;
        if !meta.is_file() {
            return Err(ComposerError::AttachFailed {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        tracing::debug!(path = %path.display(), size = meta.len(), "attached file");
        self.state.attachments.add(Attachment::file(path, meta.len()));
        self.state.command = None;
        self.state.input.clear();
        Ok(())
    }

    /// React to a tap or shortcut that a view reported.
    pub fn handle_action(&mut self, action: ComposerAction, now: Instant) -> Result<(), ComposerError> {
        match action {
            ComposerAction::Send => {
                self.send(now)?;
            }
            ComposerAction::RemoveAttachment(id) => {
                self.apply(ComposerEvent::RemoveAttachment(id));
            }
            ComposerAction::OpenAttachmentPicker => {
                if !self.session.channel.capabilities.can_upload_files {
                    return Err(ComposerError::UploadsDisabled);
                }
                self.state.command = Some(ComposerCommand::Attach(String::new()));
            }
            // Owned by the embedding screen.
            ComposerAction::CustomAttachmentTapped(_) | ComposerAction::MessageSent(_) => {
                self.dispatch(action);
            }
        }
        Ok(())
    }

    /// Start editing the last message the current user wrote.
    pub fn edit_last_message(&mut self) -> bool {
        if !self.session.channel.capabilities.can_edit {
            return false;
        }
        let Some(message) = self.session.last_own_message().cloned() else {
            return false;
        };
        self.apply(ComposerEvent::SetEdited(Some(message)))
    }

    /// Quote the most recent message in the conversation.
    pub fn quote_last_message(&mut self) -> bool {
        let Some(message) = self.session.last_message().cloned() else {
            return false;
        };
        self.apply(ComposerEvent::SetQuoted(Some(message)))
    }

    fn dispatch(&self, action: ComposerAction) {
        if self.actions.send(action).is_err() {
            tracing::debug!("composer action dropped: receiver closed");
        }
    }
}
