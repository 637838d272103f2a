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

//! Named composer configurations rendered by the golden tests and the
//! `render` / `record` commands.
//!
//! Built-in fixtures are [`FixtureFile`] values, the same shape a JSON
//! fixture file deserializes into:
//!
//! ```json
//! { "view": "composer_input", "width": 40, "cooldown_secs": 15 }
//! ```

use crate::app::{
    Attachment, AttachmentId, ComposerAction, ComposerConfig, ComposerState, DEFAULT_PLACEHOLDER,
};
use crate::chat::{ChannelCapabilities, ChannelController, ChatMessage, ChatSession, MessageId};
use crate::snapshot::Snapshot;
use crate::ui::View;
use crate::ui::composer::MessageComposerView;
use crate::ui::composer_input::ComposerInputView;
use crate::ui::factory::{DefaultViewFactory, ViewFactory};
use crate::ui::text_input::{InputTextView, SelectedRange};
use crate::ui::trailing::TrailingComposerView;
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Terminal width the full-width fixtures are rendered at.
pub const SCREEN_WIDTH: u16 = 40;

const SAMPLE_TEXT: &str = "This is a sample text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    MessageComposer,
    ComposerInput,
    TrailingComposer,
    InputTextView,
    ComposerTextInputView,
}

fn default_true() -> bool {
    true
}

/// Serialized fixture: which view, at what size, in which state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureFile {
    pub view: ViewKind,
    /// Defaults to [`SCREEN_WIDTH`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    /// Defaults to the height the view asks for at `width`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u16>,
    #[serde(default = "default_true")]
    pub can_send: bool,
    #[serde(default = "default_true")]
    pub can_upload_files: bool,
    #[serde(flatten)]
    pub composer: ComposerConfig,
}

impl FixtureFile {
    pub fn new(view: ViewKind) -> Self {
        Self {
            view,
            width: None,
            height: None,
            can_send: true,
            can_upload_files: true,
            composer: ComposerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_composer(mut self, composer: ComposerConfig) -> Self {
        self.composer = composer;
        self
    }

    fn session(&self) -> ChatSession {
        let capabilities = ChannelCapabilities {
            can_send: self.can_send,
            can_upload_files: self.can_upload_files,
            ..ChannelCapabilities::default()
        };
        ChatSession::new("me", ChannelController::new("general", "General").with_capabilities(capabilities))
    }

    fn build_view(&self, factory: &dyn ViewFactory, width: u16) -> Box<dyn View> {
        let config = &self.composer;
        let state = ComposerState::from_config(config);
        match self.view {
            ViewKind::MessageComposer => {
                Box::new(MessageComposerView::new(factory, &self.session(), &state))
            }
            ViewKind::ComposerInput => Box::new(ComposerInputView::from_state(factory, &state)),
            ViewKind::TrailingComposer => Box::new(TrailingComposerView::new(
                self.can_send,
                config.cooldown_secs,
                ComposerAction::Send,
            )),
            ViewKind::InputTextView => {
                let mut view = InputTextView::new(Rect::new(0, 0, width, self.height.unwrap_or(1)));
                view.text.clone_from(&config.text);
                view.selected_range = SelectedRange {
                    location: state.selected_range_location(),
                    length: config.selection_length,
                };
                view.editable = config.editable;
                Box::new(view)
            }
            ViewKind::ComposerTextInputView => factory.make_composer_text_input_view(
                &config.text,
                SelectedRange {
                    location: state.selected_range_location(),
                    length: config.selection_length,
                },
                config.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER),
                config.editable,
            ),
        }
    }

    pub fn build(&self, name: impl Into<String>) -> Fixture {
        let width = self.width.unwrap_or(SCREEN_WIDTH);
        let view = self.build_view(DefaultViewFactory::shared(), width);
        let height = self.height.unwrap_or_else(|| view.desired_height(width));
        Fixture { name: name.into(), width, height, view }
    }
}

/// A view ready to capture at a fixed size.
pub struct Fixture {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub view: Box<dyn View>,
}

impl Fixture {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.view.as_ref(), self.width, self.height)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("unknown fixture `{0}`")]
    Unknown(String),
    #[error("cannot read fixture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

const BUILTIN_NAMES: &[&str] = &[
    "message_composer",
    "composer_input_slow_mode",
    "trailing_composer",
    "trailing_composer_slow_mode",
    "input_text_view",
    "composer_text_input_view",
    "composer_input_attachments",
    "composer_input_quoted",
];

#[must_use]
pub fn builtin_names() -> &'static [&'static str] {
    BUILTIN_NAMES
}

/// The serialized form of a built-in fixture.
pub fn builtin_file(name: &str) -> Result<FixtureFile, FixtureError> {
    let slow = ComposerConfig { cooldown_secs: 15, ..ComposerConfig::default() };
    let sample = ComposerConfig {
        text: SAMPLE_TEXT.to_owned(),
        selected_range_location: Some(3),
        ..ComposerConfig::default()
    };
    let file = match name {
        "message_composer" => FixtureFile::new(ViewKind::MessageComposer).with_size(SCREEN_WIDTH, 3),
        "composer_input_slow_mode" => FixtureFile::new(ViewKind::ComposerInput)
            .with_size(SCREEN_WIDTH, 3)
            .with_composer(slow),
        "trailing_composer" => FixtureFile::new(ViewKind::TrailingComposer).with_size(7, 3),
        "trailing_composer_slow_mode" => {
            FixtureFile::new(ViewKind::TrailingComposer).with_size(7, 3).with_composer(slow)
        }
        "input_text_view" => FixtureFile::new(ViewKind::InputTextView)
            .with_size(SCREEN_WIDTH - 4, 2)
            .with_composer(sample),
        "composer_text_input_view" => FixtureFile::new(ViewKind::ComposerTextInputView)
            .with_size(SCREEN_WIDTH, 2)
            .with_composer(sample),
        "composer_input_attachments" => {
            let attachments = [
                Attachment::image("photo.png").with_id(AttachmentId::new("a1")),
                Attachment::file("notes.txt", 2048).with_id(AttachmentId::new("a2")),
                Attachment::custom("Poll", "poll").with_id(AttachmentId::new("a3")),
            ]
            .into_iter()
            .collect();
            FixtureFile::new(ViewKind::ComposerInput).with_width(50).with_composer(ComposerConfig {
                text: "Look at these".to_owned(),
                attachments,
                ..ComposerConfig::default()
            })
        }
        "composer_input_quoted" => {
            let quoted = ChatMessage::new("alice", "Are we still on for lunch tomorrow at noon?")
                .with_id(MessageId::new("m1"));
            FixtureFile::new(ViewKind::ComposerInput).with_composer(ComposerConfig {
                text: "Sounds good".to_owned(),
                quoted: Some(quoted),
                ..ComposerConfig::default()
            })
        }
        _ => return Err(FixtureError::Unknown(name.to_owned())),
    };
    Ok(file)
}

pub fn builtin(name: &str) -> Result<Fixture, FixtureError> {
    Ok(builtin_file(name)?.build(name))
}

/// Every built-in fixture, in declaration order.
pub fn all() -> Vec<Fixture> {
    BUILTIN_NAMES
        .iter()
        .filter_map(|name| builtin(name).ok())
        .collect()
}

/// Load a JSON fixture. The file stem becomes the fixture name.
pub fn load(path: &Path) -> Result<Fixture, FixtureError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| FixtureError::Io { path: path.to_path_buf(), source })?;
    let file: FixtureFile = serde_json::from_str(&text)
        .map_err(|source| FixtureError::Parse { path: path.to_path_buf(), source })?;
    let name = path.file_stem().map_or_else(|| "fixture".to_owned(), |s| s.to_string_lossy().into_owned());
    tracing::debug!(fixture = %name, path = %path.display(), view = ?file.view, "loaded fixture file");
    Ok(file.build(name))
}
