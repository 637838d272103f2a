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
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(String);

impl AttachmentId {
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

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attachment {
    Media {
        id: AttachmentId,
        kind: MediaKind,
        file_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_secs: Option<u32>,
    },
    File {
        id: AttachmentId,
        path: PathBuf,
        size_bytes: u64,
    },
    /// Integrator-defined attachment (poll, location, ...). The composer only
    /// shows its title and reports taps back.
    Custom {
        id: AttachmentId,
        title: String,
        #[serde(default)]
        tag: String,
    },
}

impl Attachment {
    pub fn image(file_name: impl Into<String>) -> Self {
        Self::Media {
            id: AttachmentId::generate(),
            kind: MediaKind::Image,
            file_name: file_name.into(),
            duration_secs: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self::File { id: AttachmentId::generate(), path: path.into(), size_bytes }
    }

    pub fn custom(title: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::Custom { id: AttachmentId::generate(), title: title.into(), tag: tag.into() }
    }

    #[must_use]
    pub fn id(&self) -> &AttachmentId {
        match self {
            Self::Media { id, .. } | Self::File { id, .. } | Self::Custom { id, .. } => id,
        }
    }

    #[must_use]
    pub fn with_id(mut self, new_id: AttachmentId) -> Self {
        match &mut self {
            Self::Media { id, .. } | Self::File { id, .. } | Self::Custom { id, .. } => {
                *id = new_id;
            }
        }
        self
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    /// Short label shown on the attachment chip.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Media { file_name, duration_secs: Some(secs), .. } => {
                format!("{file_name} {}:{:02}", secs / 60, secs % 60)
            }
            Self::Media { file_name, .. } => file_name.clone(),
            Self::File { path, size_bytes, .. } => {
                let name = path.file_name().map_or_else(
                    || path.to_string_lossy().into_owned(),
                    |f| f.to_string_lossy().into_owned(),
                );
                format!("{name} ({})", format_size(*size_bytes))
            }
            Self::Custom { title, .. } => title.clone(),
        }
    }
}

/// Human-readable byte count: `512 B`, `12 KB`, `3.4 MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Attachments in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentSet {
    items: Vec<Attachment>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attachment: Attachment) {
        self.items.push(attachment);
    }

    /// Remove by id. Returns the removed attachment, if any.
    pub fn remove(&mut self, id: &AttachmentId) -> Option<Attachment> {
        let idx = self.items.iter().position(|a| a.id() == id)?;
        Some(self.items.remove(idx))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn get(&self, id: &AttachmentId) -> Option<&Attachment> {
        self.items.iter().find(|a| a.id() == id)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Attachment> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attachment> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Attachment> for AttachmentSet {
    fn from_iter<T: IntoIterator<Item = Attachment>>(iter: T) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a AttachmentSet {
    type Item = &'a Attachment;
    type IntoIter = std::slice::Iter<'a, Attachment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
