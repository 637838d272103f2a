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

//! Golden-file snapshots of rendered views.
//!
//! A [`Snapshot`] is the text form of one render: every buffer row in double
//! quotes, then the cursor. [`SnapshotHarness`] compares snapshots against
//! `<dir>/<name>.snap` baselines and records new ones according to its
//! [`RecordMode`].
//!
//! ```text
//! "╭─────╮"
//! "│  ➤  │"
//! "╰─────╯"
//! cursor: hidden
//! ```

use crate::ui::View;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use similar::TextDiff;
use std::fmt;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

/// Environment variable that selects the [`RecordMode`].
pub const RECORD_ENV: &str = "CHAT_COMPOSER_RECORD";

const SNAPSHOT_EXT: &str = "snap";
const PENDING_EXT: &str = "snap.new";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    rows: Vec<String>,
    cursor: Option<Position>,
}

impl Snapshot {
    /// Render `view` into a fresh `width` x `height` buffer.
    pub fn capture(view: &dyn View, width: u16, height: u16) -> Self {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        let cursor = view.cursor_position(area).filter(|pos| area.contains(*pos));
        Self::from_buffer(&buf, cursor)
    }

    /// Rows of `buf`, with wide symbols covering their trailing cells.
    pub fn from_buffer(buf: &Buffer, cursor: Option<Position>) -> Self {
        let area = buf.area;
        let rows = (area.top()..area.bottom())
            .map(|y| {
                let mut row = String::with_capacity(usize::from(area.width));
                let mut skip: usize = 0;
                for x in area.left()..area.right() {
                    let symbol = buf[(x, y)].symbol();
                    if skip == 0 {
                        row.push_str(symbol);
                    }
                    skip = skip.max(symbol.width()).saturating_sub(1);
                }
                row
            })
            .collect();
        Self { rows, cursor }
    }

    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    #[must_use]
    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "\"{row}\"")?;
        }
        match self.cursor {
            Some(pos) => writeln!(f, "cursor: {},{}", pos.x, pos.y),
            None => writeln!(f, "cursor: hidden"),
        }
    }
}

/// When the harness writes baselines instead of only comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordMode {
    /// Record baselines that do not exist yet; compare the rest.
    #[default]
    Missing,
    /// Overwrite every baseline.
    All,
    /// Compare only. A missing baseline is an error.
    Never,
}

impl RecordMode {
    /// Read [`RECORD_ENV`]. Unset or unrecognised values give [`RecordMode::Missing`].
    pub fn from_env() -> Self {
        std::env::var(RECORD_ENV).map_or(Self::Missing, |value| Self::parse(&value))
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "1" | "true" => Self::All,
            "never" | "0" | "false" => Self::Never,
            _ => Self::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    Matched,
    Recorded,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot name `{0}`: use ASCII letters, digits, `_` and `-`")]
    InvalidName(String),
    #[error("no baseline for snapshot `{name}` at {}", path.display())]
    MissingBaseline { name: String, path: PathBuf },
    #[error("snapshot `{name}` does not match its baseline\n{diff}")]
    Mismatch { name: String, diff: String },
    #[error("snapshot file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Compares rendered views against the `.snap` files in one directory.
#[derive(Debug, Clone)]
pub struct SnapshotHarness {
    dir: PathBuf,
    mode: RecordMode,
}

impl SnapshotHarness {
    /// Harness over `dir`, with the record mode taken from the environment.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), mode: RecordMode::from_env() }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RecordMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, SnapshotError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{SNAPSHOT_EXT}")))
    }

    /// Where a rejected render is written for review.
    pub fn pending_path_for(&self, name: &str) -> Result<PathBuf, SnapshotError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{PENDING_EXT}")))
    }

    pub fn verify_view(
        &self,
        name: &str,
        view: &dyn View,
        width: u16,
        height: u16,
    ) -> Result<SnapshotOutcome, SnapshotError> {
        self.verify(name, &Snapshot::capture(view, width, height))
    }

    /// Panicking form of [`Self::verify_view`] for use inside tests.
    #[allow(clippy::panic)]
    pub fn assert_view(&self, name: &str, view: &dyn View, width: u16, height: u16) {
        if let Err(err) = self.verify_view(name, view, width, height) {
            panic!("{err}");
        }
    }

    pub fn verify(&self, name: &str, snapshot: &Snapshot) -> Result<SnapshotOutcome, SnapshotError> {
        let path = self.path_for(name)?;
        let actual = snapshot.to_string();

        if self.mode == RecordMode::All {
            return self.record(name, &path, &actual);
        }

        let expected = match std::fs::read_to_string(&path) {
            Ok(expected) => expected,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return match self.mode {
                    RecordMode::Never => {
                        Err(SnapshotError::MissingBaseline { name: name.to_owned(), path })
                    }
                    RecordMode::Missing | RecordMode::All => self.record(name, &path, &actual),
                };
            }
            Err(source) => return Err(SnapshotError::Io { path, source }),
        };

        let expected = normalize(&expected);
        let actual = normalize(&actual);
        if expected == actual {
            self.discard_pending(name)?;
            return Ok(SnapshotOutcome::Matched);
        }

        let diff = unified_diff(&expected, &actual);
        tracing::warn!(snapshot = name, path = %path.display(), "snapshot mismatch");
        self.write_pending(name, &actual)?;
        Err(SnapshotError::Mismatch { name: name.to_owned(), diff })
    }

    fn record(&self, name: &str, path: &Path, text: &str) -> Result<SnapshotOutcome, SnapshotError> {
        write_file(path, text)?;
        self.discard_pending(name)?;
        tracing::info!(snapshot = name, path = %path.display(), "recorded snapshot baseline");
        Ok(SnapshotOutcome::Recorded)
    }

    fn write_pending(&self, name: &str, text: &str) -> Result<(), SnapshotError> {
        let path = self.pending_path_for(name)?;
        write_file(&path, &format!("{text}\n"))
    }

    fn discard_pending(&self, name: &str) -> Result<(), SnapshotError> {
        let path = self.pending_path_for(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SnapshotError::Io { path, source }),
        }
    }
}

fn validate_name(name: &str) -> Result<(), SnapshotError> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid { Ok(()) } else { Err(SnapshotError::InvalidName(name.to_owned())) }
}

fn write_file(path: &Path, text: &str) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|source| SnapshotError::Io { path: parent.to_path_buf(), source })?;
    }
    std::fs::write(path, text).map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })
}

/// Line endings and trailing blank lines never count as a difference.
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end_matches('\n').to_owned()
}

fn unified_diff(expected: &str, actual: &str) -> String {
    let expected = format!("{expected}\n");
    let actual = format!("{actual}\n");
    TextDiff::from_lines(&expected, &actual)
        .unified_diff()
        .context_radius(3)
        .header("baseline", "rendered")
        .to_string()
}
