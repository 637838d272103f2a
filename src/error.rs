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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Fixture not found: {0}")]
    FixtureNotFound(String),
    #[error("Snapshot mismatch: {0}")]
    SnapshotMismatch(String),
    #[error("Terminal setup failed")]
    TerminalFailed,
    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),
}

impl AppError {
    pub const FIXTURE_NOT_FOUND_EXIT_CODE: i32 = 20;
    pub const SNAPSHOT_MISMATCH_EXIT_CODE: i32 = 21;
    pub const TERMINAL_FAILED_EXIT_CODE: i32 = 22;
    pub const INVALID_FIXTURE_EXIT_CODE: i32 = 23;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FixtureNotFound(_) => Self::FIXTURE_NOT_FOUND_EXIT_CODE,
            Self::SnapshotMismatch(_) => Self::SNAPSHOT_MISMATCH_EXIT_CODE,
            Self::TerminalFailed => Self::TERMINAL_FAILED_EXIT_CODE,
            Self::InvalidFixture(_) => Self::INVALID_FIXTURE_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::FixtureNotFound(name) => format!(
                "Unknown fixture `{name}`. Available: {}.",
                crate::fixtures::builtin_names().join(", ")
            ),
            Self::SnapshotMismatch(report) => {
                format!("Rendered output differs from the recorded baseline.\n{report}")
            }
            Self::TerminalFailed => {
                "Could not drive the terminal. Run the composer in an interactive terminal."
                    .to_owned()
            }
            Self::InvalidFixture(detail) => format!("Fixture file could not be loaded: {detail}"),
        }
    }
}
