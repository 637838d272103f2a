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

pub mod app;
pub mod chat;
pub mod error;
pub mod fixtures;
pub mod snapshot;
pub mod ui;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chat-composer", about = "Terminal chat composer and snapshot harness")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Write tracing diagnostics to this file (disabled when omitted)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives, e.g. `chat_composer=debug` (falls back to `RUST_LOG`)
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long, global = true)]
    pub log_append: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive composer (default)
    Run(RunArgs),
    /// Print the snapshot text of a fixture
    Render(RenderArgs),
    /// Write baselines for every built-in fixture
    Record(RecordArgs),
    /// Compare every built-in fixture with its baseline without recording
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Channel name shown in the header
    #[arg(long, default_value = "general")]
    pub channel: String,

    /// Slow mode interval in seconds (0 disables)
    #[arg(long, default_value_t = 0)]
    pub cooldown: u32,

    /// Placeholder shown while the input is empty
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Name the composer posts as
    #[arg(long, default_value = "me")]
    pub user: String,

    /// Disallow file uploads in the channel
    #[arg(long)]
    pub no_uploads: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            channel: "general".to_owned(),
            cooldown: 0,
            placeholder: None,
            user: "me".to_owned(),
            no_uploads: false,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Built-in fixture name (see `record` for the list)
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub fixture: Option<String>,

    /// JSON fixture file instead of a built-in fixture
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Override the fixture width
    #[arg(long)]
    pub width: Option<u16>,

    /// Override the fixture height
    #[arg(long)]
    pub height: Option<u16>,
}

#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Directory the `.snap` files are written to
    #[arg(long, default_value = "tests/snapshots")]
    pub dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Directory the `.snap` baselines are read from
    #[arg(long, default_value = "tests/snapshots")]
    pub dir: PathBuf,
}
