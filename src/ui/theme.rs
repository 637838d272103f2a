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

use ratatui::style::Color;

// Accent
pub const ACCENT: Color = Color::Rgb(0, 95, 255);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const SEPARATOR_CHAR: &str = "─";
pub const QUOTE_BAR: &str = "┃";

// Composer controls
pub const SEND_ICON: &str = "➤";
pub const ATTACH_ICON: &str = "+";
pub const REMOVE_ICON: &str = "×";
pub const COOLDOWN_FG: Color = Color::White;
pub const COOLDOWN_BG: Color = Color::DarkGray;

// Attachment chip icons
pub const ICON_IMAGE: &str = "▣";
pub const ICON_VIDEO: &str = "▶";
pub const ICON_FILE: &str = "▤";
pub const ICON_CUSTOM: &str = "◆";

// Message list
pub const AUTHOR_SELF: Color = ACCENT;
pub const AUTHOR_OTHER: Color = Color::Yellow;
pub const STATUS_ERROR: Color = Color::Red;
