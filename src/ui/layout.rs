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

use ratatui::layout::{Constraint, Layout, Rect};

/// Vertical split of the demo chat screen.
pub struct AppLayout {
    pub header: Rect,
    pub header_sep: Rect,
    pub body: Rect,
    pub composer: Rect,
    pub footer: Option<Rect>,
}

/// Below this height the header and footer give way to the composer.
const COMPACT_HEIGHT: u16 = 8;

pub fn compute(area: Rect, composer_height: u16) -> AppLayout {
    let composer_height = composer_height.max(1);
    let zero = Rect::new(area.x, area.y, area.width, 0);

    if area.height < COMPACT_HEIGHT {
        let [body, composer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(composer_height)])
                .areas(area);
        AppLayout { header: zero, header_sep: zero, body, composer, footer: None }
    } else {
        let [header, header_sep, body, composer, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(composer_height),
            Constraint::Length(1),
        ])
        .areas(area);
        AppLayout { header, header_sep, body, composer, footer: Some(footer) }
    }
}
