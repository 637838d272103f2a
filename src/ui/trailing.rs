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

use crate::app::ComposerAction;
use crate::ui::{View, theme};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Widget};
use unicode_width::UnicodeWidthStr;

/// Send control at the end of the composer. While slow mode counts down it
/// shows the remaining seconds instead and ignores taps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingComposerView {
    pub enabled: bool,
    pub cooldown_duration: u32,
    pub on_tap: ComposerAction,
}

impl TrailingComposerView {
    pub fn new(enabled: bool, cooldown_duration: u32, on_tap: ComposerAction) -> Self {
        Self { enabled, cooldown_duration, on_tap }
    }

    #[must_use]
    pub fn is_slow_mode(&self) -> bool {
        self.cooldown_duration > 0
    }

    fn label(&self) -> (String, Style) {
        if self.is_slow_mode() {
            (
                self.cooldown_duration.to_string(),
                Style::default()
                    .fg(theme::COOLDOWN_FG)
                    .bg(theme::COOLDOWN_BG)
                    .add_modifier(Modifier::BOLD),
            )
        } else if self.enabled {
            (
                theme::SEND_ICON.to_owned(),
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
            )
        } else {
            (theme::SEND_ICON.to_owned(), Style::default().fg(theme::DIM))
        }
    }
}

impl View for TrailingComposerView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let inner = if area.width >= 3 && area.height >= 3 {
            let border = if self.enabled && !self.is_slow_mode() { theme::ACCENT } else { theme::DIM };
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border));
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (label, style) = self.label();
        let label_width = u16::try_from(label.width()).unwrap_or(u16::MAX);
        let x = inner.x + inner.width.saturating_sub(label_width) / 2;
        let y = inner.y + inner.height.saturating_sub(1) / 2;
        buf.set_stringn(x, y, &label, usize::from(inner.right() - x), style);
    }

    fn desired_height(&self, _width: u16) -> u16 {
        3
    }

    fn tap(&self, area: Rect, at: Position) -> Option<ComposerAction> {
        (self.enabled && !self.is_slow_mode() && area.contains(at)).then(|| self.on_tap.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn send_variant_centers_icon() {
        let view = TrailingComposerView::new(true, 0, ComposerAction::Send);
        let snap = Snapshot::capture(&view, 7, 3);
        assert_eq!(snap.rows(), vec!["╭─────╮", "│  ➤  │", "╰─────╯"]);
        assert_eq!(snap.cursor(), None);
    }

    #[test]
    fn slow_mode_variant_shows_seconds() {
        let view = TrailingComposerView::new(true, 15, ComposerAction::Send);
        let snap = Snapshot::capture(&view, 7, 3);
        assert_eq!(snap.rows()[1], "│ 15  │");
    }

    #[test]
    fn tiny_area_skips_border() {
        let view = TrailingComposerView::new(true, 0, ComposerAction::Send);
        let snap = Snapshot::capture(&view, 3, 1);
        assert_eq!(snap.rows(), vec![" ➤ "]);
    }

    #[test]
    fn disabled_icon_is_dim() {
        let view = TrailingComposerView::new(false, 0, ComposerAction::Send);
        let mut buf = Buffer::empty(Rect::new(0, 0, 7, 3));
        view.render(buf.area, &mut buf);
        assert_eq!(buf[(3, 1)].symbol(), "➤");
        assert_eq!(buf[(3, 1)].fg, theme::DIM);
    }

    #[test]
    fn tap_only_when_enabled_and_not_cooling_down() {
        let area = Rect::new(10, 0, 7, 3);
        let inside = Position::new(12, 1);
        let enabled = TrailingComposerView::new(true, 0, ComposerAction::Send);
        assert_eq!(enabled.tap(area, inside), Some(ComposerAction::Send));
        assert_eq!(enabled.tap(area, Position::new(2, 1)), None);
        assert_eq!(TrailingComposerView::new(false, 0, ComposerAction::Send).tap(area, inside), None);
        assert_eq!(TrailingComposerView::new(true, 5, ComposerAction::Send).tap(area, inside), None);
    }
}
