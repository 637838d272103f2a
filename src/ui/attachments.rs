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

use crate::app::{Attachment, AttachmentId, AttachmentSet, ComposerAction, MediaKind};
use crate::ui::{View, fit_width, theme};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

const CHIP_GAP: u16 = 2;
const MAX_CHIP_LABEL: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Chip {
    id: AttachmentId,
    icon: &'static str,
    label: String,
    custom: bool,
}

impl Chip {
    fn from_attachment(attachment: &Attachment) -> Self {
        let icon = match attachment {
            Attachment::Media { kind: MediaKind::Image, .. } => theme::ICON_IMAGE,
            Attachment::Media { kind: MediaKind::Video, .. } => theme::ICON_VIDEO,
            Attachment::File { .. } => theme::ICON_FILE,
            Attachment::Custom { .. } => theme::ICON_CUSTOM,
        };
        Self {
            id: attachment.id().clone(),
            icon,
            label: fit_width(&attachment.label(), MAX_CHIP_LABEL),
            custom: attachment.is_custom(),
        }
    }

    fn text(&self) -> String {
        format!("{} {} {}", self.icon, self.label, theme::REMOVE_ICON)
    }

    fn width(&self) -> u16 {
        u16::try_from(self.text().width()).unwrap_or(u16::MAX)
    }
}

/// Where each visible chip landed on the row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlacedChip {
    index: usize,
    x: u16,
    width: u16,
}

/// One row of attachment chips: `▣ photo.png ×`. Chips that do not fit
/// collapse into a trailing `+N` counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentStripView {
    chips: Vec<Chip>,
}

impl AttachmentStripView {
    pub fn new(attachments: &AttachmentSet) -> Self {
        Self { chips: attachments.iter().map(Chip::from_attachment).collect() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    fn place(&self, width: u16) -> (Vec<PlacedChip>, usize) {
        let mut placed = Vec::new();
        let mut x: u16 = 0;
        for (index, chip) in self.chips.iter().enumerate() {
            let gap = if placed.is_empty() { 0 } else { CHIP_GAP };
            let chip_width = chip.width();
            if x.saturating_add(gap).saturating_add(chip_width) > width {
                return (placed, self.chips.len() - index);
            }
            placed.push(PlacedChip { index, x: x + gap, width: chip_width });
            x += gap + chip_width;
        }
        (placed, 0)
    }
}

impl View for AttachmentStripView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (placed, hidden) = self.place(area.width);
        let mut end = 0;
        for chip_pos in &placed {
            let chip = &self.chips[chip_pos.index];
            let x = area.x + chip_pos.x;
            let icon_style =
                if chip.custom { Style::default().fg(theme::ACCENT) } else { Style::default() };
            let right = usize::from(area.right());
            let (after_icon, _) = buf.set_stringn(x, area.y, chip.icon, 1, icon_style);
            let (after_label, _) = buf.set_stringn(
                after_icon,
                area.y,
                format!(" {} ", chip.label),
                right - usize::from(after_icon),
                Style::default(),
            );
            buf.set_stringn(
                after_label,
                area.y,
                theme::REMOVE_ICON,
                right - usize::from(after_label),
                Style::default().fg(theme::DIM),
            );
            end = chip_pos.x + chip_pos.width;
        }
        if hidden > 0 {
            let counter = format!("+{hidden}");
            let gap = if placed.is_empty() { 0 } else { CHIP_GAP };
            let counter_width = u16::try_from(counter.width()).unwrap_or(u16::MAX);
            if end.saturating_add(gap).saturating_add(counter_width) <= area.width {
                buf.set_string(area.x + end + gap, area.y, counter, Style::default().fg(theme::DIM));
            }
        }
    }

    fn tap(&self, area: Rect, at: Position) -> Option<ComposerAction> {
        if at.y != area.y || !area.contains(at) {
            return None;
        }
        let rel = at.x - area.x;
        let (placed, _) = self.place(area.width);
        let hit = placed.iter().find(|p| rel >= p.x && rel < p.x + p.width)?;
        let chip = &self.chips[hit.index];
        if rel == hit.x + hit.width - 1 {
            Some(ComposerAction::RemoveAttachment(chip.id.clone()))
        } else if chip.custom {
            Some(ComposerAction::CustomAttachmentTapped(chip.id.clone()))
        } else {
            None
        }
    }
}
