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

pub mod attachments;
mod chat;
pub mod composer;
pub mod composer_input;
pub mod factory;
mod header;
mod layout;
pub mod quoted;
pub mod text_input;
pub mod theme;
pub mod trailing;

use crate::app::{App, ComposerAction};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A composer building block.
///
/// Views are built from plain values, draw into whatever area they are
/// given, and never mutate state. Interaction comes back out of [`View::tap`]
/// as a [`ComposerAction`] for the controller to apply.
pub trait View {
    fn render(&self, area: Rect, buf: &mut Buffer);

    /// Where the terminal cursor goes when this view has focus.
    fn cursor_position(&self, _area: Rect) -> Option<Position> {
        None
    }

    /// Rows the view wants at the given width.
    fn desired_height(&self, _width: u16) -> u16 {
        1
    }

    /// Hit-test a click at `at` against the view drawn in `area`.
    fn tap(&self, _area: Rect, _at: Position) -> Option<ComposerAction> {
        None
    }
}

impl<T: View + ?Sized> View for Box<T> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        (**self).render(area, buf);
    }

    fn cursor_position(&self, area: Rect) -> Option<Position> {
        (**self).cursor_position(area)
    }

    fn desired_height(&self, width: u16) -> u16 {
        (**self).desired_height(width)
    }

    fn tap(&self, area: Rect, at: Position) -> Option<ComposerAction> {
        (**self).tap(area, at)
    }
}

/// Adapter so a [`View`] can go through `Frame::render_widget`.
pub struct ViewWidget<'a>(pub &'a dyn View);

impl Widget for ViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.0.render(area, buf);
    }
}

/// Draw `view` and hand its cursor to the terminal.
pub fn draw_view(frame: &mut Frame, area: Rect, view: &dyn View) {
    frame.render_widget(ViewWidget(view), area);
    if let Some(cursor) = view.cursor_position(area) {
        frame.set_cursor_position(cursor);
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();
    let composer = app.composer_view();
    let areas = layout::compute(frame_area, composer.desired_height(frame_area.width));

    if areas.header.height > 0 {
        header::render(frame, areas.header, app);
        render_separator(frame, areas.header_sep);
    }

    chat::render(frame, areas.body, app);

    draw_view(frame, areas.composer, &composer);
    app.rendered_composer_area = areas.composer;

    if let Some(footer_area) = areas.footer {
        render_footer(frame, footer_area, app);
    }
}

const FOOTER_PAD: u16 = 2;
const FOOTER_HINTS: &str = "Enter send | Ctrl+R reply | Up edit | Ctrl+Q quit";

fn footer_line(app: &App, width: usize) -> Line<'static> {
    match &app.status {
        Some(status) => {
            let color = if status.is_error { theme::STATUS_ERROR } else { theme::DIM };
            Line::from(Span::styled(fit_width(&status.text, width), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(fit_width(FOOTER_HINTS, width), Style::default().fg(theme::DIM))),
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };
    if padded.width == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(footer_line(app, usize::from(padded.width))), padded);
}

/// Shorten `text` to `max_width` display columns, ending in `...` when cut.
pub(crate) fn fit_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_owned();
    }

    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut fitted = String::new();
    let mut width: usize = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width.saturating_add(ch_width).saturating_add(3) > max_width {
            break;
        }
        fitted.push(ch);
        width = width.saturating_add(ch_width);
    }
    fitted.push_str("...");
    fitted
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(area.width as usize);
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}
