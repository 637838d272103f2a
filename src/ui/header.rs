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

use crate::app::App;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 2;

fn header_line(app: &App) -> Line<'static> {
    let session = &app.controller.session;
    let sep = Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));

    let mut spans = vec![Span::styled(
        format!("# {}", session.channel.name),
        Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
    )];
    if let Some(thread) = &session.message_controller {
        spans.push(sep.clone());
        spans.push(Span::styled("Thread: ", Style::default().fg(theme::DIM)));
        spans.push(Span::styled(thread.parent().author.clone(), Style::default().fg(Color::White)));
    }
    if session.channel.cooldown_secs > 0 {
        spans.push(sep);
        let label = if session.channel.capabilities.slow_mode_exempt {
            format!("Slow mode {}s (exempt)", session.channel.cooldown_secs)
        } else {
            format!("Slow mode {}s", session.channel.cooldown_secs)
        };
        spans.push(Span::styled(label, Style::default().fg(theme::DIM)));
    }
    Line::from(spans)
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };
    frame.render_widget(Paragraph::new(header_line(app)), padded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChannelController, ChatMessage, ChatSession, MessageController};
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_channel_shows_name_only() {
        let app = App::test_default();
        assert_eq!(header_line(&app).to_string(), "# General");
    }

    #[test]
    fn slow_mode_and_thread_are_listed() {
        let session = ChatSession::new("me", ChannelController::new("dev", "dev").with_cooldown(30))
            .with_thread(MessageController::new(ChatMessage::new("alice", "root")));
        let app = App::new(session);
        assert_eq!(
            header_line(&app).to_string(),
            "# dev  \u{2502}  Thread: alice  \u{2502}  Slow mode 30s"
        );
    }
}
