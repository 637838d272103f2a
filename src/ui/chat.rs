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
use crate::chat::{ChatMessage, ChatSession};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

const EMPTY_HINT: &str = "No messages yet. Say hello!";

fn message_line(message: &ChatMessage, current_user: &str, quoted: Option<&ChatMessage>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(quoted) = quoted {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", theme::QUOTE_BAR), Style::default().fg(theme::DIM)),
            Span::styled(
                format!("{}: {}", quoted.author, quoted.text.lines().next().unwrap_or_default()),
                Style::default().fg(theme::DIM).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    let author_color =
        if message.author == current_user { theme::AUTHOR_SELF } else { theme::AUTHOR_OTHER };
    let mut first = vec![
        Span::styled(message.author.clone(), Style::default().fg(author_color).add_modifier(Modifier::BOLD)),
        Span::raw(": "),
    ];
    let mut body = message.text.lines();
    first.push(Span::raw(body.next().unwrap_or_default().to_owned()));
    if message.attachment_count > 0 {
        first.push(Span::styled(
            format!(" [{} attachment(s)]", message.attachment_count),
            Style::default().fg(theme::DIM),
        ));
    }
    if message.edited {
        first.push(Span::styled(" (edited)", Style::default().fg(theme::DIM)));
    }
    lines.push(Line::from(first));
    lines.extend(body.map(|rest| Line::from(format!("  {rest}"))));
    lines
}

/// Lines for the conversation the composer posts into: the channel, or the
/// thread parent followed by its replies.
pub(super) fn conversation_lines(session: &ChatSession) -> Vec<Line<'static>> {
    let (parent, messages) = match &session.message_controller {
        Some(thread) => (Some(thread.parent()), thread.replies()),
        None => (None, session.channel.messages()),
    };

    let mut lines = Vec::new();
    if let Some(parent) = parent {
        lines.extend(message_line(parent, &session.current_user, None));
        lines.push(Line::from(Span::styled(
            theme::SEPARATOR_CHAR.repeat(4),
            Style::default().fg(theme::DIM),
        )));
    }
    for message in messages {
        let quoted = message
            .quoted_id
            .as_ref()
            .and_then(|id| parent.into_iter().chain(messages).find(|m| &m.id == id));
        lines.extend(message_line(message, &session.current_user, quoted));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(EMPTY_HINT, Style::default().fg(theme::DIM))));
    }
    lines
}

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let paragraph = Paragraph::new(Text::from(conversation_lines(&app.controller.session)))
        .wrap(Wrap { trim: false });
    let content_height = paragraph.line_count(area.width);
    let viewport_height = area.height as usize;

    if content_height <= viewport_height {
        // Short content: bottom-aligned so it stacks above the composer
        let offset = (viewport_height - content_height) as u16;
        let render_area = Rect {
            x: area.x,
            y: area.y + offset,
            width: area.width,
            height: content_height as u16,
        };
        frame.render_widget(paragraph, render_area);
    } else {
        // Long content: pin to the newest message
        let scroll = (content_height - viewport_height).min(usize::from(u16::MAX)) as u16;
        frame.render_widget(paragraph.scroll((scroll, 0)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChannelController, MessageController, MessageDraft};
    use pretty_assertions::assert_eq;

    fn rendered(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_channel_shows_hint() {
        let session = ChatSession::test_default();
        assert_eq!(rendered(&conversation_lines(&session)), vec![EMPTY_HINT]);
    }

    #[test]
    fn quoted_reply_shows_quote_above() {
        let mut channel = ChannelController::new("general", "General");
        let original = ChatMessage::new("alice", "lunch?\nat noon");
        let quoted_id = original.id.clone();
        channel.push_incoming(original);
        let draft = MessageDraft {
            text: "yes".to_owned(),
            quoted_id: Some(quoted_id),
            attachment_count: 2,
        };
        channel.send_message("me", draft).unwrap();
        let session = ChatSession::new("me", channel);

        assert_eq!(
            rendered(&conversation_lines(&session)),
            vec![
                "alice: lunch?",
                "  at noon",
                "  ┃ alice: lunch?",
                "me: yes [2 attachment(s)]",
            ]
        );
    }

    #[test]
    fn thread_lists_parent_then_replies() {
        let mut thread = MessageController::new(ChatMessage::new("bob", "root"));
        thread.reply("me", MessageDraft { text: "first".to_owned(), ..MessageDraft::default() });
        let session = ChatSession::test_default().with_thread(thread);

        assert_eq!(rendered(&conversation_lines(&session)), vec!["bob: root", "────", "me: first"]);
    }
}
