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

mod attachments;
mod command;
mod controller;
mod cooldown;
mod events;
mod input;
mod keys;
mod state;

pub use attachments::{Attachment, AttachmentId, AttachmentSet, MediaKind, format_size};
pub use command::ComposerCommand;
pub use controller::{
    ActionSender, ComposerAction, ComposerController, ComposerError, ComposerEvent,
};
pub use cooldown::Cooldown;
pub use events::handle_terminal_event;
pub use input::InputState;
pub use state::{ComposerConfig, ComposerState, DEFAULT_PLACEHOLDER, SLOW_MODE_PLACEHOLDER};

use crate::RunArgs;
use crate::chat::{ChannelCapabilities, ChannelController, ChatMessage, ChatSession};
use crate::ui::composer::MessageComposerView;
use crate::ui::factory::{DefaultViewFactory, ViewFactory};
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// One line of feedback shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

/// Interactive demo screen: a message list with a composer underneath.
pub struct App {
    pub controller: ComposerController,
    pub actions_rx: mpsc::UnboundedReceiver<ComposerAction>,
    pub factory: &'static dyn ViewFactory,
    pub should_quit: bool,
    pub status: Option<StatusLine>,
    /// Where the composer was last drawn, for hit-testing clicks.
    pub rendered_composer_area: Rect,
}

impl App {
    pub fn new(session: ChatSession) -> Self {
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        Self {
            controller: ComposerController::new(session, actions_tx),
            actions_rx,
            factory: DefaultViewFactory::shared(),
            should_quit: false,
            status: None,
            rendered_composer_area: Rect::default(),
        }
    }

    /// Build the composer for the current state. Views are cheap and
    /// rebuilt every frame.
    pub fn composer_view(&self) -> MessageComposerView {
        MessageComposerView::new(self.factory, &self.controller.session, &self.controller.state)
    }

    /// Route an action reported by a view or a shortcut.
    pub fn perform(&mut self, action: ComposerAction, now: Instant) {
        let picker = matches!(action, ComposerAction::OpenAttachmentPicker);
        match self.controller.handle_action(action, now) {
            Ok(()) if picker => {
                self.status = Some(StatusLine::info("Type a file path and press Enter to attach"));
            }
            Ok(()) => {}
            Err(err) => {
                tracing::debug!(error = %err, "composer action rejected");
                self.status = Some(StatusLine::error(err.to_string()));
            }
        }
    }

    /// React to an action the controller published.
    pub fn handle_published(&mut self, action: &ComposerAction) {
        match action {
            ComposerAction::MessageSent(message) => {
                let verb = if message.edited { "Edited" } else { "Sent" };
                self.status = Some(StatusLine::info(format!("{verb} message {}", message.id)));
            }
            ComposerAction::CustomAttachmentTapped(id) => {
                let title = self
                    .controller
                    .state
                    .attachments
                    .get(id)
                    .map_or_else(|| id.to_string(), Attachment::label);
                self.status = Some(StatusLine::info(format!("Opened {title}")));
            }
            ComposerAction::Send
            | ComposerAction::RemoveAttachment(_)
            | ComposerAction::OpenAttachmentPicker => {}
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.controller.apply(ComposerEvent::Tick(now))
    }

    /// How long the loop may sleep before the countdown needs a redraw.
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        self.controller.state.cooldown.until_next_change(now).unwrap_or(IDLE_WAKEUP)
    }

    /// A plain writable channel with nobody else in it.
    pub fn test_default() -> Self {
        Self::new(ChatSession::test_default())
    }
}

const IDLE_WAKEUP: Duration = Duration::from_millis(250);

pub fn create_app(args: &RunArgs) -> App {
    let capabilities =
        ChannelCapabilities { can_upload_files: !args.no_uploads, ..ChannelCapabilities::default() };
    let mut channel = ChannelController::new(args.channel.clone(), args.channel.clone())
        .with_cooldown(args.cooldown)
        .with_capabilities(capabilities);
    channel.push_incoming(ChatMessage::new("bot", format!("Welcome to #{}!", args.channel)));

    let mut app = App::new(ChatSession::new(args.user.clone(), channel));
    if let Some(placeholder) = &args.placeholder {
        app.controller.state.placeholder.clone_from(placeholder);
    }
    tracing::info!(
        channel = %args.channel,
        cooldown = args.cooldown,
        uploads = !args.no_uploads,
        "composer session created"
    );
    app
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Bracketed paste and mouse capture; ignore the error on terminals without them
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::EnableBracketedPaste,
        crossterm::event::EnableMouseCapture,
    );

    let mut events = EventStream::new();
    let result = loop {
        // Phase 1: wait for an event, a published action, or the next countdown tick
        let wakeup = app.next_wakeup(Instant::now());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                events::handle_terminal_event(app, event, Instant::now());
            }
            Some(action) = app.actions_rx.recv() => {
                app.handle_published(&action);
            }
            () = tokio::time::sleep(wakeup) => {}
        }

        // Phase 2: drain everything else that is already queued
        loop {
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                events::handle_terminal_event(app, event, Instant::now());
                continue;
            }
            match app.actions_rx.try_recv() {
                Ok(action) => app.handle_published(&action),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break Ok(());
        }

        // Phase 3: render once
        app.tick(Instant::now());
        if let Err(err) = terminal.draw(|f| crate::ui::render(f, app)) {
            tracing::error!(error = %err, "terminal draw failed");
            break Err(anyhow::Error::new(crate::error::AppError::TerminalFailed)
                .context(format!("drawing the composer failed: {err}")));
        }
    };

    // Restore terminal
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
    );
    ratatui::restore();

    result
}
