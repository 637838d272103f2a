// =====
// TESTS: 8
// =====
//
// Terminal event integration tests.
// Feeds crossterm events through the app, renders the full screen to a
// test backend, and hit-tests clicks against the drawn composer.

use chat_composer::app::{App, ComposerCommand, handle_terminal_event};
use chat_composer::snapshot::Snapshot;
use chat_composer::ui::View;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use crate::helpers::{slow_mode_app, test_app};

fn press(app: &mut App, code: KeyCode) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), Instant::now());
}

fn type_keys(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn click(app: &mut App, column: u16, row: u16) {
    let event = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    });
    handle_terminal_event(app, event, Instant::now());
}

fn drain_published(app: &mut App) {
    while let Ok(action) = app.actions_rx.try_recv() {
        app.handle_published(&action);
    }
}

fn draw(app: &mut App) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    terminal.draw(|f| chat_composer::ui::render(f, app)).unwrap();
    terminal
}

fn screen_row(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buf = terminal.backend().buffer();
    (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
}

#[test]
fn typing_and_enter_sends_through_the_app() {
    let mut app = test_app();
    type_keys(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    drain_published(&mut app);

    let messages = app.controller.session.channel.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "hello");
    let status = app.status.clone().unwrap();
    assert!(!status.is_error);
    assert_eq!(status.text, format!("Sent message {}", messages[0].id));
}

#[test]
fn paste_inserts_text_and_promotes_commands() {
    let mut app = test_app();
    handle_terminal_event(&mut app, Event::Paste("/giphy party".to_owned()), Instant::now());
    assert_eq!(app.controller.state.command, Some(ComposerCommand::Giphy(String::new())));
    assert_eq!(app.controller.state.text(), "party");
}

#[test]
fn render_records_the_composer_area() {
    let mut app = test_app();
    let terminal = draw(&mut app);
    assert_eq!(app.rendered_composer_area, Rect::new(0, 8, 40, 3));
    assert_eq!(screen_row(&terminal, 9), " + │ Send a message             ││  ➤  │");
}

#[test]
fn clicking_send_posts_the_message() {
    let mut app = test_app();
    type_keys(&mut app, "hi");
    draw(&mut app);
    click(&mut app, 36, 9);
    assert_eq!(app.controller.session.channel.messages().len(), 1);
    assert_eq!(app.controller.state.text(), "");
}

#[test]
fn clicking_attach_opens_the_picker() {
    let mut app = test_app();
    draw(&mut app);
    click(&mut app, 1, 9);
    assert_eq!(app.controller.state.command, Some(ComposerCommand::Attach(String::new())));
    assert!(app.status.is_some());
}

#[test]
fn clicks_outside_the_composer_are_ignored() {
    let mut app = test_app();
    type_keys(&mut app, "hi");
    draw(&mut app);
    click(&mut app, 36, 2);
    assert!(app.controller.session.channel.messages().is_empty());
    assert_eq!(app.controller.state.text(), "hi");
}

#[test]
fn slow_mode_countdown_is_drawn_and_expires() {
    let mut app = slow_mode_app(5);
    type_keys(&mut app, "hi");
    press(&mut app, KeyCode::Enter);
    drain_published(&mut app);

    let terminal = draw(&mut app);
    let row = screen_row(&terminal, 9);
    assert!(row.contains("Slow mode ON"), "{row}");
    assert!(row.ends_with("5s ││  5  │"), "{row}");

    type_keys(&mut app, "x");
    assert_eq!(app.controller.state.text(), "");

    assert!(app.tick(Instant::now() + Duration::from_secs(6)));
    assert!(app.controller.state.accepts_text());
}

#[test]
fn editing_during_slow_mode_accepts_keys() {
    let mut app = slow_mode_app(30);
    type_keys(&mut app, "helo");
    press(&mut app, KeyCode::Enter);
    drain_published(&mut app);
    assert!(app.controller.state.cooldown.is_active());

    press(&mut app, KeyCode::Up);
    assert!(app.controller.state.edited.is_some());
    type_keys(&mut app, "x");
    assert_eq!(app.controller.state.text(), "helox");
    let view = app.composer_view();
    let height = view.desired_height(40);
    assert!(Snapshot::capture(&view, 40, height).cursor().is_some());

    press(&mut app, KeyCode::Enter);
    let messages = app.controller.session.channel.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "helox");
    assert!(messages[0].edited);
}
