// =====
// TESTS: 14
// =====
//
// Composer controller integration tests.
// Drives full send / edit / reply flows against a chat session and checks
// both the session and the actions published to the screen.

use chat_composer::app::{
    Attachment, AttachmentId, ComposerAction, ComposerCommand, ComposerController, ComposerError,
    ComposerEvent,
};
use chat_composer::chat::{
    ChannelCapabilities, ChannelController, ChatMessage, ChatSession, MessageController, MessageId,
};
use pretty_assertions::assert_eq;
use std::io::Write as _;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::helpers::type_text;

fn controller(session: ChatSession) -> (ComposerController, mpsc::UnboundedReceiver<ComposerAction>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ComposerController::new(session, tx), rx)
}

fn channel_with(capabilities: ChannelCapabilities) -> ChatSession {
    ChatSession::new("me", ChannelController::new("general", "General").with_capabilities(capabilities))
}

// --- Sending ---

#[test]
fn send_posts_to_channel_and_publishes() {
    let (mut controller, mut rx) = controller(ChatSession::test_default());
    type_text(&mut controller, "hello");

    let message = controller.send(Instant::now()).unwrap().unwrap();
    assert_eq!(message.text, "hello");
    assert_eq!(message.author, "me");
    assert_eq!(controller.session.channel.messages(), &[message.clone()]);
    assert_eq!(rx.try_recv().unwrap(), ComposerAction::MessageSent(message));
    assert_eq!(controller.state.text(), "");
    assert!(!controller.can_send());
}

#[test]
fn sending_is_rejected_in_frozen_channel() {
    let capabilities = ChannelCapabilities { can_send: false, ..ChannelCapabilities::default() };
    let (mut controller, mut rx) = controller(channel_with(capabilities));
    type_text(&mut controller, "hello");

    assert!(matches!(controller.send(Instant::now()), Err(ComposerError::SendingDisabled)));
    assert!(controller.session.channel.messages().is_empty());
    assert!(rx.try_recv().is_err());
    assert_eq!(controller.state.text(), "hello");
}

#[test]
fn giphy_command_posts_wire_text() {
    let (mut controller, _rx) = controller(ChatSession::test_default());
    type_text(&mut controller, "/giphy cats");
    assert_eq!(controller.state.command, Some(ComposerCommand::Giphy(String::new())));
    assert_eq!(controller.state.text(), "cats");

    let message = controller.send(Instant::now()).unwrap().unwrap();
    assert_eq!(message.text, "/giphy cats");
    assert_eq!(controller.state.command, None);
}

#[test]
fn attachments_are_counted_and_cleared() {
    let (mut controller, _rx) = controller(ChatSession::test_default());
    controller.apply(ComposerEvent::AddAttachment(Attachment::image("cat.png")));
    controller.apply(ComposerEvent::AddAttachment(Attachment::file("notes.txt", 10)));
    assert!(controller.can_send());

    let message = controller.send(Instant::now()).unwrap().unwrap();
    assert_eq!(message.attachment_count, 2);
    assert!(controller.state.attachments.is_empty());
}

// --- Slow mode ---

#[test]
fn slow_mode_blocks_sends_until_cooldown_elapses() {
    let session = ChatSession::new("me", ChannelController::new("general", "General").with_cooldown(10));
    let (mut controller, _rx) = controller(session);
    let start = Instant::now();

    type_text(&mut controller, "first");
    controller.send(start).unwrap();
    assert_eq!(controller.state.cooldown.remaining_secs(), 10);

    assert!(controller.apply(ComposerEvent::Tick(start + Duration::from_secs(4))));
    type_text(&mut controller, "second");
    assert!(matches!(
        controller.send(start + Duration::from_secs(4)),
        Err(ComposerError::SlowModeActive { remaining: 6 })
    ));

    controller.apply(ComposerEvent::Tick(start + Duration::from_secs(10)));
    assert!(!controller.state.cooldown.is_active());
    controller.send(start + Duration::from_secs(10)).unwrap();
    assert_eq!(controller.session.channel.messages().len(), 2);
}

#[test]
fn slow_mode_exempt_user_skips_cooldown() {
    let capabilities = ChannelCapabilities { slow_mode_exempt: true, ..ChannelCapabilities::default() };
    let session = ChatSession::new(
        "me",
        ChannelController::new("general", "General").with_cooldown(30).with_capabilities(capabilities),
    );
    let (mut controller, _rx) = controller(session);
    type_text(&mut controller, "hi");
    controller.send(Instant::now()).unwrap();
    assert!(!controller.state.cooldown.is_active());
}

// --- Editing and quoting ---

#[test]
fn edit_rewrites_message_in_place_even_during_cooldown() {
    let session = ChatSession::new("me", ChannelController::new("general", "General").with_cooldown(30));
    let (mut controller, mut rx) = controller(session);
    let now = Instant::now();
    type_text(&mut controller, "helo");
    let original = controller.send(now).unwrap().unwrap();
    let _ = rx.try_recv();

    assert!(controller.edit_last_message());
    assert_eq!(controller.state.text(), "helo");
    type_text(&mut controller, "hello");
    assert!(controller.can_send());

    let edited = controller.send(now).unwrap().unwrap();
    assert_eq!(edited.id, original.id);
    assert!(edited.edited);
    assert_eq!(controller.session.channel.messages().len(), 1);
    assert_eq!(controller.session.channel.messages()[0].text, "hello");
    assert_eq!(rx.try_recv().unwrap(), ComposerAction::MessageSent(edited));
    assert_eq!(controller.state.edited, None);
}

#[test]
fn edits_are_refused_without_edit_permission() {
    let capabilities = ChannelCapabilities { can_edit: false, ..ChannelCapabilities::default() };
    let (mut controller, mut rx) = controller(channel_with(capabilities));
    type_text(&mut controller, "helo");
    let original = controller.send(Instant::now()).unwrap().unwrap();
    let _ = rx.try_recv();

    assert!(!controller.edit_last_message());
    assert_eq!(controller.state.edited, None);

    controller.apply(ComposerEvent::SetEdited(Some(original)));
    type_text(&mut controller, "hello");
    assert!(!controller.can_send());
    assert!(matches!(controller.send(Instant::now()), Err(ComposerError::EditingDisabled)));
    assert_eq!(controller.session.channel.messages()[0].text, "helo");
    assert!(rx.try_recv().is_err());
}

#[test]
fn quoted_reply_records_the_quote() {
    let mut channel = ChannelController::new("general", "General");
    let question = ChatMessage::new("alice", "Lunch?").with_id(MessageId::new("q1"));
    channel.push_incoming(question.clone());
    let (mut controller, _rx) = controller(ChatSession::new("me", channel));

    assert!(controller.quote_last_message());
    assert_eq!(controller.state.quoted, Some(question));
    type_text(&mut controller, "Yes");

    let reply = controller.send(Instant::now()).unwrap().unwrap();
    assert_eq!(reply.quoted_id, Some(MessageId::new("q1")));
    assert_eq!(controller.state.quoted, None);
}

#[test]
fn thread_reply_goes_to_the_thread() {
    let parent = ChatMessage::new("alice", "Plans?").with_id(MessageId::new("p1"));
    let session = ChatSession::test_default().with_thread(MessageController::new(parent));
    let (mut controller, _rx) = controller(session);
    type_text(&mut controller, "Tomorrow");

    let reply = controller.send(Instant::now()).unwrap().unwrap();
    assert_eq!(reply.parent_id, Some(MessageId::new("p1")));
    assert!(controller.session.channel.messages().is_empty());
    let thread = controller.session.message_controller.as_ref().unwrap();
    assert_eq!(thread.replies(), &[reply]);
}

// --- Attachment actions ---

#[test]
fn remove_attachment_action_drops_it() {
    let (mut controller, _rx) = controller(ChatSession::test_default());
    let id = AttachmentId::new("a1");
    controller.apply(ComposerEvent::AddAttachment(Attachment::image("cat.png").with_id(id.clone())));

    controller.handle_action(ComposerAction::RemoveAttachment(id), Instant::now()).unwrap();
    assert!(controller.state.attachments.is_empty());
}

#[test]
fn custom_attachment_tap_is_published() {
    let (mut controller, mut rx) = controller(ChatSession::test_default());
    let id = AttachmentId::new("poll");
    controller.apply(ComposerEvent::AddAttachment(Attachment::custom("Poll", "poll").with_id(id.clone())));

    controller.handle_action(ComposerAction::CustomAttachmentTapped(id.clone()), Instant::now()).unwrap();
    assert_eq!(rx.try_recv().unwrap(), ComposerAction::CustomAttachmentTapped(id));
    assert_eq!(controller.state.attachments.len(), 1);
}

#[test]
fn attach_command_adds_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"hello").unwrap();
    let (mut controller, mut rx) = controller(ChatSession::test_default());

    controller.handle_action(ComposerAction::OpenAttachmentPicker, Instant::now()).unwrap();
    assert_eq!(controller.state.command, Some(ComposerCommand::Attach(String::new())));
    controller.state.input.insert_str(&file.path().display().to_string());

    assert_eq!(controller.send(Instant::now()).unwrap(), None);
    assert_eq!(controller.state.attachments.len(), 1);
    assert_eq!(controller.state.command, None);
    assert_eq!(controller.state.text(), "");
    assert!(rx.try_recv().is_err());
}

#[test]
fn picker_is_refused_without_upload_permission() {
    let capabilities = ChannelCapabilities { can_upload_files: false, ..ChannelCapabilities::default() };
    let (mut controller, _rx) = controller(channel_with(capabilities));
    assert!(matches!(
        controller.handle_action(ComposerAction::OpenAttachmentPicker, Instant::now()),
        Err(ComposerError::UploadsDisabled)
    ));
    assert_eq!(controller.state.command, None);
}
