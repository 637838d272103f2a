use chat_composer::app::{App, ComposerController, ComposerEvent};
use chat_composer::chat::{ChannelController, ChatSession};
use chat_composer::snapshot::SnapshotHarness;
use std::path::PathBuf;

/// Build a minimal `App` for integration testing.
/// No terminal, no event loop -- just state.
pub fn test_app() -> App {
    App::test_default()
}

/// `App` on a channel with slow mode set to `secs`.
pub fn slow_mode_app(secs: u32) -> App {
    App::new(ChatSession::new("me", ChannelController::new("general", "General").with_cooldown(secs)))
}

/// Harness over the checked-in baselines. `CHAT_COMPOSER_RECORD` still
/// controls whether they are rewritten.
pub fn snapshot_harness() -> SnapshotHarness {
    SnapshotHarness::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("snapshots"))
}

/// Replace the composer text, cursor at the end.
pub fn type_text(controller: &mut ComposerController, text: &str) {
    controller.apply(ComposerEvent::SetText(text.to_owned()));
}
