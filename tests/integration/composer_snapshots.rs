// =====
// TESTS: 14
// =====
//
// Golden snapshot tests for the composer views.
// Each built-in fixture is rendered and compared with its baseline under
// tests/snapshots. Set CHAT_COMPOSER_RECORD=all to rewrite the baselines.

use chat_composer::app::{ComposerConfig, ComposerState};
use chat_composer::chat::ChatSession;
use chat_composer::fixtures::{self, FixtureFile, ViewKind};
use chat_composer::snapshot::{RecordMode, Snapshot, SnapshotError, SnapshotHarness, SnapshotOutcome};
use chat_composer::ui::composer::MessageComposerView;
use chat_composer::ui::factory::DefaultViewFactory;
use pretty_assertions::assert_eq;
use ratatui::layout::Position;

use crate::helpers::snapshot_harness;

fn assert_builtin(name: &str) {
    let fixture = fixtures::builtin(name).unwrap();
    snapshot_harness().assert_view(name, fixture.view.as_ref(), fixture.width, fixture.height);
}

// --- Golden baselines ---

#[test]
fn message_composer() {
    assert_builtin("message_composer");
}

#[test]
fn composer_input_slow_mode() {
    assert_builtin("composer_input_slow_mode");
}

#[test]
fn trailing_composer() {
    assert_builtin("trailing_composer");
}

#[test]
fn trailing_composer_slow_mode() {
    assert_builtin("trailing_composer_slow_mode");
}

#[test]
fn input_text_view() {
    assert_builtin("input_text_view");
}

#[test]
fn composer_text_input_view() {
    assert_builtin("composer_text_input_view");
}

#[test]
fn composer_input_attachments() {
    assert_builtin("composer_input_attachments");
}

#[test]
fn composer_input_quoted() {
    assert_builtin("composer_input_quoted");
}

// --- Baseline hygiene ---

#[test]
fn every_builtin_fixture_has_a_baseline() {
    let harness = snapshot_harness();
    for name in fixtures::builtin_names() {
        let path = harness.path_for(name).unwrap();
        assert!(path.is_file(), "missing baseline {}", path.display());
    }
}

#[test]
fn rendering_is_deterministic() {
    for fixture in fixtures::all() {
        assert_eq!(fixture.snapshot(), fixture.snapshot(), "{} changed between renders", fixture.name);
    }
}

// --- Behaviour visible in snapshots ---

#[test]
fn cursor_follows_selected_range_location() {
    let session = ChatSession::test_default();
    let capture = |location: Option<usize>| {
        let config = ComposerConfig {
            text: "hello".to_owned(),
            selected_range_location: location,
            ..ComposerConfig::default()
        };
        let view = MessageComposerView::new(
            DefaultViewFactory::shared(),
            &session,
            &ComposerState::from_config(&config),
        );
        Snapshot::capture(&view, 40, 3)
    };
    let at_end = capture(None);
    let moved = capture(Some(2));
    assert_eq!(at_end.cursor(), Some(Position::new(10, 1)));
    assert_eq!(moved.cursor(), Some(Position::new(7, 1)));
    assert_eq!(moved.rows(), at_end.rows());
    assert!(moved.rows()[1].starts_with(" + │ hello "));
}

#[test]
fn slow_mode_composer_has_no_cursor() {
    let file = FixtureFile::new(ViewKind::MessageComposer)
        .with_composer(ComposerConfig { cooldown_secs: 15, ..ComposerConfig::default() });
    let snap = file.build("slow").snapshot();
    assert_eq!(snap.cursor(), None);
    assert!(snap.rows()[1].contains("Slow mode ON"));
    assert!(snap.rows()[1].ends_with("│ 15  │"));
}

#[test]
fn changed_rendering_is_reported_with_pending_file() {
    let dir = tempfile::tempdir().unwrap();
    let harness = SnapshotHarness::new(dir.path()).with_mode(RecordMode::Missing);
    let before = fixtures::builtin("trailing_composer").unwrap().snapshot();
    let after = fixtures::builtin("trailing_composer_slow_mode").unwrap().snapshot();

    assert_eq!(harness.verify("send", &before).unwrap(), SnapshotOutcome::Recorded);
    assert_eq!(harness.verify("send", &before).unwrap(), SnapshotOutcome::Matched);

    let err = harness.verify("send", &after).unwrap_err();
    assert!(matches!(err, SnapshotError::Mismatch { .. }));
    let pending = std::fs::read_to_string(harness.pending_path_for("send").unwrap()).unwrap();
    assert_eq!(pending, after.to_string());
}

#[test]
fn never_mode_refuses_to_create_baselines() {
    let dir = tempfile::tempdir().unwrap();
    let harness = SnapshotHarness::new(dir.path()).with_mode(RecordMode::Never);
    let snap = fixtures::builtin("trailing_composer").unwrap().snapshot();
    assert!(matches!(harness.verify("fresh", &snap), Err(SnapshotError::MissingBaseline { .. })));
    assert!(!harness.path_for("fresh").unwrap().exists());
}
