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

use chat_composer::error::AppError;
use chat_composer::fixtures::{self, Fixture, FixtureError};
use chat_composer::snapshot::{RecordMode, SnapshotError, SnapshotHarness};
use chat_composer::{CheckArgs, Cli, Command, RecordArgs, RenderArgs, RunArgs};
use clap::Parser;
use std::fs::OpenOptions;

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    match cli.command {
        None => run_composer(&RunArgs::default()),
        Some(Command::Run(ref args)) => run_composer(args),
        Some(Command::Render(ref args)) => render_fixture(args),
        Some(Command::Record(ref args)) => record_fixtures(args),
        Some(Command::Check(ref args)) => check_fixtures(args),
    }
}

fn run_composer(args: &RunArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut app = chat_composer::app::create_app(args);
        chat_composer::app::run_tui(&mut app).await
    })
}

fn fixture_error(err: FixtureError) -> anyhow::Error {
    let app_error = match &err {
        FixtureError::Unknown(name) => AppError::FixtureNotFound(name.clone()),
        FixtureError::Io { .. } | FixtureError::Parse { .. } => AppError::InvalidFixture(err.to_string()),
    };
    anyhow::Error::new(app_error).context(err.to_string())
}

fn render_fixture(args: &RenderArgs) -> anyhow::Result<()> {
    let mut fixture: Fixture = match (&args.file, &args.fixture) {
        (Some(path), _) => fixtures::load(path).map_err(fixture_error)?,
        (None, Some(name)) => fixtures::builtin(name).map_err(fixture_error)?,
        (None, None) => return Err(anyhow::anyhow!("pass a fixture name or --file")),
    };
    if let Some(width) = args.width {
        fixture.width = width;
    }
    if let Some(height) = args.height {
        fixture.height = height;
    }
    tracing::info!(fixture = %fixture.name, width = fixture.width, height = fixture.height, "rendering fixture");
    print!("{}", fixture.snapshot());
    Ok(())
}

fn record_fixtures(args: &RecordArgs) -> anyhow::Result<()> {
    let harness = SnapshotHarness::new(&args.dir).with_mode(RecordMode::All);
    for fixture in fixtures::all() {
        harness
            .verify_view(&fixture.name, fixture.view.as_ref(), fixture.width, fixture.height)
            .map_err(|err| anyhow::anyhow!("recording `{}` failed: {err}", fixture.name))?;
        println!("recorded {}", harness.path_for(&fixture.name)?.display());
    }
    Ok(())
}

fn check_fixtures(args: &CheckArgs) -> anyhow::Result<()> {
    let harness = SnapshotHarness::new(&args.dir).with_mode(RecordMode::Never);
    let mut failures = Vec::new();
    for fixture in fixtures::all() {
        match harness.verify_view(&fixture.name, fixture.view.as_ref(), fixture.width, fixture.height) {
            Ok(_) => println!("ok {}", fixture.name),
            Err(err @ (SnapshotError::Mismatch { .. } | SnapshotError::MissingBaseline { .. })) => {
                println!("FAILED {}", fixture.name);
                failures.push(err.to_string());
            }
            Err(err) => return Err(anyhow::anyhow!("checking `{}` failed: {err}", fixture.name)),
        }
    }
    if failures.is_empty() {
        return Ok(());
    }
    let count = failures.len();
    Err(anyhow::Error::new(AppError::SnapshotMismatch(failures.join("\n")))
        .context(format!("{count} snapshot(s) differ from their baselines")))
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        log_filter = %directives,
        log_append = cli.log_append,
        "tracing enabled"
    );

    Ok(())
}
