// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Graustufe — batch grayscale converter.
//
// Entry point. Initialises logging, parses arguments, prepares the output
// folder, and runs either a conversion batch or a preview.

mod cli;
mod services;
mod state;

use std::io::Write;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use graustufe_core::error::Result;
use graustufe_image::OutputAllocator;

use cli::{Cli, Command, PreviewArgs};
use services::{batch, output_dir, reveal};
use state::AppState;

/// Exit status when nothing was given to convert.
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "Graustufe failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.settings.to_app_config()?;

    // The output folder exists before any input is looked at; failing to
    // create it ends the run.
    let dir = output_dir::resolve(&config);
    OutputAllocator::new(&dir, config.profile.suffix.clone()).ensure_dir()?;

    let mut state = AppState::new(config, dir);

    if let Some(Command::Preview(args)) = cli.command {
        return preview(&state, &args);
    }

    state.add_inputs(&cli.paths);
    if state.targets.is_empty() {
        eprintln!("No image files found. Pass image files or folders to convert.\n");
        Cli::command().write_help(&mut std::io::stderr())?;
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    tracing::info!(targets = state.targets.len(), "Starting batch");
    let stdout = std::io::stdout();
    batch::run_batch(&state, &mut stdout.lock())?;

    if state.config.open_output_dir {
        reveal::open_folder(&state.output_dir);
    }
    Ok(ExitCode::SUCCESS)
}

fn preview(state: &AppState, args: &PreviewArgs) -> Result<ExitCode> {
    let path = state
        .converter()
        .write_preview(&args.file, args.width, args.height)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Preview: {}", path.display())?;

    if state.config.open_output_dir {
        reveal::open_folder(&state.output_dir);
    }
    Ok(ExitCode::SUCCESS)
}
