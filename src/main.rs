use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use djrun::cli::CliArgs;
use djrun::config::Config;
use djrun::locate::{LocateOptions, locate};
use djrun::manage;

fn main() -> ExitCode {
    // Initialize tracing with env filter; logs go to stderr so forwarded
    // child output owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = CliArgs::parse();
    let config = Config::from_cli_and_file(&cli, cli.config.clone())?;

    let start = match &cli.chdir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };

    let options = LocateOptions::from_config(&config);
    let Some(root) = locate(&start, &options)? else {
        // Exhausting the search is a normal outcome, reported distinctly
        // from a real failure.
        eprintln!(
            "Couldn't find a Django project in '{}', its parents, or a '{}'-anchored subtree.",
            start.display(),
            config.marker
        );
        return Ok(ExitCode::from(1));
    };

    if cli.locate {
        println!("{}", root.display());
        return Ok(ExitCode::SUCCESS);
    }

    let status = manage::run(
        &root,
        &config.manage.command,
        &cli.args,
        config.manage.set_pythonpath,
    )?;
    match status.code() {
        Some(code) => {
            info!("'{}' exited with code {}", config.manage.command, code);
            Ok(ExitCode::from(code.clamp(0, 255) as u8))
        }
        None => {
            eprintln!("'{}' was terminated by a signal", config.manage.command);
            Ok(ExitCode::from(2))
        }
    }
}
