use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use focus_keeper::cli::args::{Cli, Commands};
use focus_keeper::cli::commands;
use focus_keeper::config::{Config, Paths};
use focus_keeper::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file).context("loading configuration")?;

    logging::init(cli.verbose, &config.general.log_level);
    config.general.color.apply();
    log::debug!("data directory: {}", paths.root.display());

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Start(args) => {
            commands::start(args, &config, &paths, format).context("running sessions")?
        }
        Commands::History { limit } => commands::history(&paths, limit, format)?,
        Commands::Clear { force } => commands::clear(&paths, force, format)?,
        Commands::Config(args) => commands::config(&args.command, &config, &paths, format)?,
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
