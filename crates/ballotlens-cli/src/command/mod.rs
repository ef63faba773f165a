use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use self::{overview::OverviewArg, profile::ProfileArg, replay::ReplayArg, story::StoryArg};

mod overview;
mod profile;
mod replay;
mod story;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Story configuration file (JSON); the built-in story is used if omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level; `RUST_LOG` takes precedence when set
    #[arg(long, global = true, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print record counts and group shares per series
    Overview(#[clap(flatten)] OverviewArg),
    /// Print the profile comparison for a filter value
    Profile(#[clap(flatten)] ProfileArg),
    /// Replay a sequence of scroll events and print every rendered state
    Replay(#[clap(flatten)] ReplayArg),
    /// Walk through the story interactively
    Story(#[clap(flatten)] StoryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    let config = args.config.as_deref();
    match args.mode {
        Mode::Overview(arg) => overview::run(&arg, config)?,
        Mode::Profile(arg) => profile::run(&arg, config)?,
        Mode::Replay(arg) => replay::run(&arg, config)?,
        Mode::Story(arg) => story::run(&arg, config)?,
    }
    Ok(())
}
