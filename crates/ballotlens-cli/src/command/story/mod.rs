use std::path::{Path, PathBuf};

use crate::{command::story::app::StoryApp, tui::Tui, util};

mod app;
mod widgets;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StoryArg {
    /// Path to the records JSON file
    data_file: PathBuf,
    /// Step to start at
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    step: i64,
}

pub(crate) fn run(arg: &StoryArg, config: Option<&Path>) -> anyhow::Result<()> {
    let StoryArg { data_file, step } = arg;

    let story = util::load_story(data_file, config)?;
    eprintln!(
        "Starting story with {} steps over {} records",
        story.step_count(),
        story.data().records.len()
    );

    let mut app = StoryApp::new(data_file.clone(), story);
    app.go_to_step(*step);
    Tui::new().run(&mut app)?;

    Ok(())
}
