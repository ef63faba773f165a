use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use ballotlens_story::{
    render::{RenderAdapter, StoryDriver},
    scroll::ScrollEvent,
    story::StorySnapshot,
};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the records JSON file
    data_file: PathBuf,
    /// Step indices to enter, in order (comma-separated)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, conflicts_with = "events")]
    steps: Vec<i64>,
    /// Scroll events to replay (JSON array of `{"step_index", "direction"}`)
    #[arg(long)]
    events: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Frame<'a> {
    frame: usize,
    state: &'a StorySnapshot,
}

/// Writes every rendered snapshot as one line of JSON.
#[derive(Debug)]
struct JsonLinesAdapter {
    output: Output,
    frames: usize,
    error: Option<io::Error>,
}

impl JsonLinesAdapter {
    fn new(output: Output) -> Self {
        Self {
            output,
            frames: 0,
            error: None,
        }
    }

    fn finish(mut self) -> anyhow::Result<usize> {
        let path = self.output.display_path();
        if let Some(error) = self.error {
            return Err(error).with_context(|| format!("Failed to write frames to {path}"));
        }
        io::Write::flush(&mut self.output)
            .with_context(|| format!("Failed to flush output to {path}"))?;
        Ok(self.frames)
    }
}

impl RenderAdapter for JsonLinesAdapter {
    fn render(&mut self, snapshot: &StorySnapshot) {
        if self.error.is_some() {
            return;
        }
        let frame = Frame {
            frame: self.frames,
            state: snapshot,
        };
        match self.output.write_json_line(&frame) {
            Ok(()) => self.frames += 1,
            Err(error) => self.error = Some(error),
        }
    }
}

pub(crate) fn run(arg: &ReplayArg, config: Option<&Path>) -> anyhow::Result<()> {
    let story = util::load_story(&arg.data_file, config)?;
    let step_count = i64::try_from(story.step_count())?;

    let events: Vec<ScrollEvent> = if let Some(path) = &arg.events {
        util::read_json_file("scroll events", path)?
    } else if !arg.steps.is_empty() {
        arg.steps.iter().copied().map(ScrollEvent::forward).collect()
    } else {
        (0..step_count).map(ScrollEvent::forward).collect()
    };
    eprintln!("Replaying {} scroll events", events.len());

    let output = Output::from_output_path(arg.output.clone())?;
    let mut driver = StoryDriver::new(story, JsonLinesAdapter::new(output));
    driver.run(events);
    let frames = driver.into_adapter().finish()?;

    eprintln!("Wrote {frames} frames");
    Ok(())
}
