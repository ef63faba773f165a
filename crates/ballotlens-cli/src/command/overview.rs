use std::path::{Path, PathBuf};

use ballotlens_story::{bars::BarRow, overview::Overview};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OverviewArg {
    /// Path to the records JSON file
    data_file: PathBuf,
    /// Include the aggregate bar rows in the report
    #[arg(long, default_value_t = false)]
    bars: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct OverviewReport<'a> {
    generated_at: DateTime<Utc>,
    data_file: &'a Path,
    coerced_values: usize,
    #[serde(flatten)]
    overview: &'a Overview,
    #[serde(skip_serializing_if = "Option::is_none")]
    bars: Option<&'a [BarRow]>,
}

pub(crate) fn run(arg: &OverviewArg, config: Option<&Path>) -> anyhow::Result<()> {
    let story = util::load_story(&arg.data_file, config)?;
    let overview = story.overview();

    for tally in &overview.series {
        eprintln!(
            "{:>12}: {:5} records, {:3}% {}, {:3}% {}",
            tally.label,
            tally.count,
            tally.positive_percent,
            story.config().group.positive.label,
            tally.negative_percent,
            story.config().group.negative.label,
        );
    }

    let report = OverviewReport {
        generated_at: Utc::now(),
        data_file: &arg.data_file,
        coerced_values: story.data().coerced,
        overview,
        bars: arg.bars.then_some(story.bars().rows.as_slice()),
    };
    Output::save_json(&report, arg.output.clone())?;
    Ok(())
}
