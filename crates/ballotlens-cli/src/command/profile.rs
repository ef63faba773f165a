use std::path::{Path, PathBuf};

use ballotlens_stats::extent::Extent;
use ballotlens_story::{
    config::DimensionSpec,
    group::GroupKey,
    story::ViewId,
    summary::{DistributionSummary, PartitionCounts},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProfileArg {
    /// Path to the records JSON file
    data_file: PathBuf,
    /// Restrict the profile to one value of the filter field (e.g. a state)
    #[arg(long)]
    filter: Option<String>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ProfileReport<'a> {
    generated_at: DateTime<Utc>,
    data_file: &'a Path,
    filter_field: &'a str,
    filter: Option<&'a str>,
    counts: PartitionCounts,
    /// Dimensions by ascending separation
    dimensions: Vec<DimensionReport<'a>>,
}

#[derive(Debug, Serialize)]
struct DimensionReport<'a> {
    #[serde(flatten)]
    dimension: &'a DimensionSpec,
    global_range: Extent,
    axis_domain: Extent,
    raw_difference: f64,
    separation: f64,
    positive: DistributionSummary,
    negative: DistributionSummary,
}

pub(crate) fn run(arg: &ProfileArg, config: Option<&Path>) -> anyhow::Result<()> {
    let mut story = util::load_story(&arg.data_file, config)?;

    if let Some(value) = &arg.filter
        && !story.filter_options().contains(value)
    {
        eprintln!(
            "Warning: no record has {} = {value}",
            story.config().filter_field
        );
    }
    story.set_filter(arg.filter.clone());

    let snapshot = story.view(ViewId::Primary).snapshot();
    let dimensions = snapshot
        .order
        .iter()
        .map(|sep| DimensionReport {
            dimension: &story.config().dimensions[sep.dimension.0],
            global_range: *story.range(sep.dimension),
            axis_domain: snapshot.axis_domains[sep.dimension.0],
            raw_difference: sep.raw_difference,
            separation: sep.normalized,
            positive: *snapshot.summaries.get(GroupKey::Positive, sep.dimension),
            negative: *snapshot.summaries.get(GroupKey::Negative, sep.dimension),
        })
        .collect::<Vec<_>>();

    eprintln!(
        "Profile of {} records ({} {}, {} {})",
        snapshot.summaries.counts.total(),
        snapshot.summaries.counts.positive,
        story.config().group.positive.label,
        snapshot.summaries.counts.negative,
        story.config().group.negative.label,
    );
    for report in &dimensions {
        eprintln!(
            "{:>45}: separation {:.3}",
            report.dimension.label, report.separation
        );
    }

    let report = ProfileReport {
        generated_at: Utc::now(),
        data_file: &arg.data_file,
        filter_field: &story.config().filter_field,
        filter: arg.filter.as_deref(),
        counts: snapshot.summaries.counts,
        dimensions,
    };
    Output::save_json(&report, arg.output.clone())?;
    Ok(())
}
