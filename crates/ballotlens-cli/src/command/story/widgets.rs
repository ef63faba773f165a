use ballotlens_stats::extent::Extent;
use ballotlens_story::{
    group::GroupKey,
    story::{BarsSnapshot, StorySnapshot, ViewId},
    summary::DistributionSummary,
};
use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BlockExt, Cell, Paragraph, Row, Table, Widget},
};

const POSITIVE_COLOR: Color = Color::Green;
const NEGATIVE_COLOR: Color = Color::Red;
const DIMMED_STYLE: Style = Style::new().fg(Color::DarkGray);
const HEADER_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const TRACK_WIDTH: usize = 21;

/// Stacked positive/negative share bars.
#[derive(Debug)]
pub struct BarsDisplay<'a> {
    bars: &'a BarsSnapshot,
}

impl<'a> BarsDisplay<'a> {
    pub fn new(bars: &'a BarsSnapshot) -> Self {
        Self { bars }
    }
}

impl Widget for BarsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .title("Share by state and party")
            .merge_borders(MergeStrategy::Exact);
        let inner = block.inner(area);

        let labels = self
            .bars
            .bars
            .iter()
            .map(|bar| {
                let category = bar.row.category.as_deref().unwrap_or("Total");
                format!("{category:>5} {}", bar.series_label)
            })
            .collect::<Vec<_>>();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let bar_width = usize::from(inner.width).saturating_sub(label_width + 12);

        let lines = self
            .bars
            .bars
            .iter()
            .zip(&labels)
            .map(|(bar, label)| {
                let (label_style, positive_style, negative_style) = if bar.opacity >= 1.0 {
                    (
                        Style::new(),
                        Style::new().fg(POSITIVE_COLOR),
                        Style::new().fg(NEGATIVE_COLOR),
                    )
                } else {
                    (DIMMED_STYLE, DIMMED_STYLE, DIMMED_STYLE)
                };
                let filled = share_width(bar.row.positive_percent, bar_width);
                Line::from(vec![
                    Span::styled(format!("{label:<label_width$} "), label_style),
                    Span::styled("█".repeat(filled), positive_style),
                    Span::styled("█".repeat(bar_width - filled), negative_style),
                    Span::styled(format!(" {:5.1}%", bar.row.positive_percent), positive_style),
                ])
            })
            .collect::<Vec<_>>();

        Widget::render(block, area, buf);
        Widget::render(Paragraph::new(lines), inner, buf);
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn share_width(percent: f64, width: usize) -> usize {
    let cells = (percent.clamp(0.0, 100.0) / 100.0 * width as f64).round() as usize;
    cells.min(width)
}

/// Places both group means on a fixed-width track spanning the global range.
///
/// `+` marks the positive mean, `-` the negative mean and `*` both.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn mean_track(range: &Extent, positive: f64, negative: f64) -> String {
    let last = TRACK_WIDTH - 1;
    let slot = |value: f64| {
        let position = range.normalize_delta(value - range.min).clamp(0.0, 1.0);
        ((position * last as f64).round() as usize).min(last)
    };
    let mut track = vec!['·'; TRACK_WIDTH];
    let (p, n) = (slot(positive), slot(negative));
    track[p] = '+';
    track[n] = if p == n { '*' } else { '-' };
    track.into_iter().collect()
}

/// One profile view as a table, dimensions in display order.
#[derive(Debug)]
pub struct ProfileDisplay<'a> {
    snapshot: &'a StorySnapshot,
    view: ViewId,
}

impl<'a> ProfileDisplay<'a> {
    pub fn new(snapshot: &'a StorySnapshot, view: ViewId) -> Self {
        Self { snapshot, view }
    }
}

fn summary_cell(summary: &DistributionSummary, color: Color) -> Cell<'static> {
    Cell::from(format!(
        "{:.0}/{:.0}/{:.0} μ{:.0}",
        summary.first_quartile, summary.median, summary.third_quartile, summary.mean
    ))
    .style(Style::new().fg(color))
}

impl Widget for ProfileDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let profile = &self.snapshot.view(self.view).profile;
        let groups = &self.snapshot.groups;
        let counts = &profile.summaries.counts;

        let title = format!(
            "{} profile: {} ({} {}, {} {})",
            self.view,
            profile.filter.as_deref().unwrap_or("all"),
            counts.positive,
            groups.positive.label,
            counts.negative,
            groups.negative.label,
        );
        let block = Block::bordered()
            .title(title)
            .merge_borders(MergeStrategy::Exact);

        let header = Row::new(vec![
            Cell::from("Dimension"),
            Cell::from(format!("{} q1/med/q3", groups.positive.label)),
            Cell::from(format!("{} q1/med/q3", groups.negative.label)),
            Cell::from("Range"),
            Cell::from("Sep"),
        ])
        .style(HEADER_STYLE);

        let rows = profile.order.iter().map(|sep| {
            let dimension = self.snapshot.dimension(sep.dimension);
            let positive = profile.summaries.get(GroupKey::Positive, sep.dimension);
            let negative = profile.summaries.get(GroupKey::Negative, sep.dimension);
            let range = self.snapshot.ranges.get(sep.dimension);
            Row::new(vec![
                Cell::from(dimension.label.clone()),
                summary_cell(positive, POSITIVE_COLOR),
                summary_cell(negative, NEGATIVE_COLOR),
                Cell::from(mean_track(range, positive.mean, negative.mean)),
                Cell::from(format!("{:.2}", sep.normalized)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Length(22),
                Constraint::Length(22),
                Constraint::Length(u16::try_from(TRACK_WIDTH).unwrap_or(u16::MAX)),
                Constraint::Length(5),
            ],
        )
        .header(header)
        .block(block);

        Widget::render(table, area, buf);
    }
}

pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
    block: Option<Block<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self {
            bindings,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut spans = vec![];
        for (i, (keys, desc)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            spans.push(Span::styled(keys.join("/"), KEY_STYLE));
            spans.push(Span::from(" "));
            spans.push(Span::raw(desc));
        }

        Line::from(spans).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_width() {
        assert_eq!(share_width(0.0, 40), 0);
        assert_eq!(share_width(50.0, 40), 20);
        assert_eq!(share_width(100.0, 40), 40);
        assert_eq!(share_width(120.0, 40), 40);
        assert_eq!(share_width(50.0, 0), 0);
    }

    #[test]
    fn test_mean_track() {
        let range = Extent {
            min: 0.0,
            max: 100.0,
        };
        let track = mean_track(&range, 0.0, 100.0).chars().collect::<Vec<_>>();
        assert_eq!(track.len(), TRACK_WIDTH);
        assert_eq!(track[0], '+');
        assert_eq!(track[TRACK_WIDTH - 1], '-');

        let track = mean_track(&range, 50.0, 50.0);
        assert_eq!(track.chars().nth(TRACK_WIDTH / 2), Some('*'));

        // Zero span puts both means at the start.
        let flat = Extent { min: 5.0, max: 5.0 };
        assert!(mean_track(&flat, 5.0, 5.0).starts_with('*'));
    }
}
