use std::path::PathBuf;

use ballotlens_story::{
    render::{RenderAdapter, StoryDriver},
    scroll::ScrollEvent,
    story::{BarsSnapshot, DataStory, StorySnapshot, ViewId},
};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Padding, Paragraph},
};

use crate::{
    command::story::widgets::{BarsDisplay, KeyBindingDisplay, ProfileDisplay},
    tui::App,
};

/// Keeps the most recently rendered snapshot for drawing.
#[derive(Debug, Default)]
pub(super) struct TerminalView {
    latest: Option<StorySnapshot>,
}

impl RenderAdapter for TerminalView {
    fn render(&mut self, snapshot: &StorySnapshot) {
        self.latest = Some(snapshot.clone());
    }
}

#[derive(Debug)]
pub(super) struct StoryApp {
    path: PathBuf,
    driver: StoryDriver<TerminalView>,
    filter_options: Vec<String>,
    should_exit: bool,
}

impl StoryApp {
    pub(super) fn new(path: PathBuf, story: DataStory) -> Self {
        let filter_options = story.filter_options();
        Self {
            path,
            driver: StoryDriver::new(story, TerminalView::default()),
            filter_options,
            should_exit: false,
        }
    }

    pub(super) fn go_to_step(&mut self, index: i64) {
        self.driver.go_to_step(index);
    }

    fn step_index(&self) -> i64 {
        // Step counts are tiny; saturate instead of failing.
        i64::try_from(self.driver.story().step_index()).unwrap_or(i64::MAX)
    }

    fn scroll_down(&mut self) {
        let next = self.step_index().saturating_add(1);
        self.driver.dispatch(ScrollEvent::forward(next));
    }

    fn scroll_up(&mut self) {
        let current = self.step_index();
        self.driver.dispatch(ScrollEvent::backward(current));
    }

    /// Selects the next filter value, wrapping through "no filter".
    fn cycle_filter(&mut self) {
        let current = self
            .driver
            .story()
            .view(ViewId::Primary)
            .filter()
            .selected()
            .and_then(|value| self.filter_options.iter().position(|o| o == value));
        let next = match current {
            None => self.filter_options.first(),
            Some(i) => self.filter_options.get(i + 1),
        };
        self.driver.set_filter(next.cloned());
    }

    fn snapshot(&self) -> Option<&StorySnapshot> {
        self.driver.adapter().latest.as_ref()
    }
}

const KEY_BINDINGS: &[(&[&str], &str)] = &[
    (&["j", "↓"], "Next"),
    (&["k", "↑"], "Previous"),
    (&["g", "Home"], "First"),
    (&["G", "End"], "Last"),
    (&["s"], "Cycle filter"),
    (&["S"], "Clear filter"),
    (&["q", "Esc"], "Quit"),
];

impl App for StoryApp {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
                KeyCode::Char('g') | KeyCode::Home => self.go_to_step(0),
                KeyCode::Char('G') | KeyCode::End => self.go_to_step(i64::MAX),
                KeyCode::Char('s') => self.cycle_filter(),
                KeyCode::Char('S') => self.driver.set_filter(None),
                KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let top_block = Block::bordered()
            .title(format!("Story: {}", self.path.display()))
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(1, 0));

        let Some(snapshot) = self.snapshot() else {
            let area = frame.area();
            let text_area = top_block
                .inner(area)
                .centered_vertically(Constraint::Length(1));
            let text = Text::from("NOTHING RENDERED YET").centered().style(Color::Red);
            frame.render_widget(top_block, area);
            frame.render_widget(text, text_area);
            return;
        };

        let [header_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        let step = &snapshot.step;
        let filter = snapshot
            .primary
            .profile
            .filter
            .as_deref()
            .unwrap_or("all");
        let header = Paragraph::new(vec![
            Line::from(format!(
                "Step {}/{}: {}",
                step.index + 1,
                step.count,
                step.caption
            )),
            Line::from(format!(
                "Filter: {filter} ({} values)",
                self.filter_options.len()
            ))
            .style(Style::new().fg(Color::DarkGray)),
        ])
        .block(top_block);
        frame.render_widget(header, header_area);

        let mut panes = vec![];
        if let Some(bars) = &snapshot.bars {
            panes.push(Pane::Bars(bars));
        }
        for view in [ViewId::Primary, ViewId::Secondary] {
            if snapshot.view(view).visible {
                panes.push(Pane::Profile(view));
            }
        }
        let areas = Layout::horizontal(vec![Constraint::Fill(1); panes.len().max(1)])
            .split(body_area);
        for (pane, area) in panes.into_iter().zip(areas.iter()) {
            match pane {
                Pane::Bars(bars) => frame.render_widget(BarsDisplay::new(bars), *area),
                Pane::Profile(view) => {
                    frame.render_widget(ProfileDisplay::new(snapshot, view), *area);
                }
            }
        }

        let help = KeyBindingDisplay::new(KEY_BINDINGS).block(Block::bordered());
        frame.render_widget(help, help_area);
    }
}

enum Pane<'a> {
    Bars(&'a BarsSnapshot),
    Profile(ViewId),
}
