//! Rendering seam
//!
//! A [`RenderAdapter`] receives a complete [`StorySnapshot`] after every state
//! change. [`StoryDriver`] pairs a [`DataStory`] with an adapter and renders
//! exactly once per mutating call, after all derived values are recomputed.

use crate::{
    scroll::ScrollEvent,
    story::{DataStory, StorySnapshot, ViewId},
};

/// Receives the story state after each change.
pub trait RenderAdapter {
    fn render(&mut self, snapshot: &StorySnapshot);
}

/// Keeps every rendered snapshot.
#[derive(Debug, Clone, Default)]
pub struct RecordingAdapter {
    pub frames: Vec<StorySnapshot>,
}

impl RecordingAdapter {
    #[must_use]
    pub fn last(&self) -> Option<&StorySnapshot> {
        self.frames.last()
    }
}

impl RenderAdapter for RecordingAdapter {
    fn render(&mut self, snapshot: &StorySnapshot) {
        self.frames.push(snapshot.clone());
    }
}

#[derive(Debug)]
pub struct StoryDriver<A> {
    story: DataStory,
    adapter: A,
}

impl<A> StoryDriver<A>
where
    A: RenderAdapter,
{
    /// Wraps `story` and renders its current state once.
    pub fn new(story: DataStory, adapter: A) -> Self {
        let mut driver = Self { story, adapter };
        driver.render();
        driver
    }

    #[must_use]
    pub fn story(&self) -> &DataStory {
        &self.story
    }

    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    pub fn set_filter(&mut self, value: Option<String>) {
        self.story.set_filter(value);
        self.render();
    }

    pub fn set_view_filter(&mut self, view: ViewId, value: Option<String>) {
        self.story.set_view_filter(view, value);
        self.render();
    }

    pub fn go_to_step(&mut self, index: i64) -> usize {
        let index = self.story.go_to_step(index);
        self.render();
        index
    }

    pub fn dispatch(&mut self, event: ScrollEvent) -> usize {
        let index = self.story.handle(event);
        self.render();
        index
    }

    /// Handles `events` in order, each one to completion, and returns how many were handled.
    pub fn run<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = ScrollEvent>,
    {
        let mut handled = 0;
        for event in events {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    fn render(&mut self) {
        let snapshot = self.story.snapshot();
        self.adapter.render(&snapshot);
    }
}
