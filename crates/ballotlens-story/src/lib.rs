//! Scroll-driven comparison of two outcome groups across numeric dimensions.
//!
//! A story loads a flat table of records once, splits it into a positive and a
//! negative group on an outcome field, and walks the reader through a fixed
//! sequence of steps. Each step shows an aggregate bar chart or one or two
//! profile views. A profile view summarizes every dimension per group and
//! orders dimensions by how far apart the group means are, relative to the
//! dimension's global range.
//!
//! # Pipeline
//!
//! ```text
//! records ─▶ normalize ─▶ FilterState ─▶ GroupSummaries ─▶ order ─▶ render
//!                │                                          ▲
//!                └─────────── global DimensionRanges ───────┘
//! ```
//!
//! # Modules
//!
//! - [`record`]: Raw records and JSON loading
//! - [`config`]: Fields, labels and the step sequence
//! - [`normalize`]: Typed records and global dimension ranges
//! - [`summary`]: Per-group quartiles and means
//! - [`ordering`]: Dimension ranking by normalized separation
//! - [`filter`]: Outer constraint plus an optional selected value
//! - [`profile`]: A filter together with its derived statistics
//! - [`bars`]: Aggregate positive/negative shares per category
//! - [`step`]: The step machine
//! - [`scroll`]: Scroll events and the step they enter
//! - [`story`]: The assembled story and its snapshot
//! - [`render`]: The render seam and the driver
//!
//! # Example
//!
//! ```
//! use ballotlens_story::{
//!     config::StoryConfig,
//!     record::read_records,
//!     render::{RecordingAdapter, StoryDriver},
//!     scroll::ScrollEvent,
//!     story::DataStory,
//! };
//!
//! let json = r#"[
//!     {"PARTY_R": 1, "STATE": "GA", "YES": 1, "PERCENT_RURAL": 10},
//!     {"PARTY_R": 1, "STATE": "GA", "YES": 0, "PERCENT_RURAL": 40}
//! ]"#;
//! let records = read_records(json.as_bytes()).unwrap();
//! let story = DataStory::new(&records, StoryConfig::default()).unwrap();
//!
//! let mut driver = StoryDriver::new(story, RecordingAdapter::default());
//! driver.run([ScrollEvent::forward(4)]);
//!
//! let frame = driver.adapter().last().unwrap();
//! assert_eq!(frame.step.name, "step4");
//! assert!(frame.primary.visible);
//! ```

pub mod bars;
pub mod config;
pub mod filter;
pub mod group;
pub mod normalize;
pub mod ordering;
pub mod overview;
pub mod profile;
pub mod record;
pub mod render;
pub mod scroll;
pub mod step;
pub mod story;
pub mod summary;
