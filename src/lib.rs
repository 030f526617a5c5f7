//! cuesync keeps a declarative video-scene JSON document and its playback timeline in sync.
//!
//! The same raw text drives both directions:
//!
//! - [`flatten`] / [`flatten_text`] turn a scene into a time-ordered list of leaf
//!   [`TimelineElement`]s, each tagged with its structural [`ElementPath`]
//! - [`find_range_for_path`] and [`find_path_for_offset`] map between those paths and byte
//!   ranges of the text, tolerating text that is mid-edit
//! - [`compose_highlights`] renders the text as HTML with the active ranges marked
//!
//! [`SyncSnapshot`] bundles one text revision with its timeline so positional queries are
//! always answered against the revision they were computed from.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod highlight;
pub(crate) mod request;
pub(crate) mod scene;
pub(crate) mod source;
pub(crate) mod sync;
pub(crate) mod timeline;
pub(crate) mod timing;

pub use crate::foundation::core::{ByteRange, ElementPath};
pub use crate::foundation::error::{CueError, CueResult};

pub use crate::highlight::compose::{
    DEFAULT_HIGHLIGHT_CLASS, HighlightOptions, Mark, compose_highlights, compose_marks,
    escape_html,
};
pub use crate::request::envelope::{
    DEFAULT_OUTPUT_FORMAT, unwrap_render_request, wrap_render_request,
};
pub use crate::scene::model::{Element, ElementKind, Scene, Transition};
pub use crate::scene::normalize::to_snake_case_keys;
pub use crate::source::locate::{find_path_for_offset, find_range_for_path, range_for_path};
pub use crate::sync::snapshot::{SELECTED_CLASS, SyncSnapshot};
pub use crate::timeline::flatten::{TimelineElement, flatten, flatten_text};
pub use crate::timeline::query::{active_indices, index_of_path, total_duration};
pub use crate::timing::estimate::{default_duration, estimate_duration};
pub use crate::timing::literal::{TimeValue, parse_time, parse_time_str};
