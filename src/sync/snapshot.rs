use crate::{
    foundation::core::ByteRange,
    highlight::compose::{HighlightOptions, Mark, compose_marks},
    source::locate::{find_path_for_offset, range_for_path},
    timeline::{
        flatten::{TimelineElement, flatten_text},
        query::{active_indices, index_of_path, total_duration},
    },
};

/// Class of the mark drawn for the selected element in [`SyncSnapshot::highlight_at`].
pub const SELECTED_CLASS: &str = "timeline-selected";

#[derive(Clone, Debug)]
/// One text revision together with the timeline flattened from it.
///
/// Paths and byte offsets are positional, so every query is answered against the revision
/// the snapshot owns. Build a new snapshot after each edit.
pub struct SyncSnapshot {
    text: String,
    timeline: Vec<TimelineElement>,
}

impl SyncSnapshot {
    /// Flatten `text`. Unparseable text gives an empty timeline.
    #[tracing::instrument(skip(text))]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let timeline = flatten_text(&text);
        Self { text, timeline }
    }

    /// Source text of this revision.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Flattened timeline of this revision.
    pub fn timeline(&self) -> &[TimelineElement] {
        &self.timeline
    }

    /// End of the last element in seconds.
    pub fn total_duration(&self) -> f64 {
        total_duration(&self.timeline)
    }

    /// Timeline index of the leaf under the caret at byte `offset`.
    ///
    /// `None` when the caret is outside every leaf, including the case where it sits on a
    /// composition's own attributes.
    pub fn index_at_offset(&self, offset: usize) -> Option<usize> {
        let path = find_path_for_offset(&self.text, offset)?;
        index_of_path(&self.timeline, &path)
    }

    /// Byte range of the object behind timeline entry `index`.
    pub fn range_for_index(&self, index: usize) -> Option<ByteRange> {
        let element = self.timeline.get(index)?;
        range_for_path(&self.text, &element.path)
    }

    /// Timeline indices playing at `time`.
    pub fn active_indices(&self, time: f64) -> Vec<usize> {
        active_indices(&self.timeline, time)
    }

    /// Byte ranges of the elements playing at `time`, in timeline order.
    pub fn active_ranges(&self, time: f64) -> Vec<ByteRange> {
        self.active_indices(time)
            .into_iter()
            .filter_map(|i| self.range_for_index(i))
            .collect()
    }

    /// HTML of the text with the elements playing at `time` highlighted.
    ///
    /// `selected` is drawn with [`SELECTED_CLASS`] and wins over an active mark on the
    /// same object.
    pub fn highlight_at(
        &self,
        time: f64,
        selected: Option<usize>,
        options: &HighlightOptions,
    ) -> String {
        let mut marks = Vec::new();
        if let Some(range) = selected.and_then(|i| self.range_for_index(i)) {
            marks.push(Mark::with_class(range, SELECTED_CLASS));
        }
        marks.extend(self.active_ranges(time).into_iter().map(Mark::new));
        tracing::debug!(time, marks = marks.len(), "composing highlight");
        compose_marks(&self.text, &marks, options)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/snapshot.rs"]
mod tests;
