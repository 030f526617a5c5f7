use crate::scene::model::{Element, ElementKind};

/// Length assumed for video and audio clips without an explicit duration.
pub const MEDIA_DEFAULT_SECS: f64 = 8.0;
/// Length assumed for compositions that have nothing to derive a span from.
pub const COMPOSITION_DEFAULT_SECS: f64 = 6.0;
/// Length assumed for shapes.
pub const SHAPE_DEFAULT_SECS: f64 = 5.0;
/// Length assumed for text layers.
pub const TEXT_DEFAULT_SECS: f64 = 4.0;
/// Length assumed for images and any unrecognized type.
pub const FALLBACK_DEFAULT_SECS: f64 = 3.0;

/// Duration of `element` in seconds: the explicit `duration` when present, otherwise a
/// per-type default so an unfinished element still shows up on the timeline.
pub fn estimate_duration(element: &Element) -> f64 {
    match element.explicit_duration() {
        Some(d) => d,
        None => default_duration(element.kind.as_ref()),
    }
}

/// Per-type default length.
pub fn default_duration(kind: Option<&ElementKind>) -> f64 {
    match kind {
        Some(ElementKind::Video | ElementKind::Audio) => MEDIA_DEFAULT_SECS,
        Some(ElementKind::Composition) => COMPOSITION_DEFAULT_SECS,
        Some(ElementKind::Shape) => SHAPE_DEFAULT_SECS,
        Some(ElementKind::Text) => TEXT_DEFAULT_SECS,
        Some(ElementKind::Image | ElementKind::Other(_)) | None => FALLBACK_DEFAULT_SECS,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/estimate.rs"]
mod tests;
