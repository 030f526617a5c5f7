use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{
    foundation::error::CueResult,
    timing::literal::{TimeValue, parse_time},
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// Root scene document.
///
/// Only `elements` is interpreted. Every other top-level key (`width`, `height`,
/// `output_format`, ...) is kept verbatim in [`Scene::extra`].
pub struct Scene {
    /// Top-level elements in document order.
    #[serde(default, deserialize_with = "lenient_element_list")]
    pub elements: Vec<Element>,
    /// Remaining top-level keys.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Scene {
    /// Strictly parse scene text.
    pub fn from_json_str(s: &str) -> CueResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Strictly convert an already parsed JSON value.
    pub fn from_value(value: Value) -> CueResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Declared `output_format`, if any.
    pub fn output_format(&self) -> Option<&str> {
        self.extra.get("output_format").and_then(Value::as_str)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// One node of the scene graph.
///
/// Attributes the timeline does not use are ignored. Descriptive fields accept numbers and
/// booleans as well as strings so that half-typed documents still parse.
pub struct Element {
    /// Element type tag.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<ElementKind>,
    /// Track lane within the parent scope (1-based).
    #[serde(
        default,
        deserialize_with = "lenient_track",
        skip_serializing_if = "Option::is_none"
    )]
    pub track: Option<u32>,
    /// Explicit start, local to the parent scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeValue>,
    /// Explicit length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimeValue>,
    /// Transition into this element from its track predecessor.
    #[serde(
        default,
        deserialize_with = "lenient_transition",
        skip_serializing_if = "Option::is_none"
    )]
    pub transition: Option<Transition>,
    /// Nested elements (only meaningful for compositions).
    #[serde(
        default,
        deserialize_with = "lenient_elements",
        skip_serializing_if = "Option::is_none"
    )]
    pub elements: Option<Vec<Element>>,
    /// Caller-assigned identifier.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Display name.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Text content for text elements.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    /// Media source URL.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
}

impl Element {
    /// Element of the given kind with every other attribute unset.
    pub fn of_kind(kind: ElementKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Type tag as written, `"unknown"` when absent.
    pub fn kind_name(&self) -> &str {
        self.kind.as_ref().map_or("unknown", ElementKind::as_str)
    }

    /// True for `composition` elements.
    pub fn is_composition(&self) -> bool {
        matches!(self.kind, Some(ElementKind::Composition))
    }

    /// Track lane, defaulting to 1.
    pub fn effective_track(&self) -> u32 {
        self.track.unwrap_or(1)
    }

    /// Nested elements of a composition; `None` for every other kind.
    pub fn children(&self) -> Option<&[Element]> {
        if !self.is_composition() {
            return None;
        }
        self.elements.as_deref()
    }

    /// Explicit start in seconds.
    pub fn start_time(&self) -> Option<f64> {
        self.time.as_ref().map(parse_time)
    }

    /// Explicit duration in seconds.
    pub fn explicit_duration(&self) -> Option<f64> {
        self.duration.as_ref().map(parse_time)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// Transition settings attached to an element.
pub struct Transition {
    /// Overlap with the predecessor; one second when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimeValue>,
    /// Transition style (`fade`, `wipe`, ...). Not used for timing.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

impl Transition {
    /// Overlap length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_ref().map_or(1.0, parse_time)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Element type vocabulary.
pub enum ElementKind {
    /// Text layer.
    Text,
    /// Still image.
    Image,
    /// Video clip.
    Video,
    /// Audio clip.
    Audio,
    /// Vector shape.
    Shape,
    /// Container with its own nested track scope.
    Composition,
    /// Any other tag, kept verbatim.
    Other(String),
}

impl ElementKind {
    /// Canonical tag string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Shape => "shape",
            Self::Composition => "composition",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for ElementKind {
    fn from(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            "shape" => Self::Shape,
            "composition" => Self::Composition,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Object entries of an `elements` array. Other entries are dropped, so indices count
/// objects only and agree with the source scanner. Anything but an array is `None`.
fn element_list(value: Value) -> Option<Vec<Element>> {
    let Value::Array(items) = value else {
        return None;
    };
    Some(
        items
            .into_iter()
            .filter(Value::is_object)
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
    )
}

fn lenient_elements<'de, D>(deserializer: D) -> Result<Option<Vec<Element>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(element_list))
}

fn lenient_element_list<'de, D>(deserializer: D) -> Result<Vec<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_elements(deserializer)?.unwrap_or_default())
}

fn value_to_string(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_to_string))
}

fn lenient_kind<'de, D>(deserializer: D) -> Result<Option<ElementKind>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.map(|s| ElementKind::from(s.as_str())))
}

fn lenient_track<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let track = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(track.filter(|t| *t > 0))
}

fn lenient_transition<'de, D>(deserializer: D) -> Result<Option<Transition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(v @ Value::Object(_)) => Some(serde_json::from_value(v).unwrap_or_default()),
        // a bare style name still means "transition with the default overlap"
        Some(_) => Some(Transition::default()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
