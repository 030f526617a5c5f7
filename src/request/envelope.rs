//! Render-request envelope around a scene document.

use serde_json::{Value, json};

use crate::foundation::error::{CueError, CueResult};

/// Output format used when the scene does not declare one.
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp4";

/// Wrap a scene as `{ "source": scene, "output_format": ... }`.
///
/// `output_format` is copied from the scene when it is a non-empty string, else
/// [`DEFAULT_OUTPUT_FORMAT`]. The scene is copied as is; run
/// [`to_snake_case_keys`](crate::to_snake_case_keys) first when the consumer expects
/// snake_case keys.
pub fn wrap_render_request(scene: &Value) -> Value {
    let format = scene
        .get("output_format")
        .and_then(Value::as_str)
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_OUTPUT_FORMAT);
    json!({
        "source": scene,
        "output_format": format,
    })
}

/// Extract the scene from render-request text.
///
/// Fails with [`CueError::Serde`] when the text is not JSON and with
/// [`CueError::Validation`] when `source` is missing, `null` or `false`.
#[tracing::instrument(skip(text), fields(len = text.len()))]
pub fn unwrap_render_request(text: &str) -> CueResult<Value> {
    let mut request: Value = serde_json::from_str(text)?;
    match request.get_mut("source").map(Value::take) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(CueError::validation(
            "render request is missing the `source` field",
        )),
        Some(scene) => Ok(scene),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/envelope.rs"]
mod tests;
