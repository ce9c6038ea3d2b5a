//! Which parts of an upstream body get converted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::convert::table::{convert, ConversionSelector, UnsupportedSelector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionScope {
    /// Convert the whole body as opaque text.
    #[default]
    Body,
    /// Convert only chat/completion content fields of a JSON body.
    ChatContent,
}

/// Apply `selector` to `body` within `scope`.
pub fn convert_body(
    body: &str,
    selector: &ConversionSelector,
    scope: ConversionScope,
) -> Result<String, UnsupportedSelector> {
    match scope {
        ConversionScope::Body => convert(body, selector),
        ConversionScope::ChatContent => match serde_json::from_str::<Value>(body) {
            Ok(mut json) => {
                convert_chat_fields(&mut json, selector)?;
                Ok(json.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upstream body is not JSON, converting as text");
                convert(body, selector)
            }
        },
    }
}

/// Rewrites `choices[*].message.content` and top-level `content` strings.
fn convert_chat_fields(
    json: &mut Value,
    selector: &ConversionSelector,
) -> Result<(), UnsupportedSelector> {
    if let Some(choices) = json.get_mut("choices").and_then(Value::as_array_mut) {
        for choice in choices {
            if let Some(content) = choice.pointer_mut("/message/content") {
                convert_string(content, selector)?;
            }
        }
    }
    if let Some(content) = json.get_mut("content") {
        convert_string(content, selector)?;
    }
    Ok(())
}

fn convert_string(value: &mut Value, selector: &ConversionSelector) -> Result<(), UnsupportedSelector> {
    if let Value::String(text) = value {
        *text = convert(text, selector)?;
    }
    Ok(())
}
