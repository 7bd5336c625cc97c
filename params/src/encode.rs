use std::borrow::Cow;

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::error::{EncodeError, ValueKind};
use crate::flatten::flatten;
use crate::path::parametrize;

const SEQUENCE_MARKER: &str = "[]";

/// Everything but the RFC 3986 unreserved characters.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encodes a nested object into a query string understood by Bitrix24.
///
/// Nested keys are rendered as `a[b][c]`, arrays are repeated under a `name[]`
/// key, one pair per element. Anything else than an object is rejected.
///
/// Strings are sent as is and numbers as their JSON text. Booleans become
/// `true`/`false` and `null` an empty value.
///
/// ```
/// let query = bitrix24_params::multidict_urlencode(&serde_json::json!({
///     "fields": {"TITLE": "New deal"},
///     "id": 12,
/// }))
/// .unwrap();
/// assert_eq!(query, "fields%5BTITLE%5D=New+deal&id=12");
/// ```
#[tracing::instrument(level = "trace", skip_all)]
pub fn multidict_urlencode(params: &Value) -> Result<String, EncodeError> {
    if !params.is_object() {
        return Err(EncodeError::NotAMapping(ValueKind::from(params)));
    }

    // a repeated name keeps its first position and takes the latest value
    let mut entries = IndexMap::<String, &Value>::new();
    for row in flatten(params) {
        let mut name = parametrize(&row.path)?;
        if row.value.is_array() {
            name.push_str(SEQUENCE_MARKER);
        }
        entries.insert(name, row.value);
    }

    let mut pairs = Vec::<String>::with_capacity(entries.len());
    for (name, value) in entries.iter() {
        let name = quote_plus(name);
        match value {
            Value::Array(items) => {
                pairs.extend(
                    items
                        .iter()
                        .map(|item| format!("{name}={}", quote_plus(&render(item)))),
                );
            }
            other => pairs.push(format!("{name}={}", quote_plus(&render(other)))),
        }
    }
    tracing::trace!("encoding {} parameters", pairs.len());

    Ok(pairs.join("&"))
}

fn quote_plus(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Same as [`multidict_urlencode`] for any serializable type.
pub fn encode<T: serde::Serialize + ?Sized>(params: &T) -> Result<String, EncodeError> {
    let value = serde_json::to_value(params)?;
    multidict_urlencode(&value)
}

fn render(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(inner) => Cow::Borrowed(inner.as_str()),
        Value::Number(inner) => Cow::Owned(inner.to_string()),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Null => Cow::Borrowed(""),
        // only reachable for containers nested in an array
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}
