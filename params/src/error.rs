use std::borrow::Cow;

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl ValueKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl From<&Value> for ValueKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while turning a parameter tree into a query string.
#[derive(Debug)]
pub enum EncodeError {
    /// The parameters were not an object.
    NotAMapping(ValueKind),
    /// A key path without any segment was given to [`crate::parametrize`].
    EmptyPath,
    Serialize(serde_json::Error),
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(inner) => Some(inner),
            Self::NotAMapping(_) | Self::EmptyPath => None,
        }
    }
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAMapping(kind) => {
                write!(f, "only objects are supported as parameters, got {kind}")
            }
            Self::EmptyPath => f.write_str("unable to build a parameter name from an empty path"),
            Self::Serialize(_) => f.write_str("unable to convert parameters into a value tree"),
        }
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Lookup that failed inside a call descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupError {
    Index { index: usize, len: usize },
    Key(&'static str),
}

impl std::error::Error for LookupError {}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index { index, len } => {
                write!(f, "index {index} out of range for array of length {len}")
            }
            Self::Key(key) => write!(f, "missing key {key:?}"),
        }
    }
}

#[derive(Debug)]
pub enum BatchErrorKind {
    UnsupportedShape(ValueKind),
    IncompletePair(LookupError),
    MissingKey(LookupError),
    InvalidMethod(ValueKind),
    Params(EncodeError),
}

/// A batch entry that couldn't be turned into a command.
///
/// The message always names the offending entry, the underlying fault is
/// available through [`std::error::Error::source`].
#[derive(Debug)]
pub struct BatchError {
    name: Cow<'static, str>,
    kind: BatchErrorKind,
}

impl BatchError {
    pub(crate) fn new(name: impl Into<Cow<'static, str>>, kind: BatchErrorKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn kind(&self) -> &BatchErrorKind {
        &self.kind
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            BatchErrorKind::IncompletePair(ref inner) | BatchErrorKind::MissingKey(ref inner) => {
                Some(inner)
            }
            BatchErrorKind::Params(ref inner) => Some(inner),
            BatchErrorKind::UnsupportedShape(_) | BatchErrorKind::InvalidMethod(_) => None,
        }
    }
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.name.as_ref();
        match self.kind {
            BatchErrorKind::UnsupportedShape(kind) => write!(
                f,
                "the {name:?} call must be a string, a [method, params] pair or a {{method, params}} object, got {kind}"
            ),
            BatchErrorKind::IncompletePair(_) => {
                write!(f, "the {name:?} call must be a pair of values")
            }
            BatchErrorKind::MissingKey(_) => {
                write!(f, "the {name:?} call has required keys: method, params")
            }
            BatchErrorKind::InvalidMethod(kind) => {
                write!(f, "the {name:?} call method must be a string, got {kind}")
            }
            BatchErrorKind::Params(_) => {
                write!(f, "the {name:?} call parameters couldn't be encoded")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn should_name_the_call_in_messages() {
        let err = BatchError::new("x", BatchErrorKind::UnsupportedShape(ValueKind::Number));
        assert_eq!(
            err.to_string(),
            "the \"x\" call must be a string, a [method, params] pair or a {method, params} object, got number"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn should_chain_lookup_error() {
        let err = BatchError::new(
            "x",
            BatchErrorKind::IncompletePair(LookupError::Index { index: 1, len: 1 }),
        );
        assert_eq!(err.to_string(), "the \"x\" call must be a pair of values");
        let source = err.source().unwrap();
        assert_eq!(
            source.to_string(),
            "index 1 out of range for array of length 1"
        );
    }

    #[test]
    fn should_describe_value_kind() {
        assert_eq!(ValueKind::from(&Value::Null), ValueKind::Null);
        assert_eq!(ValueKind::from(&serde_json::json!([1])).as_str(), "array");
        assert_eq!(
            EncodeError::NotAMapping(ValueKind::Array).to_string(),
            "only objects are supported as parameters, got array"
        );
    }
}
