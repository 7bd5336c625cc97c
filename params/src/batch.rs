use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::encode::multidict_urlencode;
use crate::error::{BatchError, BatchErrorKind, LookupError, ValueKind};

const METHOD_KEY: &str = "method";
const PARAMS_KEY: &str = "params";

/// A single call of a batch request.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    /// Command used as is, like `"user.current"` or `"crm.deal.get?id=1"`.
    Command(String),
    Method { method: String, params: Value },
}

impl From<&str> for Call {
    fn from(value: &str) -> Self {
        Self::Command(value.to_string())
    }
}

impl From<String> for Call {
    fn from(value: String) -> Self {
        Self::Command(value)
    }
}

impl Call {
    pub fn method(method: impl Into<String>, params: Value) -> Self {
        Self::Method {
            method: method.into(),
            params,
        }
    }

    /// Reads a call descriptor: a string, a `[method, params]` array or a
    /// `{"method": ..., "params": ...}` object.
    pub fn from_value(name: &str, value: &Value) -> Result<Self, BatchError> {
        let (method, params) = match value {
            Value::String(command) => return Ok(Self::Command(command.clone())),
            Value::Array(items) => {
                let method = lookup_index(items, 0)
                    .map_err(|err| failure(name, BatchErrorKind::IncompletePair(err)))?;
                let params = lookup_index(items, 1)
                    .map_err(|err| failure(name, BatchErrorKind::IncompletePair(err)))?;
                (method, params)
            }
            Value::Object(map) => {
                let method = lookup_key(map, METHOD_KEY)
                    .map_err(|err| failure(name, BatchErrorKind::MissingKey(err)))?;
                let params = lookup_key(map, PARAMS_KEY)
                    .map_err(|err| failure(name, BatchErrorKind::MissingKey(err)))?;
                (method, params)
            }
            Value::Number(_) | Value::Bool(_) | Value::Null => {
                return Err(failure(
                    name,
                    BatchErrorKind::UnsupportedShape(ValueKind::from(value)),
                ));
            }
        };
        match method {
            Value::String(method) => Ok(Self::method(method.as_str(), params.clone())),
            other => Err(failure(
                name,
                BatchErrorKind::InvalidMethod(ValueKind::from(other)),
            )),
        }
    }

    /// Builds the `method?query` command expected in the `cmd` field of a
    /// batch request.
    pub fn to_command(&self, name: &str) -> Result<String, BatchError> {
        match self {
            Self::Command(command) => Ok(command.clone()),
            Self::Method { method, params } => {
                let query = multidict_urlencode(params)
                    .map_err(|err| failure(name, BatchErrorKind::Params(err)))?;
                Ok(format!("{method}?{query}"))
            }
        }
    }
}

fn failure(name: &str, kind: BatchErrorKind) -> BatchError {
    tracing::debug!(call = name, "rejecting batch call");
    BatchError::new(Cow::Owned(name.to_string()), kind)
}

fn lookup_index(items: &[Value], index: usize) -> Result<&Value, LookupError> {
    items.get(index).ok_or(LookupError::Index {
        index,
        len: items.len(),
    })
}

fn lookup_key<'a>(map: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, LookupError> {
    map.get(key).ok_or(LookupError::Key(key))
}

/// Turns named call descriptors into batch commands, keeping the input order.
///
/// The first invalid entry aborts the whole batch.
#[tracing::instrument(level = "trace", skip_all)]
pub fn prepare_batch_command(calls: &Map<String, Value>) -> Result<Map<String, Value>, BatchError> {
    let mut commands = Map::with_capacity(calls.len());
    for (name, descriptor) in calls.iter() {
        tracing::trace!(call = name.as_str(), "preparing batch call");
        let command = Call::from_value(name, descriptor)?.to_command(name)?;
        commands.insert(name.clone(), Value::String(command));
    }
    Ok(commands)
}

/// Same as [`prepare_batch_command`] for calls built in code.
#[tracing::instrument(level = "trace", skip_all)]
pub fn prepare_batch<K, I>(calls: I) -> Result<Map<String, Value>, BatchError>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Call)>,
{
    let mut commands = Map::new();
    for (name, call) in calls {
        let name = name.into();
        tracing::trace!(call = name.as_str(), "preparing batch call");
        let command = call.to_command(&name)?;
        commands.insert(name, Value::String(command));
    }
    Ok(commands)
}
