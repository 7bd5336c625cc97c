use serde_json::Value;

/// One leaf of a parameter tree: the keys leading to it and the value found
/// there.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatRow<'a> {
    pub path: Vec<&'a str>,
    pub value: &'a Value,
}

impl<'a> FlatRow<'a> {
    fn leaf(value: &'a Value) -> Self {
        Self {
            path: Vec::new(),
            value,
        }
    }

    fn prefixed(mut self, key: &'a str) -> Self {
        self.path.insert(0, key);
        self
    }
}

/// Flattens a parameter tree into rows, one per leaf.
///
/// Object keys are visited in ascending order at every level so the output
/// never depends on the map implementation. Arrays are leaves, and a value that
/// isn't an object gives a single row with an empty path.
pub fn flatten(value: &Value) -> Vec<FlatRow<'_>> {
    match value {
        Value::Object(map) => {
            let mut entries = map.iter().collect::<Vec<_>>();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            entries
                .into_iter()
                .flat_map(|(key, nested)| {
                    flatten(nested)
                        .into_iter()
                        .map(move |row| row.prefixed(key.as_str()))
                })
                .collect()
        }
        Value::Array(_) | Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {
            vec![FlatRow::leaf(value)]
        }
    }
}
