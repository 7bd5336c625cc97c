use crate::error::EncodeError;

/// Renders a key path the way PHP reads nested parameters: `a[b][c]`.
pub fn parametrize<S: AsRef<str>>(segments: &[S]) -> Result<String, EncodeError> {
    let Some((head, tail)) = segments.split_first() else {
        return Err(EncodeError::EmptyPath);
    };
    let mut name = String::from(head.as_ref());
    for segment in tail {
        name.push('[');
        name.push_str(segment.as_ref());
        name.push(']');
    }
    Ok(name)
}
