use serde_json::{Map, Value};

pub fn enable_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "bitrix24_params=trace".into()))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

pub fn object(value: Value) -> anyhow::Result<Map<String, Value>> {
    match value {
        Value::Object(inner) => Ok(inner),
        other => anyhow::bail!("expected an object, got {other}"),
    }
}
