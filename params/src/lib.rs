//! Query string and batch command encoding for the Bitrix24 REST API.
//!
//! Bitrix24 reads nested parameters the PHP way (`filter[STAGE_ID][]=NEW`) and
//! accepts several calls at once through `batch`, where every call is given as
//! a `method?query` command. This crate only builds those strings, sending
//! them is left to the HTTP client.

mod batch;
mod encode;
mod error;
mod flatten;
mod path;

pub use batch::{prepare_batch, prepare_batch_command, Call};
pub use encode::{encode, multidict_urlencode};
pub use error::{BatchError, BatchErrorKind, EncodeError, LookupError, ValueKind};
pub use flatten::{flatten, FlatRow};
pub use path::parametrize;

#[cfg(test)]
pub(crate) fn enable_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bitrix24_params=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
