//! Sequential first-success loop over candidate backend origins.
//!
//! [`first_success`] tries each origin in order and returns the first `Ok`.
//! There is no back-off and no retry of the same origin: a failure simply
//! moves on to the next candidate.

use std::future::Future;

use crate::error::ClientError;

/// Runs `attempt` against each origin in order until one succeeds.
///
/// # Errors
///
/// - [`ClientError::NoOrigins`] if `origins` is empty.
/// - [`ClientError::AllOriginsFailed`] wrapping the last failure otherwise.
pub(crate) async fn first_success<T, F, Fut>(
    origins: &[String],
    mut attempt: F,
) -> Result<T, ClientError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut last = None;
    for origin in origins {
        match attempt(origin.clone()).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::warn!(origin = %origin, error = %err, "backend origin failed; trying next");
                last = Some(err);
            }
        }
    }

    match last {
        None => Err(ClientError::NoOrigins),
        Some(last) => Err(ClientError::AllOriginsFailed {
            attempts: origins.len(),
            last: Box::new(last),
        }),
    }
}
