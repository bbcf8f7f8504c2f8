//! Cancellation support for suspension points.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::clients::errors::HttpError;

/// Races `future` against `cancel`.
///
/// When the token fires first, `future` is dropped before
/// [`HttpError::Cancelled`] is returned, so any connection it held goes back
/// to the transport. Without a token the future simply runs to completion.
///
/// # Errors
///
/// Returns [`HttpError::Cancelled`] if the token is cancelled first.
pub async fn run_cancellable<F, T>(cancel: Option<&CancellationToken>, future: F) -> Result<T, HttpError>
where
    F: Future<Output = T>,
{
    match cancel {
        None => Ok(future.await),
        Some(token) => {
            tokio::select! {
                biased;
                () = token.cancelled() => Err(HttpError::Cancelled),
                output = future => Ok(output),
            }
        }
    }
}
