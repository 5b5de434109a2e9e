//! Wait-for-all execution of independent probes.

use futures::future::BoxFuture;
use stencil_core::{Error, Result};

/// A probe that can be moved onto the runtime.
pub type BoxedProbe<T> = BoxFuture<'static, Result<T>>;

/// Runs every probe concurrently and collects each outcome in submission order.
///
/// Never short-circuits: a probe that errors or panics becomes an `Err`
/// entry and the remaining probes still run to completion.
pub async fn settle_all<T>(probes: Vec<BoxedProbe<T>>) -> Vec<Result<T>>
where
    T: Send + 'static,
{
    let handles: Vec<_> = probes.into_iter().map(tokio::spawn).collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(match handle.await {
            Ok(outcome) => outcome,
            Err(join_error) => Err(Error::Task(join_error.to_string())),
        });
    }
    outcomes
}
