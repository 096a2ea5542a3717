use listino_core::ListinoError;

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with `crate::core::with_request_deadline`.
/// On timeout the partial results are discarded and `RequestTimeout` is returned.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, ListinoError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Collapse the failures of a run where no provider succeeded into
/// `AllProvidersFailed`, flattening nested aggregates.
#[must_use]
pub fn collapse_errors(errors: Vec<ListinoError>) -> ListinoError {
    ListinoError::AllProvidersFailed(errors.into_iter().flat_map(ListinoError::flatten).collect())
}
