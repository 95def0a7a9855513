/// Creates a DEBUG-level child span only if the parent span is active.
///
/// Like operations run inside whatever span the caller is in (a view
/// handler, a session start). When that span is disabled this returns
/// `Span::none()` so background toggles and syncs cost nothing extra.
///
/// # Returns
/// An **un-entered** `Span` - use `.instrument()` for async work.
///
/// # Example
/// ```ignore
/// let span = child_span_debug!("like_sync", kind = %kind);
/// remote.select(user_id).instrument(span).await
/// ```
#[macro_export]
macro_rules! child_span_debug {
    ($span_name:literal) => {{
        if !::tracing::Span::current().is_disabled() {
            ::tracing::debug_span!($span_name)
        } else {
            ::tracing::Span::none()
        }
    }};
    ($span_name:literal, $($fields:tt)*) => {{
        if !::tracing::Span::current().is_disabled() {
            ::tracing::debug_span!($span_name, $($fields)*)
        } else {
            ::tracing::Span::none()
        }
    }};
}

/// Creates an INFO-level child span only if the parent span is active.
///
/// # See also
/// - [`child_span_debug!`]
#[macro_export]
macro_rules! child_span_info {
    ($span_name:literal) => {{
        if !::tracing::Span::current().is_disabled() {
            ::tracing::info_span!($span_name)
        } else {
            ::tracing::Span::none()
        }
    }};
    ($span_name:literal, $($fields:tt)*) => {{
        if !::tracing::Span::current().is_disabled() {
            ::tracing::info_span!($span_name, $($fields)*)
        } else {
            ::tracing::Span::none()
        }
    }};
}
