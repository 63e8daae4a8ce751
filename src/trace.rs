//! Debug-level instrumentation that disappears without the `tracing` feature.
//!
//! Both macros take `key = value` fields. The no-op forms still evaluate the
//! values so call sites compile the same way under either configuration.

/// Enters a span that stays open until the end of the enclosing block.
#[cfg(feature = "tracing")]
macro_rules! enter_span {
    ($name:literal $(, $key:ident = $value:expr)* $(,)?) => {
        let _entered = tracing::debug_span!($name $(, $key = $value)*).entered();
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! enter_span {
    ($name:literal $(, $key:ident = $value:expr)* $(,)?) => {
        let _ = ($($value,)*);
    };
}

/// Records result sizes inside the current span.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:literal $(, $key:ident = $value:expr)+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:literal $(, $key:ident = $value:expr)+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use enter_span;
pub(crate) use trace_event;
