//! Feature-gated tracing hooks.
//!
//! With the `tracing` feature the macros forward to the `tracing` crate.
//! Without it they expand to nothing, and span guards become [`NoopSpan`].

/// Opens an info-level span around a surface scan or selection pass.
///
/// Use as `let _guard = trace_span!("name", key = value).entered();`.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Records an info-level event with key/value fields.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

/// Records a debug-level event, for per-row progress inside a scan.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_debug;
pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in span guard used when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns the guard unchanged, matching `Span::entered`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
