//! Call-site macros
//!
//! Each macro has two forms: one that writes through the process-wide marker
//! and a `marker: <expr>,` form that writes through an explicit
//! [`TraceMarker`](crate::TraceMarker).
//!
//! ```no_run
//! use tracemark::{mark, trace_entry, trace_exit, trace_log};
//!
//! fn scan_banks(count: u32) -> i32 {
//!     trace_entry!();
//!     trace_log!("scanning {} banks", count);
//!     mark!("raw marker");
//!     trace_exit!(0);
//!     0
//! }
//! # let _ = tracemark::init();
//! # scan_banks(4);
//! ```

/// Name of the enclosing function, without its module path
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        let name = name.trim_end_matches("::{{closure}}");
        match name.rfind("::") {
            Some(pos) => &name[pos + 2..],
            None => name,
        }
    }};
}

/// Emit a formatted marker line
#[macro_export]
macro_rules! mark {
    (marker: $marker:expr, $($arg:tt)+) => {
        $marker.mark(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().mark(::std::format_args!($($arg)+))
    };
}

/// Emit `"<function>: entry"`
#[macro_export]
macro_rules! trace_entry {
    (marker: $marker:expr) => {
        $marker.entry($crate::function_name!())
    };
    () => {
        $crate::global().entry($crate::function_name!())
    };
}

/// Emit `"<function>: exit ret=<ret>"`
///
/// `ret` must convert losslessly into `i64`; floats and `u64` are rejected.
#[macro_export]
macro_rules! trace_exit {
    (marker: $marker:expr, $ret:expr) => {
        $marker.exit($crate::function_name!(), i64::from($ret))
    };
    ($ret:expr) => {
        $crate::global().exit($crate::function_name!(), i64::from($ret))
    };
}

/// Emit `"<function>: <message>"`
#[macro_export]
macro_rules! trace_log {
    (marker: $marker:expr, $($arg:tt)+) => {
        $marker.log($crate::function_name!(), ::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().log($crate::function_name!(), ::std::format_args!($($arg)+))
    };
}
