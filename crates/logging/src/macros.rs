//! crates/logging/src/macros.rs
//! Statement macros over the default or an explicit logger.

/// Logs one message built from fragments.
///
/// `clog!(severity, partition, fragment, ...)` uses the process-wide logger
/// installed with [`set_default_logger`](crate::set_default_logger);
/// `clog!(logger => severity, partition, fragment, ...)` uses an explicit
/// [`Logger`](crate::Logger). Fragments are any [`Display`](std::fmt::Display)
/// values and are concatenated without separators.
///
/// Fragments are not evaluated when no default logger is installed or when the
/// gate is already closed at the start of the statement. The accumulator still
/// makes its own decision when the statement ends.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use partition_log::{Logger, NullSink, Severity, clog};
///
/// let logger = Logger::new(Arc::new(Severity::Warn), Arc::new(NullSink));
/// clog!(&logger => Severity::Error, "net", "conn ", 42, " failed");
/// ```
#[macro_export]
macro_rules! clog {
    ($logger:expr => $severity:expr, $partition:expr $(, $fragment:expr)* $(,)?) => {{
        let logger: &$crate::Logger = $logger;
        let severity: $crate::Severity = $severity;
        let partition: $crate::Partition = ::core::convert::Into::into($partition);
        if logger.is_enabled(partition.as_str(), severity) {
            #[allow(unused_mut)]
            let mut _message = logger.message(severity, partition);
            $( _message.append($fragment); )*
        }
    }};
    ($severity:expr, $partition:expr $(, $fragment:expr)* $(,)?) => {{
        if let ::core::option::Option::Some(logger) = $crate::default_logger() {
            $crate::clog!(logger => $severity, $partition $(, $fragment)*);
        }
    }};
}

/// Returns `true` when debug output is enabled for a partition.
///
/// Without an explicit logger the default logger is consulted; a missing
/// default logger reports `false`.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr => $partition:expr) => {
        $crate::Logger::log_debug($logger, $partition)
    };
    ($partition:expr) => {
        $crate::default_logger().is_some_and(|logger| logger.log_debug($partition))
    };
}

/// Returns `true` when trace output is enabled for a partition.
///
/// Without an explicit logger the default logger is consulted; a missing
/// default logger reports `false`.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr => $partition:expr) => {
        $crate::Logger::log_trace($logger, $partition)
    };
    ($partition:expr) => {
        $crate::default_logger().is_some_and(|logger| logger.log_trace($partition))
    };
}
