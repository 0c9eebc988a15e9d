//! Logging macros; context values accept anything implementing Display

/// Log an error with a Code and optional span/context pairs
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::error($code, $message), None, &[])
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::error($code, $message), Some($span), &[])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        $crate::logging::emit($crate::logging::LogEvent::error($code, $message), None, &context)
    }};

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {{
        let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        $crate::logging::emit($crate::logging::LogEvent::error($code, $message), Some($span), &context)
    }};
}

/// Log a success milestone
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::success($code, $message), None, &[])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        $crate::logging::emit($crate::logging::LogEvent::success($code, $message), None, &context)
    }};
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::info($message), None, &[])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {{
        let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        $crate::logging::emit($crate::logging::LogEvent::info($message), None, &context)
    }};
}

/// Log a warning, optionally tagged with a lexical warning code
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::warning_with_code($code, $message), None, &[])
    };

    (code = $code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {{
        let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        $crate::logging::emit(
            $crate::logging::LogEvent::warning_with_code($code, $message),
            Some($span),
            &context,
        )
    }};

    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+) => {{
        let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        $crate::logging::emit($crate::logging::LogEvent::warning_with_code($code, $message), None, &context)
    }};

    ($message:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::warning($message), None, &[])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {{
        let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
        $crate::logging::emit($crate::logging::LogEvent::warning($message), None, &context)
    }};
}

/// Debug events are skipped entirely unless the configured level admits them
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::emit($crate::logging::LogEvent::debug($message), None, &[])
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            let context: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::emit($crate::logging::LogEvent::debug($message), None, &context)
        }
    };
}
