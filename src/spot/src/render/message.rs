//! Macros for printing styled status lines to stderr; stdout is reserved for the report.
//! Callers need `colored::Colorize` in scope.

#[macro_export]
macro_rules! error_message {
    ($($arg:tt)*) => {
        eprintln!("{} {}", "  [ERROR]".red().bold(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! warning_message {
    ($($arg:tt)*) => {
        eprintln!("{} {}", "[WARNING]".yellow().bold(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! info_message {
    ($($arg:tt)*) => {
        eprintln!("{} {}", "   [INFO]".cyan().bold(), format!($($arg)*));
    };
}
