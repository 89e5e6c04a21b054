//! Custom assertion macros

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected {:?} to contain {:?}",
            $haystack,
            $needle
        );
    };
}

/// Assert that a response carries the structured error body
#[macro_export]
macro_rules! assert_error_body {
    ($body:expr, $status:expr) => {
        assert_eq!($body["status"], $status.as_u16(), "body: {}", $body);
        assert!($body["error"].is_string(), "body: {}", $body);
    };
}
