extern crate dfpong;

/// Drive a harness through `(movement, duration_ms)` steps, one tick per millisecond
#[macro_export]
macro_rules! movement_sequence {
    ($harness:expr, [$(($movement:ident, $ms:expr)),* $(,)?]) => {
        $(
            $harness.run_for(dfpong::Movement::$movement, $ms);
        )*
    };
}

/// Assert the values notified to the central, in order
#[macro_export]
macro_rules! assert_notified {
    ($harness:expr, [$($value:expr),* $(,)?]) => {{
        let expected: Vec<u8> = vec![$($value as u8),*];
        assert_eq!($harness.notified_values(), expected);
    }};
}
