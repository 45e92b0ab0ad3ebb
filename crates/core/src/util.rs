/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took, and evaluates to the value of the
/// expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Round a float to the nearest integer, with halves always rounding **up**
/// (towards positive infinity). [f32::round] rounds halves away from zero,
/// which disagrees for negative halves, e.g. `-2.5` becomes `-3` instead of
/// `-2`. Screen and tile math both expect the round-up behavior.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
