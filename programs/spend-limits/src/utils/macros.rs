/// Returns early with `$err` converted into the caller's error type when `$cond` is false
#[macro_export]
macro_rules! check {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
