use std::fmt::Display;

use once_cell::sync::OnceCell;

static LOG_STATISTICS: OnceCell<bool> = OnceCell::new();
static STATISTIC_PREFIX: OnceCell<&str> = OnceCell::new();
static AFTER_STATISTICS: OnceCell<Option<&str>> = OnceCell::new();

/// Configure the statistic output. Only the first call has an effect.
///
/// Statistics are printed as `prefix name=value`. If `after` is given, it is printed as a closing
/// line by [`log_statistic_postfix`].
pub fn configure(log_statistics: bool, prefix: &'static str, after: Option<&'static str>) {
    let _ = LOG_STATISTICS.get_or_init(|| log_statistics);
    let _ = STATISTIC_PREFIX.get_or_init(|| prefix);
    let _ = AFTER_STATISTICS.get_or_init(|| after);
}

pub fn should_log_statistics() -> bool {
    LOG_STATISTICS.get().copied().unwrap_or(false)
}

/// Print a single statistic, if statistics were enabled through [`configure`].
pub fn log_statistic(name: impl Display, value: impl Display) {
    if !should_log_statistics() {
        return;
    }

    let prefix = STATISTIC_PREFIX.get().copied().unwrap_or_default();
    println!("{prefix} {name}={value}");
}

pub fn log_statistic_postfix() {
    if !should_log_statistics() {
        return;
    }

    if let Some(Some(postfix)) = AFTER_STATISTICS.get() {
        println!("{postfix}");
    }
}
