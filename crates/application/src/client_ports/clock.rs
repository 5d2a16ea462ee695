use chrono::NaiveDateTime;

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current local time without timezone information.
    fn now(&self) -> NaiveDateTime;
}
