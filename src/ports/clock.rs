use chrono::NaiveDateTime;

/// Source of the current time
///
/// Competition dates carry no timezone, so this returns local wall-clock time.
#[mockall::automock]
pub trait ClockPort {
    fn now(&self) -> NaiveDateTime;
}
