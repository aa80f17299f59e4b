use chrono::{Local, NaiveDateTime};

use crate::ports::clock::ClockPort;

/// Wall clock of the machine running the server
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
