/// Hours in one day; labels wrap after this many steps.
pub const HOURS_PER_DAY: usize = 24;

/// Hourly step clock driving a dispatch run in chronological order.
///
/// # Examples
///
/// ```
/// use microgrid_sizing::sim::clock::{HourClock, hour_label};
///
/// let mut clock = HourClock::new(3);
/// let mut labels = Vec::new();
///
/// clock.run(|t| labels.push(hour_label(t)));
/// assert_eq!(labels, vec!["00:00:00", "01:00:00", "02:00:00"]);
/// ```
pub struct HourClock {
    /// Next hour index to hand out
    next: usize,
    /// Number of hourly steps in the horizon
    horizon: usize,
}

impl HourClock {
    /// Creates a clock covering `horizon` hourly steps.
    pub fn new(horizon: usize) -> Self {
        Self { next: 0, horizon }
    }

    /// Returns the next hour index, or `None` once the horizon is exhausted.
    pub fn tick(&mut self) -> Option<usize> {
        if self.next < self.horizon {
            let t = self.next;
            self.next += 1;
            Some(t)
        } else {
            None
        }
    }

    /// Calls `f` once per remaining hour, in order.
    pub fn run(&mut self, mut f: impl FnMut(usize)) {
        while let Some(t) = self.tick() {
            f(t);
        }
    }
}

/// Formats an hour index as a wall-clock label (`HH:00:00`), wrapping at midnight.
pub fn hour_label(t: usize) -> String {
    format!("{:02}:00:00", t % HOURS_PER_DAY)
}
