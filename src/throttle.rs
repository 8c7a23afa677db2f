/// Lets an event through at most once per `min_interval_ms`.
#[derive(Debug)]
pub struct Throttle {
    min_interval_ms: f64,
    last: Option<f64>,
}

impl Throttle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last: None,
        }
    }

    /// `now` is a millisecond timestamp, e.g. `Date.now()`.
    pub fn admit(&mut self, now: f64) -> bool {
        if let Some(last) = self.last {
            if now - last < self.min_interval_ms {
                return false;
            }
        }

        self.last = Some(now);
        true
    }
}
