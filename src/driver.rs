//! Start/stop bookkeeping for a recurring effect driver.
//!
//! The running task is represented by a token whose `Drop` cancels it (a
//! `gloo_timers::callback::Interval` in the browser), so stopping is just
//! dropping the token.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

pub struct Driver<T> {
    task: Option<T>,
}

impl<T> Default for Driver<T> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<T> Driver<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DriverState {
        if self.task.is_some() {
            DriverState::Running
        } else {
            DriverState::Stopped
        }
    }

    /// Spawns the task unless one is already running. Returns whether a new
    /// task was started.
    pub fn start(&mut self, spawn: impl FnOnce() -> T) -> bool {
        if self.task.is_some() {
            return false;
        }

        self.task = Some(spawn());
        true
    }

    /// Cancels the running task, if any. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        self.task.take().is_some()
    }

    /// Pauses while the page is hidden and resumes once it is shown again.
    pub fn on_visibility_change(&mut self, hidden: bool, spawn: impl FnOnce() -> T) -> DriverState {
        if hidden {
            self.stop();
        } else {
            self.start(spawn);
        }

        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    struct Ticker {
        live: Rc<Cell<u32>>,
    }

    impl Ticker {
        fn spawn(live: &Rc<Cell<u32>>, spawned: &Cell<u32>) -> Self {
            live.set(live.get() + 1);
            spawned.set(spawned.get() + 1);
            Self {
                live: Rc::clone(live),
            }
        }
    }

    impl Drop for Ticker {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn start_is_refused_while_running() {
        let live = Rc::new(Cell::new(0));
        let spawned = Cell::new(0);
        let mut driver = Driver::new();

        assert!(driver.start(|| Ticker::spawn(&live, &spawned)));
        assert!(!driver.start(|| Ticker::spawn(&live, &spawned)));

        assert_eq!(driver.state(), DriverState::Running);
        assert_eq!(spawned.get(), 1);
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn stop_cancels_the_task() {
        let live = Rc::new(Cell::new(0));
        let spawned = Cell::new(0);
        let mut driver = Driver::new();
        driver.start(|| Ticker::spawn(&live, &spawned));

        assert!(driver.stop());
        assert!(!driver.stop());
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn visibility_changes_pause_and_resume_a_single_task() {
        let live = Rc::new(Cell::new(0));
        let spawned = Cell::new(0);
        let mut driver = Driver::new();
        driver.start(|| Ticker::spawn(&live, &spawned));

        let state = driver.on_visibility_change(true, || Ticker::spawn(&live, &spawned));
        assert_eq!(state, DriverState::Stopped);
        assert_eq!(live.get(), 0);

        let state = driver.on_visibility_change(false, || Ticker::spawn(&live, &spawned));
        assert_eq!(state, DriverState::Running);

        // A second "visible" signal must not start a duplicate.
        driver.on_visibility_change(false, || Ticker::spawn(&live, &spawned));
        assert_eq!(live.get(), 1);
        assert_eq!(spawned.get(), 2);
    }

    #[test]
    fn mounting_in_a_hidden_page_waits_for_it_to_show() {
        let live = Rc::new(Cell::new(0));
        let spawned = Cell::new(0);
        let mut driver = Driver::new();

        let state = driver.on_visibility_change(true, || Ticker::spawn(&live, &spawned));
        assert_eq!(state, DriverState::Stopped);
        assert_eq!(spawned.get(), 0);

        let state = driver.on_visibility_change(false, || Ticker::spawn(&live, &spawned));
        assert_eq!(state, DriverState::Running);
        assert_eq!(spawned.get(), 1);
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn hidden_signal_while_stopped_stays_stopped() {
        let mut driver: Driver<()> = Driver::new();
        assert_eq!(driver.on_visibility_change(true, || ()), DriverState::Stopped);
    }
}
