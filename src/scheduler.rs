//! Fall, lock-delay and DAS timing for the active piece
//!
//! All timing compares absolute deadlines against a monotonically
//! increasing clock value the session reads once per tick, so varying tick
//! length never drifts the timers. The scheduler only decides *when*
//! things are due; the session applies the moves and reports back.

/// Per-piece and per-session timing state.
///
/// The gravity accumulator and lock deadline reset on every spawn; the DAS
/// deadlines belong to the keys, not the piece, and survive spawns (a key
/// held across a lock keeps repeating at the repeat rate).
#[derive(Debug, Clone)]
pub struct Scheduler {
    das_delay: f64,
    das_speed: f64,
    lock_delay: f64,
    soft_drop_divisor: f64,
    /// Clock reading of the last gravity step
    last_fall: f64,
    /// Armed while the piece is blocked from falling
    lock_deadline: Option<f64>,
    /// Armed while the left/right key is held
    das_left: Option<f64>,
    das_right: Option<f64>,
    soft_drop: bool,
}

impl Scheduler {
    pub fn new(das_delay: f64, das_speed: f64, lock_delay: f64, soft_drop_divisor: f64) -> Self {
        Self {
            das_delay,
            das_speed,
            lock_delay,
            soft_drop_divisor,
            last_fall: 0.0,
            lock_deadline: None,
            das_left: None,
            das_right: None,
            soft_drop: false,
        }
    }

    /// Reset the per-piece timers for a fresh spawn. DAS state is kept.
    pub fn reset_for_spawn(&mut self, now: f64) {
        self.last_fall = now;
        self.lock_deadline = None;
    }

    pub fn set_soft_drop(&mut self, down: bool) {
        self.soft_drop = down;
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    /// Whether a gravity step is due at this clock reading
    pub fn gravity_due(&self, now: f64, fall_interval: f64) -> bool {
        let interval = if self.soft_drop {
            fall_interval / self.soft_drop_divisor
        } else {
            fall_interval
        };
        now - self.last_fall > interval
    }

    /// Record the outcome of a gravity step. A successful descent means
    /// the piece is airborne again; a blocked one arms the lock deadline
    /// if it is not already armed.
    pub fn gravity_applied(&mut self, now: f64, descended: bool) {
        self.last_fall = now;
        if descended {
            self.lock_deadline = None;
        } else if self.lock_deadline.is_none() {
            self.lock_deadline = Some(now + self.lock_delay);
        }
    }

    /// A successful player move or rotation disarms the lock timer
    /// (classic infinite-spin behavior). Failed transforms must not call
    /// this: they neither disarm nor re-arm.
    pub fn transform_applied(&mut self) {
        self.lock_deadline = None;
    }

    /// Whether an armed lock deadline has expired
    pub fn lock_expired(&self, now: f64) -> bool {
        self.lock_deadline.is_some_and(|deadline| now > deadline)
    }

    pub fn lock_armed(&self) -> bool {
        self.lock_deadline.is_some()
    }

    /// Key-down on left: the session moves immediately, auto-repeat starts
    /// after the initial delay
    pub fn press_left(&mut self, now: f64) {
        self.das_left = Some(now + self.das_delay);
    }

    pub fn release_left(&mut self) {
        self.das_left = None;
    }

    pub fn press_right(&mut self, now: f64) {
        self.das_right = Some(now + self.das_delay);
    }

    pub fn release_right(&mut self) {
        self.das_right = None;
    }

    /// Whether a held-left repeat is due. Re-arms at the repeat rate
    /// whether or not the resulting move succeeds.
    pub fn repeat_left_due(&mut self, now: f64) -> bool {
        match self.das_left {
            Some(deadline) if now > deadline => {
                self.das_left = Some(now + self.das_speed);
                true
            }
            _ => false,
        }
    }

    /// Whether a held-right repeat is due; independent of the left timer
    pub fn repeat_right_due(&mut self, now: f64) -> bool {
        match self.das_right {
            Some(deadline) if now > deadline => {
                self.das_right = Some(now + self.das_speed);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> Scheduler {
        // Default tuning: DAS 0.3/0.1, lock delay 0.5, soft drop /10
        Scheduler::new(0.3, 0.1, 0.5, 10.0)
    }

    #[test]
    fn test_gravity_due_after_interval() {
        let mut s = scheduler();
        s.reset_for_spawn(0.0);
        assert!(!s.gravity_due(0.5, 0.8));
        assert!(s.gravity_due(0.81, 0.8));
        s.gravity_applied(0.81, true);
        assert!(!s.gravity_due(1.0, 0.8));
    }

    #[test]
    fn test_soft_drop_divides_interval() {
        let mut s = scheduler();
        s.reset_for_spawn(0.0);
        s.set_soft_drop(true);
        assert!(s.gravity_due(0.09, 0.8));
        s.set_soft_drop(false);
        assert!(!s.gravity_due(0.09, 0.8));
    }

    #[test]
    fn test_blocked_descent_arms_lock_once() {
        let mut s = scheduler();
        s.reset_for_spawn(0.0);
        s.gravity_applied(1.0, false);
        assert!(s.lock_armed());
        assert!(!s.lock_expired(1.4));
        // A later blocked descent must not push the deadline out
        s.gravity_applied(1.4, false);
        assert!(s.lock_expired(1.51));
    }

    #[test]
    fn test_successful_descent_disarms_lock() {
        let mut s = scheduler();
        s.reset_for_spawn(0.0);
        s.gravity_applied(1.0, false);
        s.gravity_applied(1.2, true);
        assert!(!s.lock_armed());
        assert!(!s.lock_expired(10.0));
    }

    #[test]
    fn test_transform_disarms_lock() {
        let mut s = scheduler();
        s.reset_for_spawn(0.0);
        s.gravity_applied(1.0, false);
        s.transform_applied();
        assert!(!s.lock_armed());
    }

    #[test]
    fn test_das_initial_delay_then_repeat_rate() {
        let mut s = scheduler();
        s.press_left(0.0);
        assert!(!s.repeat_left_due(0.2));
        assert!(s.repeat_left_due(0.31));
        // Re-armed at the repeat rate
        assert!(!s.repeat_left_due(0.4));
        assert!(s.repeat_left_due(0.42));
    }

    #[test]
    fn test_das_release_cancels_repeat() {
        let mut s = scheduler();
        s.press_left(0.0);
        s.release_left();
        assert!(!s.repeat_left_due(1.0));
    }

    #[test]
    fn test_das_timers_are_independent() {
        let mut s = scheduler();
        s.press_left(0.0);
        s.press_right(0.25);
        assert!(s.repeat_left_due(0.31));
        assert!(!s.repeat_right_due(0.31));
        assert!(s.repeat_right_due(0.56));
    }

    #[test]
    fn test_das_survives_spawn_reset() {
        let mut s = scheduler();
        s.press_left(0.0);
        s.gravity_applied(0.2, false);
        s.reset_for_spawn(0.2);
        assert!(!s.lock_armed());
        assert!(s.repeat_left_due(0.31));
    }
}
