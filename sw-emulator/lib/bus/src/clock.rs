/*++

Licensed under the Apache-2.0 license.

File Name:

    clock.rs

Abstract:

    File contains Clock and Timer types, used to implement timer-based deferred
    execution for peripherals. One clock cycle is one bus access.

--*/
use std::{
    cell::{Cell, RefCell},
    collections::BTreeSet,
    rc::Rc,
};

use crate::Bus;

/// Peripherals that want to use timer-based deferred execution store a clone
/// of Timer inside themselves, and use it to schedule future notification via
/// [`Bus::poll`].
///
/// # Example
///
/// ```
/// use wb_sha1_emu_bus::{ActionHandle, Bus, BusError, Timer};
/// use wb_sha1_emu_types::{RvAddr, RvData, RvSize};
/// struct MyPeriph {
///     timer: Timer,
///     action0: Option<ActionHandle>,
/// }
/// impl Bus for MyPeriph {
///     fn read(&mut self, _size: RvSize, _addr: RvAddr) -> Result<RvData, BusError> {
///         Ok(0)
///     }
///     fn write(&mut self, _size: RvSize, _addr: RvAddr, _val: RvData) -> Result<(), BusError> {
///         if let Some(action0) = self.action0.take() {
///             self.timer.cancel(action0);
///         }
///         self.action0 = Some(self.timer.schedule_poll_in(80));
///         Ok(())
///     }
///     fn poll(&mut self) {
///         if self.timer.fired(&mut self.action0) {
///             println!("80 cycles after the last write to MyPeriph.")
///         }
///     }
/// }
/// ```
#[derive(Clone)]
pub struct Timer {
    clock: Rc<ClockImpl>,
}
impl Timer {
    /// Constructs a new timer bound to the specified clock.
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: Rc::clone(&clock.clock),
        }
    }

    /// Returns the number of clock cycles elapsed since simulation start.
    #[inline]
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// If the scheduled time for `action` has come, `action` is set to None
    /// and the function returns true. Otherwise (or if action is None), it
    /// returns false.
    pub fn fired(&self, action: &mut Option<ActionHandle>) -> bool {
        let has_fired = match action {
            Some(handle) => {
                debug_assert!(
                    Rc::as_ptr(&self.clock) == handle.clock,
                    "Supplied action was not created by this timer."
                );
                handle.time <= self.now()
            }
            None => false,
        };
        if has_fired {
            *action = None;
        }
        has_fired
    }

    /// Schedules a call to [`Bus::poll()`] at `time`.
    pub fn schedule_poll_at(&self, time: u64) -> ActionHandle {
        self.clock.schedule_poll_at(time)
    }

    /// Schedules a call to [`Bus::poll()`] at `self.now() + ticks_from_now`.
    pub fn schedule_poll_in(&self, ticks_from_now: u64) -> ActionHandle {
        self.schedule_poll_at(self.now().saturating_add(ticks_from_now))
    }

    /// Cancels a previously scheduled poll action.
    ///
    /// # Panics
    ///
    /// Panics if the supplied `ActionHandle` was not created by this Timer.
    pub fn cancel(&self, handle: ActionHandle) {
        self.clock.cancel(handle)
    }
}

pub struct Clock {
    clock: Rc<ClockImpl>,
}
impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
impl Clock {
    /// Constructs a new Clock with the cycle counter set to 0.
    pub fn new() -> Clock {
        Self {
            clock: Rc::new(ClockImpl {
                now: Cell::new(0),
                next_id: Cell::new(0),
                pending: RefCell::new(BTreeSet::new()),
            }),
        }
    }

    /// Constructs a `Timer` associated with this clock.
    pub fn timer(&self) -> Timer {
        Timer::new(self)
    }

    /// Returns the number of clock cycles elapsed since simulation start.
    #[inline]
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Increments the clock by `delta`. Returns true if any scheduled poll
    /// came due.
    pub fn increment(&self, delta: u64) -> bool {
        self.clock.increment(delta)
    }

    /// Increments the clock by `delta`, and polls the bus if any scheduled
    /// poll came due.
    pub fn increment_and_process_timer_actions(&self, delta: u64, bus: &mut impl Bus) -> bool {
        let fired = self.increment(delta);
        if fired {
            bus.poll();
        }
        fired
    }
}

/// Represents a poll scheduled with a `Timer`. Returned by
/// [`Timer::schedule_poll_at`] and passed to [`Timer::fired()`] or
/// [`Timer::cancel`].
pub struct ActionHandle {
    time: u64,
    id: u64,
    /// Identifies the clock the action was scheduled on.
    clock: *const ClockImpl,
}

struct ClockImpl {
    now: Cell<u64>,
    next_id: Cell<u64>,
    /// (time, id) of every poll not yet due.
    pending: RefCell<BTreeSet<(u64, u64)>>,
}
impl ClockImpl {
    #[inline]
    fn now(&self) -> u64 {
        self.now.get()
    }

    fn increment(&self, delta: u64) -> bool {
        let now = self.now().checked_add(delta);
        let Some(now) = now else {
            panic!("Clock overflow");
        };
        self.now.set(now);

        let mut pending = self.pending.borrow_mut();
        let mut fired = false;
        while let Some(&(time, id)) = pending.iter().next() {
            if time > now {
                break;
            }
            pending.remove(&(time, id));
            fired = true;
        }
        fired
    }

    fn schedule_poll_at(self: &Rc<Self>, time: u64) -> ActionHandle {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.pending.borrow_mut().insert((time, id));
        ActionHandle {
            time,
            id,
            clock: Rc::as_ptr(self),
        }
    }

    fn cancel(self: &Rc<Self>, handle: ActionHandle) {
        assert!(
            Rc::as_ptr(self) == handle.clock,
            "Supplied action was not created by this timer."
        );
        self.pending.borrow_mut().remove(&(handle.time, handle.id));
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::FakeBus;

    use super::*;

    #[test]
    fn test_clock() {
        let clock = Clock::new();
        assert_eq!(clock.now(), 0);
        assert!(!clock.increment(25));
        assert_eq!(clock.now(), 25);
        assert!(!clock.increment(100));
        assert_eq!(clock.now(), 125);
    }

    #[test]
    fn test_timer_schedule() {
        let clock = Clock::new();
        let timer = clock.timer();
        let mut action0 = Some(timer.schedule_poll_in(25));
        let mut action1 = Some(timer.schedule_poll_in(40));
        let mut action2 = Some(timer.schedule_poll_in(100));
        let mut action3 = Option::<ActionHandle>::None;

        assert!(!clock.increment(24));
        assert!(!timer.fired(&mut action0) && action0.is_some());
        assert!(!timer.fired(&mut action3) && action3.is_none());

        assert!(clock.increment(1));
        assert!(timer.fired(&mut action0) && action0.is_none());
        assert!(!timer.fired(&mut action0));
        assert!(!timer.fired(&mut action2) && action2.is_some());

        action3 = Some(timer.schedule_poll_in(1));
        assert!(clock.increment(1));
        assert!(timer.fired(&mut action3) && action3.is_none());

        if let Some(action1) = action1.take() {
            timer.cancel(action1);
        }
        assert!(!clock.increment(24));
        assert_eq!(clock.now(), 50);

        assert!(clock.increment(50));
        assert!(timer.fired(&mut action2) && action2.is_none());
        assert!(!clock.increment(1000));
    }

    #[test]
    fn test_schedule_in_zero_fires_on_next_increment() {
        let clock = Clock::new();
        let timer = clock.timer();
        let mut action = Some(timer.schedule_poll_in(0));
        assert!(clock.increment(1));
        assert!(timer.fired(&mut action));
    }

    #[test]
    fn test_increment_and_poll() {
        let clock = Clock::new();
        let timer = clock.timer();
        let mut bus = FakeBus::new();

        let mut action0 = Some(timer.schedule_poll_in(25));
        clock.increment_and_process_timer_actions(20, &mut bus);
        assert_eq!(bus.log.take(), "");

        clock.increment_and_process_timer_actions(20, &mut bus);
        assert_eq!(bus.log.take(), "poll()\n");

        assert!(timer.fired(&mut action0));
    }

    #[test]
    #[should_panic(expected = "Supplied action was not created by this timer.")]
    fn test_mixup_timer_actions_on_cancel() {
        let clock0 = Clock::new();
        let clock0_action0 = clock0.timer().schedule_poll_at(50);

        let clock1 = Clock::new();
        let _clock1_action0 = clock1.timer().schedule_poll_at(50);

        clock1.timer().cancel(clock0_action0);
    }
}
