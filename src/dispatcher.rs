//! Periodic timer dispatcher.
//!
//! A fixed-capacity table of periodic timers driven by a single-threaded
//! event loop.  The loop calls [`TimerDispatcher::dispatch`] with the
//! current monotonic time; every due timer is handed to a
//! [`TimerDelegate`], whose [`TaskControl`] return decides whether the
//! timer is renewed for another period or released.
//!
//! ```text
//!  ┌──────────────┐  now_ms   ┌──────────────────┐  on_timer()  ┌──────────────┐
//!  │  Event loop  │──────────▶│ TimerDispatcher  │─────────────▶│ TimerDelegate │
//!  │ (host/ESP)   │           │  [slot; N]       │◀─────────────│ (tick runner) │
//!  └──────────────┘           └──────────────────┘  Renew/Cancel└──────────────┘
//! ```
//!
//! Handles carry a generation counter, so a released handle can never
//! address the timer that later reuses its slot.

use log::{debug, info};

use crate::error::DispatchError;

// ═══════════════════════════════════════════════════════════════
//  Handle and control types
// ═══════════════════════════════════════════════════════════════

/// Opaque reference to a registered timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    slot: u8,
    generation: u16,
}

impl TimerHandle {
    /// Slot index inside the dispatcher table (diagnostics only).
    pub fn slot(self) -> u8 {
        self.slot
    }
}

/// What a timer callback wants to happen after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    /// Fire again one period from now.
    Renew,
    /// Release the timer; it never fires again.
    Cancel,
}

/// Receives due timers from [`TimerDispatcher::dispatch`].
///
/// Callbacks must return quickly; a slow callback delays every other
/// timer in the table.
pub trait TimerDelegate<T> {
    fn on_timer(&mut self, handle: TimerHandle, task: T) -> TaskControl;
}

// ═══════════════════════════════════════════════════════════════
//  Dispatcher
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
struct Timer<T> {
    task: T,
    period_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct Slot<T> {
    generation: u16,
    timer: Option<Timer<T>>,
}

/// Fixed-capacity periodic timer table.
///
/// `T` is the payload handed back to the delegate when a timer fires
/// (typically a task identifier).
pub struct TimerDispatcher<T, const N: usize> {
    slots: [Slot<T>; N],
    released: u32,
}

impl<T: Copy + core::fmt::Debug, const N: usize> TimerDispatcher<T, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot {
                generation: 0,
                timer: None,
            }),
            released: 0,
        }
    }

    /// Register a periodic timer.  It first fires `period_ms` after `now_ms`.
    pub fn add(&mut self, task: T, period_ms: u32, now_ms: u64) -> Result<TimerHandle, DispatchError> {
        if period_ms == 0 {
            return Err(DispatchError::ZeroPeriod);
        }
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.timer.is_none())
            .ok_or(DispatchError::TableFull)?;

        let period_ms = u64::from(period_ms);
        slot.timer = Some(Timer {
            task,
            period_ms,
            next_due_ms: now_ms + period_ms,
        });
        info!("Dispatcher: added {:?} every {}ms at slot {}", task, period_ms, index);
        Ok(TimerHandle {
            slot: index as u8,
            generation: slot.generation,
        })
    }

    /// Release a timer.  Fails if the handle was already released.
    pub fn cancel(&mut self, handle: TimerHandle) -> Result<(), DispatchError> {
        let slot = self
            .live_slot_mut(handle)
            .ok_or(DispatchError::StaleHandle)?;
        if let Some(timer) = slot.timer.take() {
            info!("Dispatcher: cancelled {:?} at slot {}", timer.task, handle.slot);
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.released += 1;
        Ok(())
    }

    /// Fire every timer whose deadline is at or before `now_ms`.
    ///
    /// Timers fire in slot order.  A timer that fell several periods behind
    /// fires once and is rescheduled one period after `now_ms`.
    /// Returns the number of callbacks invoked.
    pub fn dispatch(&mut self, now_ms: u64, delegate: &mut dyn TimerDelegate<T>) -> usize {
        let mut fired = 0;
        for index in 0..N {
            let slot = &mut self.slots[index];
            let Some(timer) = slot.timer.as_mut() else {
                continue;
            };
            if timer.next_due_ms > now_ms {
                continue;
            }

            let handle = TimerHandle {
                slot: index as u8,
                generation: slot.generation,
            };
            let task = timer.task;
            fired += 1;

            match delegate.on_timer(handle, task) {
                TaskControl::Renew => {
                    timer.next_due_ms += timer.period_ms;
                    if timer.next_due_ms <= now_ms {
                        debug!("Dispatcher: {:?} overran, coalescing missed periods", task);
                        timer.next_due_ms = now_ms + timer.period_ms;
                    }
                }
                TaskControl::Cancel => {
                    slot.timer = None;
                    slot.generation = slot.generation.wrapping_add(1);
                    self.released += 1;
                    info!("Dispatcher: {:?} cancelled itself at slot {}", task, index);
                }
            }
        }
        fired
    }

    /// Whether `handle` still addresses a registered timer.
    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.slots
            .get(handle.slot as usize)
            .is_some_and(|s| s.generation == handle.generation && s.timer.is_some())
    }

    /// Number of registered timers.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.timer.is_some()).count()
    }

    /// Total releases since construction (cancel + self-cancel).
    pub fn released_count(&self) -> u32 {
        self.released
    }

    /// Earliest pending deadline, if any timer is registered.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.slots
            .iter()
            .filter_map(|s| s.timer.as_ref().map(|t| t.next_due_ms))
            .min()
    }

    fn live_slot_mut(&mut self, handle: TimerHandle) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(handle.slot as usize)
            .filter(|s| s.generation == handle.generation && s.timer.is_some())
    }
}

impl<T: Copy + core::fmt::Debug, const N: usize> Default for TimerDispatcher<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
