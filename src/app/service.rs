//! Controller service: the lifecycle shell around the periodic tasks.
//!
//! [`ControllerService`] owns the timer dispatcher and the five timer
//! handles.  It exposes a clean, hardware-agnostic API; all I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!                  ┌──────────────────────────┐
//!  HostEvent ────▶ │    ControllerService     │ ──▶ EventSink
//!                  │  Idle ⇄ Active           │
//!  SensorPort ───▶ │  TimerDispatcher × 5     │ ──▶ ActuatorPort
//!                  └──────────────────────────┘
//! ```
//!
//! Handle bookkeeping: a handle is released exactly once, either when its
//! task returns [`TaskControl::Cancel`] or when [`ControllerService::stop`]
//! cancels it.  Whichever happens first clears the stored handle, so the
//! other path never sees it.

use log::{info, warn};

use crate::config::ControllerConfig;
use crate::dispatcher::{TaskControl, TimerDelegate, TimerDispatcher, TimerHandle};
use crate::error::{self, DispatchError};
use crate::evaluator::Thresholds;

use super::commands::{HostEvent, HostEventTable, LifecycleAction};
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};
use super::tasks::{self, TASK_COUNT, TaskId};

/// Timer slots reserved in the dispatcher.
const TIMER_SLOTS: usize = 8;

/// Lifecycle state of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No timers registered.
    Idle,
    /// Periodic tasks registered with the dispatcher.
    Active,
}

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

pub struct ControllerService {
    config: ControllerConfig,
    thresholds: Thresholds,
    dispatcher: TimerDispatcher<TaskId, TIMER_SLOTS>,
    handles: [Option<TimerHandle>; TASK_COUNT],
    routes: HostEventTable,
    state: LifecycleState,
    tick_count: u64,
}

impl ControllerService {
    /// Construct the service from configuration.
    ///
    /// Does **not** register any timers. Deliver [`HostEvent::Control`]
    /// or call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_routes(config, HostEventTable::standard())
    }

    /// Construct with a custom host-event routing table.
    pub fn with_routes(config: ControllerConfig, routes: HostEventTable) -> Self {
        Self {
            thresholds: Thresholds::from(&config),
            config,
            dispatcher: TimerDispatcher::new(),
            handles: [None; TASK_COUNT],
            routes,
            state: LifecycleState::Idle,
            tick_count: 0,
        }
    }

    // ── Host events ───────────────────────────────────────────

    /// Route a host event through the table built at construction.
    pub fn handle_host_event(
        &mut self,
        event: HostEvent,
        now_ms: u64,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> error::Result<()> {
        match self.routes.action_for(event) {
            LifecycleAction::Create => {
                info!("ControllerService created");
                sink.emit(&AppEvent::Created);
            }
            LifecycleAction::Start => self.start(now_ms, sink)?,
            LifecycleAction::Stop => self.stop(hw, sink),
            LifecycleAction::Notify => {
                info!("Host notice: {:?}", event);
                sink.emit(&AppEvent::HostNotice(event));
            }
        }
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Idle → Active: register one periodic timer per task.
    ///
    /// Either all five timers are registered or none are.
    pub fn start(&mut self, now_ms: u64, sink: &mut impl EventSink) -> Result<(), DispatchError> {
        if self.state == LifecycleState::Active {
            warn!("ControllerService: start while active, ignoring");
            return Ok(());
        }

        for task in TaskId::ALL {
            let period = task.period_ms(&self.config);
            match self.dispatcher.add(task, period, now_ms) {
                Ok(handle) => self.handles[task.index()] = Some(handle),
                Err(e) => {
                    warn!("ControllerService: registering {} failed ({}), rolling back", task.label(), e);
                    self.release_all();
                    return Err(e);
                }
            }
        }

        self.state = LifecycleState::Active;
        sink.emit(&AppEvent::Started {
            tasks: TASK_COUNT as u8,
        });
        info!("ControllerService started with {} tasks", TASK_COUNT);
        Ok(())
    }

    /// Active → Idle: release every remaining timer, close both actuators.
    pub fn stop(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if self.state == LifecycleState::Idle {
            warn!("ControllerService: stop while idle, ignoring");
            return;
        }

        let released = self.release_all();
        hw.close_motor();
        hw.close_led(self.config.led_pin);

        self.state = LifecycleState::Idle;
        sink.emit(&AppEvent::Stopped { released });
        info!("ControllerService stopped ({} timers released)", released);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Fire every due task.  Returns how many ticks ran.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn dispatch(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> usize {
        if self.state == LifecycleState::Idle {
            return 0;
        }
        let mut runner = TickRunner {
            thresholds: &self.thresholds,
            handles: &mut self.handles,
            hw,
            sink,
        };
        let fired = self.dispatcher.dispatch(now_ms, &mut runner);
        self.tick_count += fired as u64;
        fired
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Handle currently held for `task`, if its timer is still registered.
    pub fn handle(&self, task: TaskId) -> Option<TimerHandle> {
        self.handles[task.index()]
    }

    /// Number of tasks whose timers are still registered.
    pub fn live_tasks(&self) -> usize {
        self.dispatcher.live_count()
    }

    /// Total timer releases since construction.
    pub fn released_count(&self) -> u32 {
        self.dispatcher.released_count()
    }

    /// Earliest pending task deadline.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.dispatcher.next_deadline_ms()
    }

    /// Total task ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Cancel each stored handle independently.  Returns how many were released.
    fn release_all(&mut self) -> u8 {
        let mut released = 0;
        for (index, slot) in self.handles.iter_mut().enumerate() {
            let Some(handle) = slot.take() else {
                continue;
            };
            match self.dispatcher.cancel(handle) {
                Ok(()) => released += 1,
                Err(e) => warn!("ControllerService: releasing {} failed ({})", TaskId::ALL[index].label(), e),
            }
        }
        released
    }
}

// ───────────────────────────────────────────────────────────────
// Tick runner (dispatcher delegate)
// ───────────────────────────────────────────────────────────────

/// Borrows everything a tick needs for the duration of one dispatch.
struct TickRunner<'a, H, S> {
    thresholds: &'a Thresholds,
    handles: &'a mut [Option<TimerHandle>; TASK_COUNT],
    hw: &'a mut H,
    sink: &'a mut S,
}

impl<H: SensorPort + ActuatorPort, S: EventSink> TimerDelegate<TaskId> for TickRunner<'_, H, S> {
    fn on_timer(&mut self, handle: TimerHandle, task: TaskId) -> TaskControl {
        let control = tasks::run_tick(task, self.thresholds, &mut *self.hw, &mut *self.sink);
        if control == TaskControl::Cancel {
            // The dispatcher releases the slot itself; forget our copy.
            let held = &mut self.handles[task.index()];
            if *held == Some(handle) {
                *held = None;
            }
        }
        control
    }
}
