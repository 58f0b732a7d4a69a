//! Host event loop.
//!
//! Drives [`ControllerService::dispatch`] on a single-threaded
//! `edge-executor`, waking every poll interval on an `async-io-mini` timer.
//!
//! ```text
//!  ┌──────────────────────── block_on ─────────────────────────┐
//!  │  LocalExecutor                                            │
//!  │    ├─ dispatch loop   (dispatch → sleep poll interval)     │
//!  │    ├─ stop.wait()     (any thread may signal)              │
//!  │    └─ deadline task   (only when run_for_secs is set)      │
//!  └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Whichever of the three finishes first decides the [`StopReason`].  The
//! caller still owns the lifecycle: `run` never calls `stop` on the service.

use core::time::Duration;

use async_io_mini::Timer;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::{info, warn};

use crate::app::ports::{ActuatorPort, EventSink, MonotonicClock, SensorPort};
use crate::app::service::ControllerService;

/// Why [`run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Someone signalled the stop signal.
    Requested,
    /// `run_for_secs` elapsed.
    Deadline,
    /// No periodic task is registered any more.
    AllTasksCancelled,
}

/// Stop request shared between the loop and whoever wants to end it.
pub type StopSignal = Signal<CriticalSectionRawMutex, StopReason>;

/// Route Ctrl-C to `stop` so an interrupted host run still shuts down
/// through the service.  Fails if a handler is already installed.
#[cfg(not(target_os = "espidf"))]
pub fn stop_on_interrupt(stop: &'static StopSignal) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        info!("runtime: interrupt received, stopping");
        stop.signal(StopReason::Requested);
    })
}

/// Run the dispatch loop until stopped.  Clears any stale stop request first.
pub fn run<H, S, C>(
    service: &mut ControllerService,
    hw: &mut H,
    sink: &mut S,
    clock: &C,
    stop: &StopSignal,
) -> StopReason
where
    H: SensorPort + ActuatorPort,
    S: EventSink,
    C: MonotonicClock,
{
    stop.reset();

    let poll = Duration::from_millis(service.config().loop_poll_interval_ms.into());
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();

    if let Some(secs) = service.config().run_for_secs {
        info!("runtime: stopping after {}s", secs);
        executor
            .spawn(deadline(stop, Duration::from_secs(secs.into())))
            .detach();
    }

    info!("runtime: polling every {}ms", poll.as_millis());
    let reason = futures_lite::future::block_on(executor.run(futures_lite::future::or(
        stop.wait(),
        dispatch_loop(service, hw, sink, clock, poll),
    )));
    info!("runtime: loop ended ({:?}) after {} ticks", reason, service.tick_count());
    reason
}

async fn dispatch_loop<H, S, C>(
    service: &mut ControllerService,
    hw: &mut H,
    sink: &mut S,
    clock: &C,
    poll: Duration,
) -> StopReason
where
    H: SensorPort + ActuatorPort,
    S: EventSink,
    C: MonotonicClock,
{
    loop {
        service.dispatch(clock.now_ms(), hw, sink);
        if service.live_tasks() == 0 {
            warn!("runtime: no live tasks left");
            return StopReason::AllTasksCancelled;
        }
        Timer::after(poll).await;
    }
}

async fn deadline(stop: &StopSignal, after: Duration) {
    Timer::after(after).await;
    stop.signal(StopReason::Deadline);
}
