//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade (UART / USB-CDC on the board, stderr on the host).

use log::{info, warn};

use crate::app::events::{Actuation, AppEvent};
use crate::app::ports::EventSink;
use crate::evaluator::{Measurement, MotorCommand};

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Created => info!("LIFE  | created"),
            AppEvent::Started { tasks } => info!("START | tasks={}", tasks),
            AppEvent::Stopped { released } => info!("STOP  | released={}", released),
            AppEvent::Reading(m) => match m {
                Measurement::FrontDistance(cm) => info!("READ  | front={:.1}cm", cm),
                Measurement::BackDistance(cm) => info!("READ  | back={:.1}cm", cm),
                Measurement::Temperature(t) => info!(
                    "READ  | object={:.2}\u{00b0}C ambient={:.2}\u{00b0}C",
                    t.object_c, t.ambient_c
                ),
                Measurement::Illuminance(lux) => info!("READ  | light={:.1}lx", lux),
                Measurement::Tilt(tilted) => info!("READ  | tilt={}", tilted),
            },
            AppEvent::Actuated { task, actuation } => match actuation {
                Actuation::Motor(MotorCommand::Stop) => {
                    info!("ACT   | {} | motor stop", task.label())
                }
                Actuation::Motor(MotorCommand::Run { duty_ms }) => {
                    info!("ACT   | {} | motor duty={:.1}ms", task.label(), duty_ms)
                }
                Actuation::Led { pin, on } => {
                    info!("ACT   | {} | led{} {}", task.label(), pin, if *on { "ON" } else { "OFF" })
                }
            },
            AppEvent::Alert(gap) => warn!("ALERT | {:?} (no action defined)", gap),
            AppEvent::ReadFailed { task, error } => {
                warn!("FAULT | {} read: {} (task cancelled)", task.label(), error)
            }
            AppEvent::WriteFailed { task, error } => {
                warn!("FAULT | {} write: {}", task.label(), error)
            }
            AppEvent::HostNotice(event) => info!("HOST  | {:?}", event),
        }
    }
}
