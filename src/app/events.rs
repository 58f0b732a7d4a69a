//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) and the tick
//! runner emit these through the [`EventSink`](super::ports::EventSink)
//! port.  Adapters on the other side decide what to do with them.

use crate::error::{ReadError, WriteError};
use crate::evaluator::{Measurement, MotorCommand, PolicyGap};

use super::commands::HostEvent;
use super::tasks::TaskId;

/// An actuator command that was (or was attempted to be) written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Actuation {
    Motor(MotorCommand),
    Led { pin: u8, on: bool },
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The host created the service.
    Created,

    /// Periodic tasks registered; carries how many.
    Started { tasks: u8 },

    /// Shutdown finished; carries how many timer handles were released
    /// by the shutdown itself (tasks that cancelled earlier are not counted).
    Stopped { released: u8 },

    /// A sensor produced a reading.
    Reading(Measurement),

    /// An actuator command was written.
    Actuated { task: TaskId, actuation: Actuation },

    /// A threshold without a defined response tripped.
    Alert(PolicyGap),

    /// A sensor read failed; the task has been cancelled.
    ReadFailed { task: TaskId, error: ReadError },

    /// An actuator write failed and was dropped.
    WriteFailed { task: TaskId, error: WriteError },

    /// A host notification with no controller behaviour attached.
    HostNotice(HostEvent),
}
