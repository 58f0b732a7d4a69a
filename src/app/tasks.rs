//! The five periodic tasks and what one tick of each does.
//!
//! A tick is read → evaluate → actuate:
//!
//! ```text
//!  SensorPort::read_*  ──▶  evaluator::evaluate  ──▶  ActuatorPort::set_*
//!        │ Err                                              │ Err
//!        ▼                                                  ▼
//!   TaskControl::Cancel                              log, keep renewing
//! ```
//!
//! A failed read cancels only the task that issued it.  A failed write is
//! logged and dropped; the next favourable tick reissues the command.

use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::dispatcher::TaskControl;
use crate::error::ReadError;
use crate::evaluator::{self, Decision, Measurement, Thresholds};

use super::events::{Actuation, AppEvent};
use super::ports::{ActuatorPort, EventSink, Placement, SensorPort};

/// Identifies one of the periodic sensor tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    FrontDistance,
    BackDistance,
    Temperature,
    Illuminance,
    Tilt,
}

/// Number of periodic tasks the controller runs.
pub const TASK_COUNT: usize = 5;

impl TaskId {
    /// Registration order.
    pub const ALL: [TaskId; TASK_COUNT] = [
        TaskId::FrontDistance,
        TaskId::BackDistance,
        TaskId::Temperature,
        TaskId::Illuminance,
        TaskId::Tilt,
    ];

    /// Position in [`TaskId::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontDistance => "front-distance",
            Self::BackDistance => "back-distance",
            Self::Temperature => "temperature",
            Self::Illuminance => "illuminance",
            Self::Tilt => "tilt",
        }
    }

    /// Poll period for this task.
    pub fn period_ms(self, cfg: &ControllerConfig) -> u32 {
        match self {
            Self::FrontDistance | Self::BackDistance => cfg.distance_period_ms,
            Self::Temperature => cfg.temperature_period_ms,
            Self::Illuminance => cfg.illuminance_period_ms,
            Self::Tilt => cfg.tilt_period_ms,
        }
    }
}

/// Issue the sensor read belonging to `task`.
pub fn read(task: TaskId, sensors: &mut impl SensorPort) -> Result<Measurement, ReadError> {
    Ok(match task {
        TaskId::FrontDistance => Measurement::FrontDistance(sensors.read_distance(Placement::Front)?),
        TaskId::BackDistance => Measurement::BackDistance(sensors.read_distance(Placement::Back)?),
        TaskId::Temperature => Measurement::Temperature(sensors.read_temperature()?),
        TaskId::Illuminance => Measurement::Illuminance(sensors.read_illuminance()?),
        TaskId::Tilt => Measurement::Tilt(sensors.read_tilt()?),
    })
}

/// Run one tick of `task`.  The return value decides whether its timer renews.
pub fn run_tick(
    task: TaskId,
    th: &Thresholds,
    hw: &mut (impl SensorPort + ActuatorPort),
    sink: &mut impl EventSink,
) -> TaskControl {
    let measurement = match read(task, hw) {
        Ok(m) => m,
        Err(error) => {
            warn!("{}: read failed ({}), cancelling task", task.label(), error);
            sink.emit(&AppEvent::ReadFailed { task, error });
            return TaskControl::Cancel;
        }
    };
    debug!("{}: {:?}", task.label(), measurement);
    sink.emit(&AppEvent::Reading(measurement));

    let decision = evaluator::evaluate(&measurement, th);
    apply(task, decision, hw, sink);
    TaskControl::Renew
}

/// Translate a decision into actuator port calls.
pub fn apply(task: TaskId, decision: Decision, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
    let actuation = match decision {
        Decision::NoAction => return,
        Decision::Unmeasurable => {
            debug!("{}: out of measurable range, no action", task.label());
            return;
        }
        Decision::Unimplemented(gap) => {
            info!("{}: {:?} tripped, no action defined", task.label(), gap);
            sink.emit(&AppEvent::Alert(gap));
            return;
        }
        Decision::Motor(cmd) => Actuation::Motor(cmd),
        Decision::Led { pin, on } => Actuation::Led { pin, on },
    };

    let result = match actuation {
        Actuation::Motor(cmd) => hw.set_motor_duty_cycle(cmd.duty_ms()),
        Actuation::Led { pin, on } => hw.set_led(pin, on),
    };
    match result {
        Ok(()) => sink.emit(&AppEvent::Actuated { task, actuation }),
        Err(error) => {
            warn!("{}: {:?} failed ({}), ignoring", task.label(), actuation, error);
            sink.emit(&AppEvent::WriteFailed { task, error });
        }
    }
}
