//! Inbound host lifecycle events and the table that routes them.
//!
//! The hosting platform delivers lifecycle callbacks (create, control,
//! terminate) and system notifications (battery, memory, locale).  Instead
//! of registering a callback per event kind, the controller builds one
//! [`HostEventTable`] at startup and looks every incoming [`HostEvent`] up
//! in it.

use heapless::FnvIndexMap;

/// Events the hosting platform can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// Service process created.
    Create,
    /// Service asked to begin work (registers the periodic tasks).
    Control,
    /// Service is being torn down.
    Terminate,
    LowBattery,
    LowMemory,
    LanguageChanged,
    RegionFormatChanged,
}

impl HostEvent {
    pub const ALL: [HostEvent; 7] = [
        HostEvent::Create,
        HostEvent::Control,
        HostEvent::Terminate,
        HostEvent::LowBattery,
        HostEvent::LowMemory,
        HostEvent::LanguageChanged,
        HostEvent::RegionFormatChanged,
    ];
}

/// What the controller does in response to a host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Acknowledge creation.
    Create,
    /// Idle → Active: register the periodic tasks.
    Start,
    /// Active → Idle: release timers, close actuators.
    Stop,
    /// Log and report the event, nothing else.
    Notify,
}

/// Capacity of the routing table (power of two for `FnvIndexMap`).
const TABLE_CAP: usize = 8;

/// Event-kind → action mapping, built once at startup.
#[derive(Debug, Clone)]
pub struct HostEventTable {
    routes: FnvIndexMap<HostEvent, LifecycleAction, TABLE_CAP>,
}

impl HostEventTable {
    /// Empty table: every event falls through to [`LifecycleAction::Notify`].
    pub fn empty() -> Self {
        Self {
            routes: FnvIndexMap::new(),
        }
    }

    /// The standard routing: lifecycle callbacks drive the shell, system
    /// notifications are only reported.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.bind(HostEvent::Create, LifecycleAction::Create);
        table.bind(HostEvent::Control, LifecycleAction::Start);
        table.bind(HostEvent::Terminate, LifecycleAction::Stop);
        for event in [
            HostEvent::LowBattery,
            HostEvent::LowMemory,
            HostEvent::LanguageChanged,
            HostEvent::RegionFormatChanged,
        ] {
            table.bind(event, LifecycleAction::Notify);
        }
        table
    }

    /// Route `event` to `action`, replacing any earlier binding.
    pub fn bind(&mut self, event: HostEvent, action: LifecycleAction) {
        // Capacity exceeds the number of HostEvent variants, so insert
        // can only fail if the enum grows past TABLE_CAP.
        if self.routes.insert(event, action).is_err() {
            log::warn!("HostEventTable: no room to bind {:?}", event);
        }
    }

    /// Action bound to `event`.
    pub fn action_for(&self, event: HostEvent) -> LifecycleAction {
        self.routes
            .get(&event)
            .copied()
            .unwrap_or(LifecycleAction::Notify)
    }
}

impl Default for HostEventTable {
    fn default() -> Self {
        Self::standard()
    }
}
