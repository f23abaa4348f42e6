mod engine;

pub use engine::{InterventionTimer, TimerState, DEFAULT_INTERVENTION_SECS};
