pub mod aac;
pub mod countdown;
pub mod phase_cycle;
pub mod placement;
pub mod quiz;
pub mod schedule;
