//! Concrete calendar implementations and the process-wide calendar registry.

pub mod file_calendar;
pub mod registry;
pub mod target;
pub mod united_states;

pub use file_calendar::FileCalendar;
pub use target::Target;
pub use united_states::{UnitedStatesNyse, UnitedStatesSettlement};
