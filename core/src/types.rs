//! Shared primitive types used across the staffing core.

/// A market's country label, e.g. "Spain".
pub type Country = String;

/// A contact channel label, e.g. "Phone" or "Chat".
pub type Channel = String;

/// Offset into the forecast horizon. Day 1 is the first projected day.
pub type DayIndex = u32;
