//! Output rendering

pub mod formatter;
