//! Authentication: provider port and error translation

pub mod messages;
pub mod ports;
