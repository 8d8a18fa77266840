//! Transport-neutral event and message model plus the outbound port.

pub mod port;
pub mod types;
