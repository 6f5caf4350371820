// Domain layer: the intake form as typed data, and the ports its adapters implement.

pub mod model;
pub mod ports;
