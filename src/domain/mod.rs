// Domain layer: value types, unit enums and ports (interfaces).

pub mod model;
pub mod ports;
pub mod units;
