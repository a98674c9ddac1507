// Domain layer: backend records, value types and the location port.

pub mod model;
pub mod ports;
