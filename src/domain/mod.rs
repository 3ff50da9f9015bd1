// Domain layer: content entities and ports (interfaces).

pub mod model;
pub mod ports;
