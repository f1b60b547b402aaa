// Domain layer: request/reply models and the ports the engine depends on.

pub mod model;
pub mod ports;
