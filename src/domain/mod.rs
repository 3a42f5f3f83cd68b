// Domain layer: message models and the transport port. No HTTP types here.

pub mod model;
pub mod ports;
