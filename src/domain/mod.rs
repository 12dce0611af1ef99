// Domain layer: models, the status expectation table and ports.

pub mod expectations;
pub mod model;
pub mod ports;
