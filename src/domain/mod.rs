// Domain layer: records exchanged with callers and the ports the recommender talks through.

pub mod model;
pub mod ports;
