// Domain layer: core models and ports (interfaces). No behavior beyond
// parsing/derivation; the stateful components live under core.

pub mod model;
pub mod ports;
