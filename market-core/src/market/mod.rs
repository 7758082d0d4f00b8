pub mod equilibrium;
pub mod surplus;

pub use equilibrium::*;
pub use surplus::*;
