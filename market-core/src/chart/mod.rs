pub mod figure;
pub mod geometry;
pub mod style;

pub use figure::*;
pub use geometry::*;
pub use style::*;
