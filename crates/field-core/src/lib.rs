//! Platform-independent core of the particle field background.
//!
//! Nothing in here touches browser APIs: drawing, frame scheduling and timers
//! are reached through the small traits in [`render`] and [`surface`], which
//! the web front-end implements on top of Canvas 2D and the window.

pub mod constants;
pub mod error;
pub mod field;
pub mod options;
pub mod particle;
pub mod population;
pub mod proximity;
pub mod reactor;
pub mod render;
pub mod surface;

pub use error::FieldError;
pub use field::*;
pub use options::*;
pub use particle::*;
pub use population::*;
pub use proximity::*;
pub use reactor::*;
pub use render::*;
pub use surface::*;
