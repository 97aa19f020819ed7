//! Document elements bound from scene nodes
//!
//! [`TikzPicture`] is the root. It owns the export context and the
//! [`AxisElement`], which in turn owns one element per bound plot.

mod axis;
mod binder;
mod error_bar;
mod picture;
mod plot;
mod surface;

pub use axis::*;
pub use binder::*;
pub use error_bar::*;
pub use picture::*;
pub use plot::*;
pub use surface::*;
