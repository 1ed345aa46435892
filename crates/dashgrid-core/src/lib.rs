#![forbid(unsafe_code)]

//! Core: grid geometry and the widget model.
//!
//! # Role in dashgrid
//! `dashgrid-core` holds the value types every other crate speaks: grid
//! rectangles ([`GridPosition`]), footprints ([`GridSize`]), signed drop
//! targets ([`GridPoint`]), pixel rectangles for the rendering boundary, and
//! the [`Widget`] record the dashboard application hands to the engine.
//!
//! # How it fits in the system
//! `dashgrid-layout` consumes these types to build occupancy grids and plan
//! moves; the facade crate `dashgrid` re-exports them.

pub mod geometry;
pub mod widget;

pub use geometry::{GridPoint, GridPosition, GridSize, PixelRect};
pub use widget::{Widget, WidgetError, WidgetId};
