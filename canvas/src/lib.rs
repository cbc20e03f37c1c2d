//! Scene document model and group bookkeeping for the drawing canvas.
//!
//! This crate owns the data the rest of the system reads and writes: the
//! canvas elements, the scene that holds them, and the durable group-to-
//! element mapping that outlives the canvas host's own transient grouping.
//! It performs no I/O; persistence and upload glue live in the `client`
//! crate, and the presigning HTTP service lives in the workspace root.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`element`] | Canvas element records and the image-element constructor |
//! | [`scene`] | The element list, view state, and selection helpers |
//! | [`groups`] | Durable group membership and one-way reconciliation |

pub mod element;
pub mod groups;
pub mod scene;

pub use element::{Element, ElementId};
pub use groups::{GroupError, GroupSummary, GroupTracker};
pub use scene::Scene;
