//! Headless client glue: persistence, upload, and the export pipeline.
//!
//! The interactive canvas host is out of scope; this crate owns everything
//! around it — loading and saving the scene and group mapping, debounced
//! autosave, talking to the presigning service, rasterizing a group to PNG,
//! and the end-to-end export-and-upload sequence.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Explicitly owned local persistence (`scene.json`, `groups.json`) |
//! | [`autosave`] | Debounced scene writes with cancel-and-restart semantics |
//! | [`api`] | HTTP client for the presigning service, behind a trait |
//! | [`raster`] | Rasterizer seam and the built-in block renderer |
//! | [`export`] | Best-effort export-group-to-uploaded-image pipeline |

pub mod api;
pub mod autosave;
pub mod export;
pub mod raster;
pub mod store;

pub use api::{ApiError, HttpPresignClient, PresignApi, PresignedUpload};
pub use autosave::SceneAutosaver;
pub use export::ExportPipeline;
pub use raster::{BlockRasterizer, RasterImage, Rasterizer};
pub use store::{LocalStore, StoreError};
