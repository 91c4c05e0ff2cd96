// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]

//! Responsive multi-model 3D showcase viewport built on wgpu.
//!
//! Vitrine loads a fixed lineup of glTF models, lays them out in a row on
//! wide screens or one at a time on phones, lets the user drag a model to
//! rotate it, and eases a tilted model back to level after a short idle.
//! A decorative marquee ticker runs on its own frame loop beside the
//! viewport.
//!
//! # Key entry points
//!
//! - [`engine::Showcase`] - the mounted viewport: loading, input, frames
//! - [`engine::SceneRenderer`] - the drawing seam; [`gpu::MeshRenderer`]
//!   is the wgpu implementation
//! - [`options::Options`] - camera, layout, motion, lighting, and the asset
//!   lineup
//! - [`layout::LayoutEngine`] - pure row / single-model placement
//!
//! # Architecture
//!
//! Each model is decoded on its own background thread by a
//! [`asset::ModelLoader`]; results are drained on the owning thread once
//! per frame by [`asset::ModelRepository::poll`]. Everything else
//! (layout, selection, drag and idle state, GPU uploads) lives on that one
//! thread. The host drives [`engine::Showcase::on_frame`] from its refresh
//! signal and forwards [`input::InputEvent`]s to
//! [`engine::Showcase::handle_event`].

pub mod animation;
pub mod asset;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod marquee;
pub mod options;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
pub mod viewport;

pub use engine::{SceneRenderer, Showcase, SurfaceSize};
pub use error::VitrineError;
pub use gpu::MeshRenderer;
pub use input::{InputEvent, NavDirection, PointerKind};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
