//! Two-dimensional signed distance fields from small analytical primitives.
//!
//! A [`Scene`] holds objects; an [`Object`] holds a pool of primitives
//! (constant scalars, half-planes, circles) and a flat, strictly
//! forward-referencing list of combinators (`min` / `max` / `neg`) over
//! them. Evaluating an object at a point returns a signed scalar distance,
//! negative inside and positive outside, suitable for anti-aliased
//! rasterization, collision queries, or texture baking.
//!
//! # Pipeline overview
//!
//! 1. **Build**: append primitives and operations to an [`Object`], or load
//!    a scene from the compact binary container ([`load_from_file`]).
//! 2. **Evaluate**: [`evaluate_object`] resolves the operation list in one
//!    linear sweep per query point; [`evaluate_primitive`] answers for a
//!    single shape. Both are pure and reentrant.
//! 3. **Rasterize** (optional): [`rasterize_object`] samples a pixel grid,
//!    grayscale or LCD-subpixel, rows in parallel.
//! 4. **Store** (optional): [`store_to_file`] writes the same container the
//!    loader reads.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Total evaluation**: malformed operation graphs produce NaN, never a
//!   panic; empty objects evaluate to `+inf`.
//! - **Stable container**: little-endian, tightly packed, gated by magic and
//!   version; scale is not serialized in version 0.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encode;
mod eval;
mod foundation;
mod render;
mod scene;

pub use encode::binary::{MAGIC, VERSION, load_from_file, scene_from_bytes, scene_to_bytes, store_to_file};
pub use eval::evaluator::{evaluate_object, evaluate_object_with_scratch, evaluate_primitive};
pub use foundation::error::{SdfError, SdfResult};
pub use foundation::math::Vec2;
pub use render::raster::{FrameRgba, RasterSettings, rasterize_object};
pub use scene::model::{ArgIndex, OpKind, Object, Operation, Scene};
pub use scene::primitive::{Circle, Ellipse, Plane, Primitive};
