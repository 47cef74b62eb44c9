//! Fit a UI rectangle to the aspect ratio of a texture.
//!
//! Pure geometry — no pixel operations, no allocations, `no_std` compatible.
//!
//! # Modules
//!
//! - [`geometry`] — Sizes, axes, texture dimensions and the anchored [`UiRect`]
//! - [`fit`] — Fit policies and the aspect-fit computation
//! - [`fitter`] — Lifecycle adapter with the re-entrancy guard
//! - [`inspector`] — Editor-side "Refit" action (feature `inspector`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod fit;
pub mod fitter;
pub mod geometry;
#[cfg(feature = "inspector")]
pub mod inspector;

pub use fit::{
    AspectConstraint, FitError, FitPolicy, Fitted, LayoutElement, TextureAspect, Trim, fit,
    fit_aspect_to_parent_width, fit_size, fit_within_parent, parent_width_aspect, trim_within,
};
pub use fitter::{AspectFitter, FitState, RectHost, TextureSource};
pub use geometry::{Axis, Size, TextureSize, UiRect, Vec2};
