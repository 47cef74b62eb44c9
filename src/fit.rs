//! Aspect-fit computation for a rectangle and a texture.
//!
//! Two policies are supported. [`FitPolicy::FitWithinParentRect`] stretches the
//! rectangle to fill its parent, then shrinks one axis until the rectangle's
//! aspect matches the texture's. [`FitPolicy::FitAspectRatioToParentWidth`]
//! leaves sizing to an aspect-ratio constraint and drives the parent layout
//! element's preferred height instead.
//!
//! # Example
//!
//! ```
//! use texfit::{Size, TextureSize, fit_size};
//!
//! // 2:1 container, square texture: the horizontal axis is trimmed.
//! let size = fit_size(Size::new(200.0, 100.0), TextureSize::new(100, 100)).unwrap();
//! assert_eq!(size, Size::new(100.0, 100.0));
//! ```

#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::Float;

use crate::geometry::{Axis, Size, TextureSize, UiRect};

/// Relative tolerance for aspect comparisons.
pub const TOLERANCE: f32 = 1e-5;

/// How the rectangle is reconciled with the texture's shape.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitPolicy {
    /// Fill the parent, then trim one axis to the texture's aspect.
    #[default]
    FitWithinParentRect,
    /// Constrain the aspect ratio and size the parent layout element from it.
    FitAspectRatioToParentWidth,
}

impl TryFrom<i32> for FitPolicy {
    type Error = FitError;

    /// Decode a host-serialized policy index.
    fn try_from(raw: i32) -> Result<Self, FitError> {
        match raw {
            0 => Ok(Self::FitWithinParentRect),
            1 => Ok(Self::FitAspectRatioToParentWidth),
            other => Err(FitError::UnknownPolicy(other)),
        }
    }
}

/// Which ratio of the texture's dimensions is compared against the
/// container's height / width.
///
/// Two conventions exist for the texture side. `WidthOverHeight` is the
/// default; with it a fitted rectangle's height / width equals the texture's
/// width / height. `HeightOverWidth` makes the fitted rectangle take the
/// texture's own shape.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextureAspect {
    #[default]
    WidthOverHeight,
    HeightOverWidth,
}

impl TextureAspect {
    /// Aspect of `texture` under this convention. Empty textures yield 0.
    pub fn of(self, texture: TextureSize) -> f32 {
        if texture.is_empty() {
            return 0.0;
        }
        let (w, h) = (texture.width as f32, texture.height as f32);
        match self {
            Self::WidthOverHeight => w / h,
            Self::HeightOverWidth => h / w,
        }
    }
}

/// Parent layout element whose preferred height is driven by
/// [`FitPolicy::FitAspectRatioToParentWidth`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutElement {
    /// Explicit preferred height. `None` leaves it to the layout system.
    pub preferred_height: Option<f32>,
}

/// Outcome of trimming a container to a texture's aspect.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Trim {
    /// Aspects already match within [`TOLERANCE`]; nothing to do.
    AlreadyFits,
    /// Shrink `axis` to `size`. The other axis keeps its current size.
    Shrink { axis: Axis, size: f32 },
}

impl Trim {
    /// Apply to a plain size.
    pub fn apply(self, size: Size) -> Size {
        match self {
            Self::AlreadyFits => size,
            Self::Shrink { axis, size: v } => size.with(axis, v),
        }
    }
}

/// Values written by [`FitPolicy::FitAspectRatioToParentWidth`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AspectConstraint {
    /// Aspect ratio for the rectangle's aspect-ratio constraint.
    pub aspect_ratio: f32,
    /// Preferred height written to the parent layout element.
    pub preferred_height: f32,
}

/// Result of a successful [`fit`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fitted {
    /// [`FitPolicy::FitWithinParentRect`] result.
    Within(Trim),
    /// [`FitPolicy::FitAspectRatioToParentWidth`] result.
    Aspect(AspectConstraint),
}

/// Why a fit left the rectangle unchanged.
///
/// None of these are fatal. Callers report them and carry on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitError {
    /// No texture source was supplied.
    MissingTextureProvider,
    /// The texture source currently has no texture.
    NoTexture,
    /// Container width or height is zero, negative or not finite.
    DegenerateContainer,
    /// Texture has a zero dimension or an aspect of (nearly) zero.
    DegenerateTextureAspect,
    /// Container aspect is negligible next to the texture's.
    DegenerateTrimFactor,
    /// No parent layout element to receive a preferred height.
    MissingParentLayout,
    /// Serialized policy value with no matching [`FitPolicy`].
    UnknownPolicy(i32),
}

impl FitError {
    /// Whether this should surface as a warning rather than a quiet no-op.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::MissingTextureProvider
                | Self::DegenerateTextureAspect
                | Self::DegenerateTrimFactor
                | Self::UnknownPolicy(_)
        )
    }
}

impl core::fmt::Display for FitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingTextureProvider => f.write_str("no texture source to fit against"),
            Self::NoTexture => f.write_str("texture source has no texture"),
            Self::DegenerateContainer => f.write_str("container has no area"),
            Self::DegenerateTextureAspect => f.write_str("texture with aspect 0 not supported"),
            Self::DegenerateTrimFactor => f.write_str("trim factor 0 not supported"),
            Self::MissingParentLayout => f.write_str("no parent layout element"),
            Self::UnknownPolicy(raw) => write!(f, "unknown fit policy: {raw}"),
        }
    }
}

impl core::error::Error for FitError {}

/// `a ≈ b` within [`TOLERANCE`], relative to the larger magnitude (at least 1).
pub fn approx_eq(a: f32, b: f32) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= TOLERANCE * scale
}

/// Compute the trim that makes `container`'s height / width match the
/// texture's aspect.
pub fn trim_within(
    container: Size,
    texture: TextureSize,
    convention: TextureAspect,
) -> Result<Trim, FitError> {
    if !container.is_positive() {
        return Err(FitError::DegenerateContainer);
    }
    if texture.is_empty() {
        return Err(FitError::DegenerateTextureAspect);
    }

    let container_aspect = container.aspect();
    let texture_aspect = convention.of(texture);
    if approx_eq(container_aspect, texture_aspect) {
        return Ok(Trim::AlreadyFits);
    }
    if approx_eq(texture_aspect, 0.0) {
        return Err(FitError::DegenerateTextureAspect);
    }

    let trim = container_aspect / texture_aspect;
    if approx_eq(trim, 0.0) {
        return Err(FitError::DegenerateTrimFactor);
    }

    // Container relatively too tall: shrink height. Otherwise shrink width.
    let (axis, factor) = if trim > 1.0 {
        (Axis::Vertical, 1.0 / trim)
    } else {
        (Axis::Horizontal, trim)
    };
    Ok(Trim::Shrink {
        axis,
        size: container.along(axis) * factor,
    })
}

/// Fit a plain container size to a texture, using the default convention.
///
/// Returns the container unchanged when it already fits.
pub fn fit_size(container: Size, texture: TextureSize) -> Result<Size, FitError> {
    trim_within(container, texture, TextureAspect::default()).map(|t| t.apply(container))
}

/// [`FitPolicy::FitWithinParentRect`] on an anchored rectangle.
///
/// The rectangle is always stretched to its parent first, so even a failed
/// fit leaves it filling the parent.
pub fn fit_within_parent(
    rect: &mut UiRect,
    texture: TextureSize,
    convention: TextureAspect,
) -> Result<Trim, FitError> {
    rect.stretch_to_parent();
    let trim = trim_within(rect.size(), texture, convention)?;
    if let Trim::Shrink { axis, size } = trim {
        rect.set_size_with_current_anchors(axis, size);
    }
    Ok(trim)
}

/// Aspect ratio for [`FitPolicy::FitAspectRatioToParentWidth`], checking the
/// container and texture first.
pub fn parent_width_aspect(
    container: Size,
    texture: TextureSize,
    convention: TextureAspect,
) -> Result<f32, FitError> {
    if !(container.width > 0.0 && container.width.is_finite()) {
        return Err(FitError::DegenerateContainer);
    }
    if texture.is_empty() {
        return Err(FitError::DegenerateTextureAspect);
    }
    let aspect_ratio = convention.of(texture);
    if approx_eq(aspect_ratio, 0.0) {
        return Err(FitError::DegenerateTextureAspect);
    }
    Ok(aspect_ratio)
}

/// [`FitPolicy::FitAspectRatioToParentWidth`] on an anchored rectangle.
///
/// Stretches the rectangle, applies the aspect-ratio constraint to it (width
/// controls height), then writes the constrained height into `layout`.
pub fn fit_aspect_to_parent_width(
    rect: &mut UiRect,
    texture: TextureSize,
    layout: Option<&mut LayoutElement>,
    convention: TextureAspect,
) -> Result<AspectConstraint, FitError> {
    rect.stretch_to_parent();
    let aspect_ratio = parent_width_aspect(rect.size(), texture, convention)?;
    let Some(layout) = layout else {
        return Err(FitError::MissingParentLayout);
    };
    rect.fit_height_to_width(aspect_ratio);
    let preferred_height = rect.size().height;
    layout.preferred_height = Some(preferred_height);
    Ok(AspectConstraint {
        aspect_ratio,
        preferred_height,
    })
}

/// Fit `rect` to `texture` under `policy`.
///
/// `layout` is only consulted by [`FitPolicy::FitAspectRatioToParentWidth`].
pub fn fit(
    rect: &mut UiRect,
    texture: TextureSize,
    policy: FitPolicy,
    layout: Option<&mut LayoutElement>,
    convention: TextureAspect,
) -> Result<Fitted, FitError> {
    match policy {
        FitPolicy::FitWithinParentRect => {
            fit_within_parent(rect, texture, convention).map(Fitted::Within)
        }
        FitPolicy::FitAspectRatioToParentWidth => {
            fit_aspect_to_parent_width(rect, texture, layout, convention).map(Fitted::Aspect)
        }
    }
}
