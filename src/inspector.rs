//! Editor-side helpers: the "Refit" button and component setup.
//!
//! Thin wrappers over [`AspectFitter`]'s public entry points for inspector
//! panels. Enabled by the `inspector` feature.

use crate::fit::{FitError, Fitted};
use crate::fitter::{AspectFitter, RectHost, TextureSource};

/// A manual refit action for an inspector panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RefitButton {
    pub label: &'static str,
}

impl Default for RefitButton {
    fn default() -> Self {
        Self { label: "Refit" }
    }
}

impl RefitButton {
    /// Handle one inspector frame. Refits only when `clicked`.
    pub fn show<S, H>(
        &self,
        clicked: bool,
        fitter: &AspectFitter<S>,
        host: &mut H,
    ) -> Option<Result<Fitted, FitError>>
    where
        S: TextureSource,
        H: RectHost + ?Sized,
    {
        clicked.then(|| fitter.refit(host))
    }
}

/// Install a texture source built by `make` if the fitter has none.
///
/// Returns `true` when a source was added.
pub fn ensure_texture_source<S: TextureSource>(
    fitter: &mut AspectFitter<S>,
    make: impl FnOnce() -> S,
) -> bool {
    if fitter.source().is_some() {
        return false;
    }
    fitter.set_source(make());
    true
}

/// Restore the rectangle to fill its parent, as when the component is first
/// added in the editor.
pub fn reset_rect<H: RectHost + ?Sized>(host: &mut H) {
    let mut rect = host.rect();
    if !rect.is_stretched() {
        rect.stretch_to_parent();
        host.set_rect(rect);
    }
}
