//! Lifecycle adapter: keeps a host rectangle fitted to a texture source.
//!
//! The host forwards three callbacks: [`AspectFitter::start`] once, then
//! [`AspectFitter::on_texture_changed`] and [`AspectFitter::on_dimensions_changed`]
//! as they happen. Applying a fit changes the rectangle's dimensions, and most
//! hosts report that synchronously, so a dimensions-changed notification that
//! arrives while a fit is being applied is dropped instead of starting another.
//!
//! # Example
//!
//! ```
//! use texfit::{AspectFitter, RectHost, Size, TextureSize, UiRect};
//!
//! struct Panel(UiRect);
//!
//! impl RectHost for Panel {
//!     fn rect(&self) -> UiRect {
//!         self.0
//!     }
//!     fn set_rect(&mut self, rect: UiRect) {
//!         self.0 = rect;
//!     }
//! }
//!
//! let mut panel = Panel(UiRect::filling(Size::new(200.0, 100.0)));
//! let fitter = AspectFitter::new(TextureSize::new(64, 64));
//! fitter.start(&mut panel).unwrap();
//! assert_eq!(panel.0.size(), Size::new(100.0, 100.0));
//! ```

use core::cell::Cell;

use crate::fit::{
    self, AspectConstraint, FitError, FitPolicy, Fitted, LayoutElement, TextureAspect,
};
use crate::geometry::{TextureSize, UiRect};

/// Supplies the texture the rectangle is fitted to.
pub trait TextureSource {
    /// Current texture dimensions, or `None` when no texture is assigned.
    fn texture(&self) -> Option<TextureSize>;

    /// Whether the host will deliver change notifications for this source.
    ///
    /// Sources that never change return `false`; the fitter then ignores
    /// [`AspectFitter::on_texture_changed`].
    fn notifies_changes(&self) -> bool {
        true
    }
}

impl TextureSource for TextureSize {
    fn texture(&self) -> Option<TextureSize> {
        Some(*self)
    }

    fn notifies_changes(&self) -> bool {
        false
    }
}

impl TextureSource for Option<TextureSize> {
    fn texture(&self) -> Option<TextureSize> {
        *self
    }

    fn notifies_changes(&self) -> bool {
        false
    }
}

impl TextureSource for Cell<Option<TextureSize>> {
    fn texture(&self) -> Option<TextureSize> {
        self.get()
    }
}

impl<S: TextureSource + ?Sized> TextureSource for &S {
    fn texture(&self) -> Option<TextureSize> {
        (**self).texture()
    }

    fn notifies_changes(&self) -> bool {
        (**self).notifies_changes()
    }
}

/// The rectangle being fitted, as seen through the host UI framework.
pub trait RectHost {
    /// Current rectangle.
    fn rect(&self) -> UiRect;

    /// Replace the rectangle.
    ///
    /// Hosts may call [`AspectFitter::on_dimensions_changed`] from here.
    fn set_rect(&mut self, rect: UiRect);

    /// Layout element on the parent, if any.
    fn parent_layout(&mut self) -> Option<&mut LayoutElement> {
        None
    }

    /// Set the rectangle's aspect-ratio constraint (width / height, width
    /// controls height), adding one if missing.
    ///
    /// The default applies the constraint once through [`set_rect`](Self::set_rect).
    /// Hosts with their own constraint component override this; the fitter
    /// reads the rectangle back afterwards.
    fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        let mut rect = self.rect();
        rect.fit_height_to_width(aspect_ratio);
        if rect != self.rect() {
            self.set_rect(rect);
        }
    }

    /// Human-readable location used in diagnostics.
    fn path(&self) -> &str {
        "<rect>"
    }
}

/// Whether a fit is currently being applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitState {
    #[default]
    Idle,
    FittingInProgress,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PolicySetting {
    Known(FitPolicy),
    Unknown(i32),
}

/// Marks the fitter busy for the lifetime of the value.
struct InProgress<'a>(&'a Cell<FitState>);

impl<'a> InProgress<'a> {
    fn enter(state: &'a Cell<FitState>) -> Self {
        state.set(FitState::FittingInProgress);
        Self(state)
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.set(FitState::Idle);
    }
}

/// Fits a host rectangle to the texture of an injected [`TextureSource`].
///
/// All entry points take `&self` so the host can call back into the fitter
/// while a fit is being applied.
#[derive(Debug)]
pub struct AspectFitter<S> {
    source: Option<S>,
    policy: PolicySetting,
    convention: TextureAspect,
    state: Cell<FitState>,
    subscribed: Cell<bool>,
}

impl<S: TextureSource> AspectFitter<S> {
    /// Fitter reading textures from `source`.
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            ..Self::without_source()
        }
    }

    /// Fitter with no texture source. Every refit reports
    /// [`FitError::MissingTextureProvider`] until one is set.
    pub fn without_source() -> Self {
        Self {
            source: None,
            policy: PolicySetting::Known(FitPolicy::default()),
            convention: TextureAspect::default(),
            state: Cell::new(FitState::Idle),
            subscribed: Cell::new(false),
        }
    }

    /// Set the fit policy.
    pub fn with_policy(mut self, policy: FitPolicy) -> Self {
        self.set_policy(policy);
        self
    }

    /// Set the texture aspect convention.
    pub fn with_texture_aspect(mut self, convention: TextureAspect) -> Self {
        self.convention = convention;
        self
    }

    pub fn set_policy(&mut self, policy: FitPolicy) {
        self.policy = PolicySetting::Known(policy);
    }

    /// Set the policy from a host-serialized index.
    ///
    /// Unknown values are kept and reported as [`FitError::UnknownPolicy`]
    /// on every fit.
    pub fn set_policy_raw(&mut self, raw: i32) {
        self.policy = match FitPolicy::try_from(raw) {
            Ok(p) => PolicySetting::Known(p),
            Err(_) => PolicySetting::Unknown(raw),
        };
    }

    /// The configured policy.
    pub fn policy(&self) -> Result<FitPolicy, FitError> {
        match self.policy {
            PolicySetting::Known(p) => Ok(p),
            PolicySetting::Unknown(raw) => Err(FitError::UnknownPolicy(raw)),
        }
    }

    pub fn texture_aspect(&self) -> TextureAspect {
        self.convention
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Install or replace the texture source.
    pub fn set_source(&mut self, source: S) {
        self.source = Some(source);
    }

    pub fn state(&self) -> FitState {
        self.state.get()
    }

    /// Whether texture-change notifications are being acted on.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.get()
    }

    /// Subscribe to texture changes (when the source supports it) and fit once.
    pub fn start<H: RectHost + ?Sized>(&self, host: &mut H) -> Result<Fitted, FitError> {
        if let Some(source) = &self.source
            && source.notifies_changes()
        {
            self.subscribed.set(true);
        }
        self.refit(host)
    }

    /// Fit to the source's current texture.
    pub fn refit<H: RectHost + ?Sized>(&self, host: &mut H) -> Result<Fitted, FitError> {
        let Some(source) = &self.source else {
            return report(host, Err(FitError::MissingTextureProvider));
        };
        let Some(texture) = source.texture() else {
            return report(host, Err(FitError::NoTexture));
        };
        self.fit_texture(host, texture)
    }

    /// Texture-changed callback. `None` until [`start`](Self::start) subscribed.
    pub fn on_texture_changed<H: RectHost + ?Sized>(
        &self,
        host: &mut H,
    ) -> Option<Result<Fitted, FitError>> {
        if !self.subscribed.get() {
            return None;
        }
        Some(self.refit(host))
    }

    /// Dimensions-changed callback. `None` when the change came from a fit
    /// that is still being applied.
    pub fn on_dimensions_changed<H: RectHost + ?Sized>(
        &self,
        host: &mut H,
    ) -> Option<Result<Fitted, FitError>> {
        if self.state.get() == FitState::FittingInProgress {
            return None;
        }
        Some(self.refit(host))
    }

    /// Fit the host rectangle to `texture` under the configured policy.
    ///
    /// The fitter is [`FitState::FittingInProgress`] for the duration of the
    /// call, including any host callbacks triggered by applying the result.
    pub fn fit_texture<H: RectHost + ?Sized>(
        &self,
        host: &mut H,
        texture: TextureSize,
    ) -> Result<Fitted, FitError> {
        let _busy = InProgress::enter(&self.state);

        let policy = match self.policy() {
            Ok(p) => p,
            Err(e) => return report(host, Err(e)),
        };

        let result = match policy {
            FitPolicy::FitWithinParentRect => self.fit_within(host, texture),
            FitPolicy::FitAspectRatioToParentWidth => self.fit_parent_width(host, texture),
        };
        report(host, result)
    }

    fn fit_within<H: RectHost + ?Sized>(
        &self,
        host: &mut H,
        texture: TextureSize,
    ) -> Result<Fitted, FitError> {
        let before = host.rect();
        let mut rect = before;
        let result = fit::fit_within_parent(&mut rect, texture, self.convention);
        // The stretch happens even when the fit bails out.
        if rect != before {
            host.set_rect(rect);
        }
        result.map(Fitted::Within)
    }

    fn fit_parent_width<H: RectHost + ?Sized>(
        &self,
        host: &mut H,
        texture: TextureSize,
    ) -> Result<Fitted, FitError> {
        let before = host.rect();
        let mut rect = before;
        rect.stretch_to_parent();
        if rect != before {
            host.set_rect(rect);
        }

        let aspect_ratio = fit::parent_width_aspect(host.rect().size(), texture, self.convention)?;
        if host.parent_layout().is_none() {
            return Err(FitError::MissingParentLayout);
        }

        // Constraint first, then the parent follows the constrained height.
        host.set_aspect_ratio(aspect_ratio);
        let preferred_height = host.rect().size().height;
        if let Some(layout) = host.parent_layout() {
            layout.preferred_height = Some(preferred_height);
        }
        Ok(Fitted::Aspect(AspectConstraint {
            aspect_ratio,
            preferred_height,
        }))
    }
}

fn report<H: RectHost + ?Sized>(
    host: &H,
    result: Result<Fitted, FitError>,
) -> Result<Fitted, FitError> {
    if cfg!(debug_assertions) {
        match &result {
            Ok(fitted) => log::trace!("[{}] fitted: {:?}", host.path(), fitted),
            Err(e) if e.is_warning() => log::warn!("[{}] {}", host.path(), e),
            Err(e) => log::debug!("[{}] fit skipped: {}", host.path(), e),
        }
    }
    result
}
