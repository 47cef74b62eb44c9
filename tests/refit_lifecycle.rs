//! Host-driven lifecycle with synchronous dimension notifications.
//!
//! The host below behaves like a retained-mode UI: every size change is
//! reported back to the fitter from inside `set_rect`, before `set_rect`
//! returns. A fit must not recurse through that notification.

use std::cell::Cell;

use texfit::*;

type Source<'a> = &'a Cell<Option<TextureSize>>;

struct Host<'f> {
    rect: UiRect,
    layout: Option<LayoutElement>,
    aspect: Option<f32>,
    /// Whether the aspect constraint resizes the rect (width controls height).
    constrain_height: bool,
    fitter: Option<&'f AspectFitter<Source<'f>>>,
    /// Outcome of each dimensions-changed notification delivered to the fitter.
    notifications: Vec<Option<Result<Fitted, FitError>>>,
    depth: u32,
    max_depth: u32,
}

impl<'f> Host<'f> {
    fn new(parent: Size) -> Self {
        Self {
            rect: UiRect::filling(parent),
            layout: None,
            aspect: None,
            constrain_height: false,
            fitter: None,
            notifications: Vec::new(),
            depth: 0,
            max_depth: 0,
        }
    }

    /// Host-side resize, e.g. the parent was resized by the layout system.
    fn resize_parent(&mut self, parent: Size) {
        let mut rect = self.rect;
        rect.parent = parent;
        self.set_rect(rect);
    }
}

impl RectHost for Host<'_> {
    fn rect(&self) -> UiRect {
        self.rect
    }

    fn set_rect(&mut self, rect: UiRect) {
        let changed = rect.size() != self.rect.size();
        self.rect = rect;
        if changed && let Some(fitter) = self.fitter {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
            let outcome = fitter.on_dimensions_changed(self);
            self.notifications.push(outcome);
            self.depth -= 1;
        }
    }

    fn parent_layout(&mut self) -> Option<&mut LayoutElement> {
        self.layout.as_mut()
    }

    fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect = Some(aspect_ratio);
        if self.constrain_height {
            let mut rect = self.rect;
            rect.fit_height_to_width(aspect_ratio);
            self.set_rect(rect);
        }
    }

    fn path(&self) -> &str {
        "Canvas/Panel/Image"
    }
}

#[test]
fn notification_during_fit_is_suppressed() {
    let texture = Cell::new(Some(TextureSize::new(100, 100)));
    let fitter = AspectFitter::new(&texture);
    let mut host = Host::new(Size::new(200.0, 100.0));
    host.fitter = Some(&fitter);

    let out = fitter.start(&mut host).unwrap();
    assert!(matches!(out, Fitted::Within(Trim::Shrink { .. })));
    assert_eq!(host.rect.size(), Size::new(100.0, 100.0));

    // The fit's own resize was reported once and ignored.
    assert_eq!(host.notifications, vec![None]);
    assert_eq!(host.max_depth, 1);
    assert_eq!(fitter.state(), FitState::Idle);
}

#[test]
fn external_resize_triggers_refit() {
    let texture = Cell::new(Some(TextureSize::new(100, 100)));
    let fitter = AspectFitter::new(&texture);
    let mut host = Host::new(Size::new(200.0, 100.0));
    host.fitter = Some(&fitter);
    fitter.start(&mut host).unwrap();
    host.notifications.clear();

    // Trimmed width carries over: the rect becomes 200×400 before the refit.
    host.resize_parent(Size::new(300.0, 400.0));

    // Outer notification refits; the refit's own resize is swallowed.
    assert_eq!(host.rect.size(), Size::new(300.0, 300.0));
    assert_eq!(host.notifications.len(), 2);
    assert_eq!(host.notifications[0], None);
    assert!(matches!(host.notifications[1], Some(Ok(_))));
    assert_eq!(host.max_depth, 2);
}

#[test]
fn texture_change_refits_once() {
    let texture = Cell::new(Some(TextureSize::new(100, 100)));
    let fitter = AspectFitter::new(&texture);
    let mut host = Host::new(Size::new(200.0, 100.0));
    host.fitter = Some(&fitter);
    fitter.start(&mut host).unwrap();
    host.notifications.clear();

    texture.set(Some(TextureSize::new(400, 100)));
    let out = fitter.on_texture_changed(&mut host).unwrap().unwrap();

    // container 0.5 vs texture 4.0 → width 200 * 0.125
    assert_eq!(
        out,
        Fitted::Within(Trim::Shrink {
            axis: Axis::Horizontal,
            size: 25.0
        })
    );
    assert_eq!(host.rect.size(), Size::new(25.0, 100.0));
    assert!(host.notifications.iter().all(Option::is_none));
}

#[test]
fn removed_texture_leaves_rect_alone() {
    let texture = Cell::new(Some(TextureSize::new(100, 100)));
    let fitter = AspectFitter::new(&texture);
    let mut host = Host::new(Size::new(200.0, 100.0));
    host.fitter = Some(&fitter);
    fitter.start(&mut host).unwrap();
    let fitted = host.rect;

    texture.set(None);
    assert_eq!(
        fitter.on_texture_changed(&mut host),
        Some(Err(FitError::NoTexture))
    );
    assert_eq!(host.rect, fitted);
}

#[test]
fn repeated_refits_are_stable() {
    let texture = Cell::new(Some(TextureSize::new(1920, 1080)));
    let fitter = AspectFitter::new(&texture);
    let mut host = Host::new(Size::new(1280.0, 1024.0));
    host.fitter = Some(&fitter);
    fitter.start(&mut host).unwrap();
    let first = host.rect;
    host.notifications.clear();

    fitter.refit(&mut host).unwrap();
    fitter.refit(&mut host).unwrap();
    assert_eq!(host.rect, first);
    assert!(host.notifications.is_empty());
}

#[test]
fn zero_width_parent_is_noop() {
    let texture = Cell::new(Some(TextureSize::new(100, 100)));
    let fitter = AspectFitter::new(&texture);
    let mut host = Host::new(Size::new(0.0, 100.0));
    host.fitter = Some(&fitter);
    let before = host.rect;

    assert_eq!(
        fitter.start(&mut host),
        Err(FitError::DegenerateContainer)
    );
    assert_eq!(host.rect, before);
    assert!(host.notifications.is_empty());
}

#[test]
fn aspect_policy_drives_parent_layout() {
    let texture = Cell::new(Some(TextureSize::new(300, 150)));
    let fitter = AspectFitter::new(&texture).with_policy(FitPolicy::FitAspectRatioToParentWidth);
    let mut host = Host::new(Size::new(640.0, 200.0));
    host.layout = Some(LayoutElement::default());
    host.rect = UiRect::fixed(Size::new(640.0, 200.0), Size::new(10.0, 10.0));
    host.fitter = Some(&fitter);

    let out = fitter.start(&mut host).unwrap();
    assert_eq!(
        out,
        Fitted::Aspect(AspectConstraint {
            aspect_ratio: 2.0,
            preferred_height: 200.0
        })
    );
    assert!(host.rect.is_stretched());
    assert_eq!(host.aspect, Some(2.0));
    assert_eq!(
        host.layout.map(|l| l.preferred_height),
        Some(Some(200.0))
    );
    // The stretch was reported but did not recurse.
    assert_eq!(host.notifications, vec![None]);
}

#[test]
fn preferred_height_follows_constrained_rect() {
    let texture = Cell::new(Some(TextureSize::new(300, 150)));
    let fitter = AspectFitter::new(&texture).with_policy(FitPolicy::FitAspectRatioToParentWidth);
    let mut host = Host::new(Size::new(640.0, 200.0));
    host.layout = Some(LayoutElement::default());
    host.constrain_height = true;
    host.fitter = Some(&fitter);

    let out = fitter.start(&mut host).unwrap();

    // 640 wide at 2:1 → 320 tall; the parent takes the constrained height.
    assert_eq!(host.rect.size(), Size::new(640.0, 320.0));
    assert_eq!(
        host.layout.map(|l| l.preferred_height),
        Some(Some(host.rect.size().height))
    );
    assert_eq!(
        out,
        Fitted::Aspect(AspectConstraint {
            aspect_ratio: 2.0,
            preferred_height: 320.0
        })
    );
    // The constraint's resize was reported inside the fit and ignored.
    assert_eq!(host.notifications, vec![None]);
    assert_eq!(fitter.state(), FitState::Idle);
}
