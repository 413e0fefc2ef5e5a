//! Drawing-surface lifecycle.
//!
//! A [`RenderBackend`] owns whatever device resources back the window. The
//! [`FramePresenter`] creates them lazily on the first paint, recreates them
//! after they were lost, and releases them when it is dropped.

use crate::frame::build_frame;
use crate::renderer::{DrawCommand, RenderContext, RenderResult, RendererError};

/// Device-specific side of presenting a frame.
pub trait RenderBackend {
    /// Create the drawing surface. Called only when none exists.
    fn acquire_surface(&mut self) -> RenderResult<()>;

    /// Drop the drawing surface and everything derived from it.
    fn release_surface(&mut self);

    /// Whether a drawing surface currently exists.
    fn has_surface(&self) -> bool;

    /// Resize an existing surface to `width` x `height` physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Issue one frame worth of commands.
    ///
    /// Returns [`RendererError::SurfaceLost`] when the surface became invalid
    /// while drawing, and [`RendererError::SurfaceOutdated`] when it survived
    /// but had to be reconfigured before it can be drawn to again.
    fn draw(&mut self, ctx: &RenderContext, commands: &[DrawCommand]) -> RenderResult<()>;
}

/// What happened to a frame handed to [`FramePresenter::paint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was drawn and presented.
    Presented,
    /// The frame was skipped because the surface was lost or outdated.
    Abandoned,
}

/// Drives a [`RenderBackend`] through acquire, draw and release.
pub struct FramePresenter<B: RenderBackend> {
    backend: B,
    surfaces_lost: u64,
}

impl<B: RenderBackend> FramePresenter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            surfaces_lost: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Times the surface was lost so far.
    pub fn surfaces_lost(&self) -> u64 {
        self.surfaces_lost
    }

    /// Build and draw one frame.
    ///
    /// Creates the surface first if there is none. A lost surface is released
    /// and the frame abandoned. An outdated surface is kept and only the frame
    /// is abandoned. Any other backend error is returned.
    pub fn paint(&mut self, ctx: &RenderContext) -> RenderResult<FrameOutcome> {
        if !self.backend.has_surface() {
            log::debug!("Acquiring drawing surface");
            self.backend.acquire_surface()?;
        }

        let commands = build_frame(ctx);
        match self.backend.draw(ctx, &commands) {
            Ok(()) => Ok(FrameOutcome::Presented),
            Err(RendererError::SurfaceLost) => {
                self.surface_lost();
                Ok(FrameOutcome::Abandoned)
            }
            Err(RendererError::SurfaceOutdated) => {
                log::debug!("Drawing surface outdated, skipping frame");
                Ok(FrameOutcome::Abandoned)
            }
            Err(err) => Err(err),
        }
    }

    /// Forward a resize to the surface, if one exists.
    ///
    /// Without a surface this is a no-op; the next paint creates one at the
    /// current size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.backend.has_surface() {
            self.backend.resize(width, height);
        }
    }

    /// Release the surface after the device reported it lost.
    pub fn surface_lost(&mut self) {
        log::warn!("Drawing surface lost, releasing device resources");
        self.surfaces_lost += 1;
        self.backend.release_surface();
    }
}

impl<B: RenderBackend> Drop for FramePresenter<B> {
    fn drop(&mut self) {
        if self.backend.has_surface() {
            self.backend.release_surface();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use shapepad_core::canvas::Canvas;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        acquired: usize,
        released: usize,
        resized: Vec<(u32, u32)>,
        drawn: Vec<usize>,
        /// Error returned by the next draw instead of drawing.
        fail_next_draw: Option<RendererError>,
    }

    struct MockBackend {
        log: Rc<RefCell<Log>>,
        surface: bool,
        fail_acquire: bool,
    }

    impl MockBackend {
        fn new(log: Rc<RefCell<Log>>) -> Self {
            Self {
                log,
                surface: false,
                fail_acquire: false,
            }
        }
    }

    impl RenderBackend for MockBackend {
        fn acquire_surface(&mut self) -> RenderResult<()> {
            if self.fail_acquire {
                return Err(RendererError::InitFailed("no adapter".into()));
            }
            self.log.borrow_mut().acquired += 1;
            self.surface = true;
            Ok(())
        }

        fn release_surface(&mut self) {
            self.log.borrow_mut().released += 1;
            self.surface = false;
        }

        fn has_surface(&self) -> bool {
            self.surface
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.log.borrow_mut().resized.push((width, height));
        }

        fn draw(&mut self, _ctx: &RenderContext, commands: &[DrawCommand]) -> RenderResult<()> {
            let mut log = self.log.borrow_mut();
            if let Some(err) = log.fail_next_draw.take() {
                return Err(err);
            }
            log.drawn.push(commands.len());
            Ok(())
        }
    }

    #[test]
    fn test_first_paint_acquires_once() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut presenter = FramePresenter::new(MockBackend::new(log.clone()));
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(100.0, 100.0));

        assert_eq!(presenter.paint(&ctx).unwrap(), FrameOutcome::Presented);
        assert_eq!(presenter.paint(&ctx).unwrap(), FrameOutcome::Presented);
        assert_eq!(log.borrow().acquired, 1);
        assert_eq!(log.borrow().drawn.len(), 2);
    }

    #[test]
    fn test_surface_lost_recreates_on_next_paint() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut presenter = FramePresenter::new(MockBackend::new(log.clone()));
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(100.0, 100.0));

        presenter.paint(&ctx).unwrap();
        log.borrow_mut().fail_next_draw = Some(RendererError::SurfaceLost);
        assert_eq!(presenter.paint(&ctx).unwrap(), FrameOutcome::Abandoned);
        assert!(!presenter.backend().has_surface());
        assert_eq!(log.borrow().released, 1);

        assert_eq!(presenter.paint(&ctx).unwrap(), FrameOutcome::Presented);
        assert_eq!(log.borrow().acquired, 2);
        assert_eq!(presenter.surfaces_lost(), 1);
        assert_eq!(log.borrow().drawn.len(), 2);
    }

    #[test]
    fn test_outdated_surface_is_kept() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut presenter = FramePresenter::new(MockBackend::new(log.clone()));
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(100.0, 100.0));

        presenter.paint(&ctx).unwrap();
        log.borrow_mut().fail_next_draw = Some(RendererError::SurfaceOutdated);
        assert_eq!(presenter.paint(&ctx).unwrap(), FrameOutcome::Abandoned);
        assert!(presenter.backend().has_surface());
        assert_eq!(log.borrow().released, 0);
        assert_eq!(presenter.surfaces_lost(), 0);

        assert_eq!(presenter.paint(&ctx).unwrap(), FrameOutcome::Presented);
        assert_eq!(log.borrow().acquired, 1);
        assert_eq!(log.borrow().drawn.len(), 2);
    }

    #[test]
    fn test_other_draw_errors_are_returned() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut presenter = FramePresenter::new(MockBackend::new(log.clone()));
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(100.0, 100.0));

        log.borrow_mut().fail_next_draw = Some(RendererError::Surface("Timeout".into()));
        assert!(matches!(
            presenter.paint(&ctx),
            Err(RendererError::Surface(_))
        ));
        assert!(presenter.backend().has_surface());
    }

    #[test]
    fn test_resize_without_surface_is_ignored() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut presenter = FramePresenter::new(MockBackend::new(log.clone()));
        presenter.resize(640, 480);
        assert!(log.borrow().resized.is_empty());

        let canvas = Canvas::new();
        presenter
            .paint(&RenderContext::new(&canvas, Size::new(10.0, 10.0)))
            .unwrap();
        presenter.resize(640, 480);
        assert_eq!(log.borrow().resized, vec![(640, 480)]);
    }

    #[test]
    fn test_acquire_failure_is_reported() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut backend = MockBackend::new(log.clone());
        backend.fail_acquire = true;
        let mut presenter = FramePresenter::new(backend);
        let canvas = Canvas::new();

        let result = presenter.paint(&RenderContext::new(&canvas, Size::new(10.0, 10.0)));
        assert!(matches!(result, Err(RendererError::InitFailed(_))));
        assert!(log.borrow().drawn.is_empty());
    }

    #[test]
    fn test_drop_releases_surface() {
        let log = Rc::new(RefCell::new(Log::default()));
        {
            let mut presenter = FramePresenter::new(MockBackend::new(log.clone()));
            let canvas = Canvas::new();
            presenter
                .paint(&RenderContext::new(&canvas, Size::new(10.0, 10.0)))
                .unwrap();
        }
        assert_eq!(log.borrow().released, 1);

        // Never painted: nothing to release
        drop(FramePresenter::new(MockBackend::new(log.clone())));
        assert_eq!(log.borrow().released, 1);
    }

    #[test]
    fn test_draw_receives_full_frame() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut presenter = FramePresenter::new(MockBackend::new(log.clone()));
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::ZERO);
        presenter.paint(&ctx).unwrap();
        assert_eq!(log.borrow().drawn, vec![1]);
    }
}
