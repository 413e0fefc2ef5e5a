use kurbo::{Point, Size};
use shapepad_core::{Canvas, ClockTime, Mode, SerializableColor};
use shapepad_render::{
    DrawCommand, FrameOutcome, FramePresenter, GridStyle, RenderBackend, RenderContext,
    RenderResult, RendererError, build_frame,
};

struct CountingBackend {
    surface: bool,
    size: (u32, u32),
    frames: Vec<Vec<DrawCommand>>,
}

impl RenderBackend for CountingBackend {
    fn acquire_surface(&mut self) -> RenderResult<()> {
        self.surface = true;
        Ok(())
    }

    fn release_surface(&mut self) {
        self.surface = false;
    }

    fn has_surface(&self) -> bool {
        self.surface
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn draw(&mut self, _ctx: &RenderContext, commands: &[DrawCommand]) -> RenderResult<()> {
        if !self.surface {
            return Err(RendererError::SurfaceLost);
        }
        self.frames.push(commands.to_vec());
        Ok(())
    }
}

#[test]
fn resize_then_paint_empty_canvas() {
    let mut presenter = FramePresenter::new(CountingBackend {
        surface: false,
        size: (0, 0),
        frames: Vec::new(),
    });
    let mut canvas = Canvas::new();

    presenter.resize(320, 240);
    canvas.set_viewport_size(320.0, 240.0);
    let ctx = RenderContext::new(&canvas, canvas.viewport_size);
    assert_eq!(presenter.paint(&ctx).unwrap(), FrameOutcome::Presented);

    let frame = &presenter.backend().frames[0];
    assert_eq!(frame[0], DrawCommand::Clear(SerializableColor::white()));
    // 16 vertical + 12 horizontal grid lines, nothing else
    assert_eq!(frame.len(), 1 + 16 + 12);
}

#[test]
fn drawn_ellipses_render_in_insertion_order() {
    let mut canvas = Canvas::with_mode(Mode::Draw);
    canvas.pointer_down(Point::new(50.0, 50.0));
    canvas.pointer_move(Point::new(80.0, 60.0));
    canvas.pointer_up(Point::new(80.0, 60.0));
    canvas.pointer_down(Point::new(120.0, 120.0));
    canvas.pointer_move(Point::new(130.0, 150.0));
    canvas.pointer_up(Point::new(130.0, 150.0));

    let ctx = RenderContext::new(&canvas, Size::new(200.0, 200.0)).with_grid(GridStyle::None);
    let commands = build_frame(&ctx);
    let centers: Vec<Point> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillEllipse { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(centers, vec![Point::new(50.0, 50.0), Point::new(120.0, 120.0)]);

    let first_stroke = commands
        .iter()
        .find(|c| matches!(c, DrawCommand::StrokeEllipse { .. }));
    assert!(matches!(
        first_stroke,
        Some(DrawCommand::StrokeEllipse { width, color, .. })
            if *width == 1.0 && *color == SerializableColor::black()
    ));
}

#[test]
fn clock_sits_on_top_of_shapes() {
    let mut canvas = Canvas::new();
    canvas.insert(Point::new(100.0, 100.0), 90.0, 90.0);
    let ctx = RenderContext::new(&canvas, Size::new(200.0, 200.0))
        .with_grid(GridStyle::None)
        .with_clock(Some(ClockTime::new(12, 0)));
    let commands = build_frame(&ctx);

    let last = commands.last().cloned();
    // 12:00 minute hand points straight up, 35 units long
    assert_eq!(
        last,
        Some(DrawCommand::Line {
            from: Point::new(100.0, 100.0),
            to: Point::new(100.0, 65.0),
            color: SerializableColor::black(),
            width: 3.5,
        })
    );
}

#[test]
fn resize_after_surface_loss_then_paint() {
    let mut presenter = FramePresenter::new(CountingBackend {
        surface: false,
        size: (0, 0),
        frames: Vec::new(),
    });
    let canvas = Canvas::new();
    let ctx = RenderContext::new(&canvas, Size::new(50.0, 50.0));
    presenter.paint(&ctx).unwrap();

    presenter.surface_lost();
    presenter.resize(800, 600);
    assert_eq!(presenter.backend().size, (0, 0));

    assert_eq!(presenter.paint(&ctx).unwrap(), FrameOutcome::Presented);
    assert_eq!(presenter.backend().frames.len(), 2);
    assert_eq!(presenter.surfaces_lost(), 1);
}
