use drawbot_designer::render::{PathOp, Surface};
use drawbot_designer::{
    preview_scale, DrawOp, PixmapSurface, RecordingSurface, RenderOptions, Renderer, Rgba,
    ShapeCommand, ShapeGeometry,
};
use serde_json::json;

fn cross(first: &str, second: &str) -> Vec<ShapeCommand> {
    vec![
        ShapeCommand::line(50.0, 0.0, 50.0, 100.0)
            .with_color(first)
            .with_line_width(10.0),
        ShapeCommand::line(0.0, 50.0, 100.0, 50.0)
            .with_color(second)
            .with_line_width(10.0),
    ]
}

#[test]
fn test_later_commands_paint_over_earlier_ones() {
    let renderer = Renderer::default();

    let mut surface = PixmapSurface::new(100, 100).unwrap();
    renderer.render(&mut surface, &cross("blue", "red"));
    assert_eq!(surface.pixel(50, 50), Some(Rgba::rgb(255, 0, 0)));

    renderer.render(&mut surface, &cross("red", "blue"));
    assert_eq!(surface.pixel(50, 50), Some(Rgba::rgb(0, 0, 255)));

    // Outside the overlap each line keeps its own colour.
    assert_eq!(surface.pixel(50, 10), Some(Rgba::rgb(255, 0, 0)));
    assert_eq!(surface.pixel(10, 50), Some(Rgba::rgb(0, 0, 255)));
    assert_eq!(surface.pixel(10, 10), Some(Rgba::WHITE));
}

#[test]
fn test_render_is_a_full_repaint() {
    let renderer = Renderer::default();
    let mut surface = PixmapSurface::new(100, 100).unwrap();

    renderer.render(&mut surface, &cross("blue", "red"));
    renderer.render(&mut surface, &[]);
    assert_eq!(surface.pixel(50, 50), Some(Rgba::WHITE));
}

#[test]
fn test_each_kind_maps_to_one_primitive() {
    let commands = vec![
        ShapeCommand::circle(200.0, 200.0, 30.0).with_color("yellow"),
        ShapeCommand::rect(10.0, 10.0, 100.0, 80.0).with_color("red"),
        ShapeCommand::line(0.0, 0.0, 10.0, 10.0),
        ShapeCommand::triangle(0.0, 0.0, 10.0, 0.0, 5.0, 8.0).with_line_width(3.0),
        ShapeCommand::text(20.0, 40.0, "Hello"),
    ];

    let mut surface = RecordingSurface::new(500, 500);
    let stats = Renderer::default().render(&mut surface, &commands);
    assert_eq!(stats.drawn, 5);
    assert_eq!(stats.skipped, 0);

    let ops = surface.ops();
    assert_eq!(ops[0], DrawOp::Clear);
    assert_eq!(ops.len(), 6);

    match &ops[1] {
        DrawOp::StrokePath { path, style } => {
            assert_eq!(
                path.ops(),
                &[PathOp::Circle {
                    cx: 200.0,
                    cy: 200.0,
                    radius: 30.0
                }]
            );
            assert_eq!(style.color, Rgba::rgb(255, 255, 0));
            assert_eq!(style.width, 1.0);
        }
        other => panic!("expected circle stroke, got {:?}", other),
    }
    assert!(matches!(
        ops[2],
        DrawOp::StrokeRect { x, y, width, height, .. }
            if (x, y, width, height) == (10.0, 10.0, 100.0, 80.0)
    ));
    match &ops[4] {
        DrawOp::StrokePath { path, style } => {
            assert_eq!(path.ops().last(), Some(&PathOp::Close));
            assert_eq!(style.width, 3.0);
        }
        other => panic!("expected triangle stroke, got {:?}", other),
    }
    match &ops[5] {
        DrawOp::FillText { text, style, .. } => {
            assert_eq!(text, "Hello");
            assert_eq!(style.font.size, 20.0);
            assert_eq!(style.font.family, "Arial");
            assert_eq!(style.color, Rgba::BLACK);
        }
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_invalid_commands_are_skipped() {
    let mut broken = ShapeCommand::circle(10.0, 10.0, 5.0);
    if let ShapeCommand::Circle(c) = &mut broken {
        c.radius = -1.0;
    }
    let commands = vec![
        ShapeCommand::rect(0.0, 0.0, 10.0, 10.0),
        broken,
        ShapeCommand::line(0.0, 0.0, 5.0, 5.0),
    ];

    let mut surface = RecordingSurface::new(100, 100);
    let stats = Renderer::default().render(&mut surface, &commands);
    assert_eq!(stats.drawn, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(surface.drawn().len(), 2);
}

#[test]
fn test_render_raw_normalizes_and_skips() {
    let raws = vec![
        json!({"action": "draw_circle", "position": [40, 40]}),
        json!({"shape": "star", "x": 1}),
        json!({"shape": "rect", "x": 1, "y": 1, "width": 5, "height": 5, "color": "nonsense"}),
    ];

    let mut surface = RecordingSurface::new(100, 100);
    let stats = Renderer::default().render_raw(&mut surface, &raws);
    assert_eq!(stats.drawn, 2);
    assert_eq!(stats.skipped, 1);

    match surface.drawn()[0] {
        DrawOp::StrokePath { path, .. } => assert_eq!(
            path.ops(),
            &[PathOp::Circle {
                cx: 40.0,
                cy: 40.0,
                radius: 30.0
            }]
        ),
        other => panic!("expected circle stroke, got {:?}", other),
    }
    // Unparseable colours fall back to the default.
    match surface.drawn()[1] {
        DrawOp::StrokeRect { style, .. } => assert_eq!(style.color, Rgba::BLACK),
        other => panic!("expected rect stroke, got {:?}", other),
    }
}

#[test]
fn test_preview_scale_shrinks_oversized_drawings() {
    let commands = vec![ShapeCommand::rect(300.0, 100.0, 500.0, 100.0)];
    let scale = preview_scale(&commands, 400.0, 400.0);
    assert!(scale > 0.0 && scale < 1.0);
    assert_eq!(scale, 0.5);
}

#[test]
fn test_preview_scale_never_enlarges() {
    let commands = vec![
        ShapeCommand::circle(50.0, 50.0, 10.0),
        ShapeCommand::text(100.0, 100.0, "small"),
    ];
    assert_eq!(preview_scale(&commands, 400.0, 400.0), 1.0);
    assert_eq!(preview_scale(&[], 400.0, 400.0), 1.0);
}

#[test]
fn test_preview_scale_ignores_non_positive_axes() {
    let commands = vec![ShapeCommand::line(-50.0, -20.0, 800.0, -10.0)];
    assert_eq!(preview_scale(&commands, 400.0, 400.0), 0.5);
}

#[test]
fn test_preview_scale_stays_positive_when_extent_overflows() {
    let commands = vec![ShapeCommand::circle(1e308, 0.0, 1e308)];
    let scale = preview_scale(&commands, 200.0, 200.0);
    assert!(scale > 0.0 && scale <= 1.0);

    let scaled = commands[0].scaled(scale);
    assert!(scaled.validate().is_ok());
    let (max_x, _) = scaled.extent();
    assert!(max_x.is_finite() && max_x <= 200.0 + 1e-9);
}

#[test]
fn test_render_preview_scales_geometry_not_style() {
    let commands = vec![
        ShapeCommand::circle(600.0, 200.0, 200.0),
        ShapeCommand::text(100.0, 100.0, "label"),
    ];

    let mut surface = RecordingSurface::new(400, 400);
    let renderer = Renderer::default();
    renderer.render_preview(&mut surface, &commands);

    let drawn = surface.drawn();
    match drawn[0] {
        DrawOp::StrokePath { path, style } => {
            assert_eq!(
                path.ops(),
                &[PathOp::Circle {
                    cx: 300.0,
                    cy: 100.0,
                    radius: 100.0
                }]
            );
            assert_eq!(style.width, 2.0);
        }
        other => panic!("expected circle stroke, got {:?}", other),
    }
    match drawn[1] {
        DrawOp::FillText { x, y, style, .. } => {
            assert_eq!((*x, *y), (50.0, 50.0));
            assert_eq!(style.font.size, 16.0);
        }
        other => panic!("expected text, got {:?}", other),
    }

    // The original commands are left untouched.
    assert_eq!(commands[0].extent(), (800.0, 400.0));
}

#[test]
fn test_custom_render_options() {
    let options = RenderOptions {
        default_color: Rgba::rgb(0, 128, 0),
        default_line_width: 4.0,
        ..RenderOptions::default()
    };
    let mut surface = RecordingSurface::new(50, 50);
    Renderer::new(options).render(&mut surface, &[ShapeCommand::line(0.0, 0.0, 9.0, 9.0)]);

    match surface.drawn()[0] {
        DrawOp::StrokePath { style, .. } => {
            assert_eq!(style.color, Rgba::rgb(0, 128, 0));
            assert_eq!(style.width, 4.0);
        }
        other => panic!("expected line stroke, got {:?}", other),
    }
}

#[test]
fn test_pixmap_surface_rejects_zero_size() {
    assert!(PixmapSurface::new(0, 10).is_err());
    let surface = PixmapSurface::new(3, 2).unwrap();
    assert_eq!(surface.size(), (3, 2));
    assert_eq!(surface.to_rgb_image().dimensions(), (3, 2));
}

#[test]
fn test_save_png_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.png");

    let mut surface = PixmapSurface::new(64, 64).unwrap();
    Renderer::default().render(&mut surface, &[ShapeCommand::rect(4.0, 4.0, 40.0, 40.0)]);
    surface.save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 64));
}
