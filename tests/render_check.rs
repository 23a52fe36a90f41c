//! Rasterize exported SVG and check where the paint landed

use resvg::tiny_skia;
use resvg::usvg;

use svg_graphics::geometry::{Point, Size};
use svg_graphics::paint::RadialGradient;
use svg_graphics::scene::demo_stops;
use svg_graphics::{ExportConfig, SvgConfig, SvgGraphics};

fn rasterize(graphics: &SvgGraphics, use_css: bool) -> tiny_skia::Pixmap {
    let mut svg = Vec::new();
    graphics.stream(&mut svg, use_css).unwrap();

    let tree = usvg::Tree::from_data(&svg, &usvg::Options::default()).unwrap();
    let mut pixmap = tiny_skia::Pixmap::new(300, 300).unwrap();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    pixmap
}

#[test]
fn test_radial_gradient_under_rotation_and_scale() {
    let config = ExportConfig::new()
        .with_svg(SvgConfig::new())
        .with_canvas(Size::new(300.0, 300.0));
    let mut g = SvgGraphics::with_config(config);

    g.translate(100.0, 100.0);
    g.rotate_about(45f64.to_radians(), 50.0, 50.0);
    g.scale(1.2, 1.2);
    g.set_paint(RadialGradient::new(Point::new(50.0, 50.0), 50.0, demo_stops()));
    g.fill_rect(0.0, 0.0, 100.0, 100.0).unwrap();

    for use_css in [true, false] {
        let pixmap = rasterize(&g, use_css);

        // Gradient center (50, 50) lands at (150, 164.1)
        let center = pixmap.pixel(150, 164).unwrap();
        assert!(center.red() > 200, "css={} center: {:?}", use_css, center);
        assert!(center.green() < 60, "css={} center: {:?}", use_css, center);
        assert!(center.blue() < 30, "css={} center: {:?}", use_css, center);

        // Corner region (95, 95) is past the radius and padded with the last stop
        let corner = pixmap.pixel(150, 240).unwrap();
        assert!(corner.blue() > 200, "css={} corner: {:?}", use_css, corner);
        assert!(corner.red() < 30, "css={} corner: {:?}", use_css, corner);

        // Outside the rotated square nothing is painted
        let outside = pixmap.pixel(10, 10).unwrap();
        assert_eq!(outside.alpha(), 0);
    }
}
