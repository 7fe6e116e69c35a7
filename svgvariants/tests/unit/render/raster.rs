use std::path::PathBuf;

use super::*;

fn renderer() -> ResvgRenderer {
    ResvgRenderer::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
}

fn write_svg(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn request(width: Option<u32>, height: Option<u32>, scale: Option<f64>) -> RenderRequest {
    RenderRequest {
        width,
        height,
        scale,
    }
}

#[test]
fn explicit_size_with_scale_renders_scaled_png() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_svg(
        dir.path(),
        "box.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
            <rect width="100" height="50" fill="#ff0000"/>
        </svg>"##,
    );
    let dest = dir.path().join("out.png");

    renderer()
        .render(&src, &request(None, None, Some(2.0)), &dest)
        .unwrap();

    let img = image::open(&dest).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (200, 100));
    assert_eq!(img.get_pixel(100, 50).0, [255, 0, 0, 255]);
}

#[test]
fn view_box_only_ignores_scale() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_svg(
        dir.path(),
        "vb.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">
            <rect width="200" height="100" fill="#00ff00"/>
        </svg>"##,
    );
    let pixmap = renderer()
        .rasterize(&src, &request(None, None, Some(2.0)))
        .unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (200, 100));
}

#[test]
fn single_requested_axis_keeps_inferred_other_axis_and_centers_content() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_svg(
        dir.path(),
        "vb.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">
            <rect width="200" height="100" fill="#0000ff"/>
        </svg>"##,
    );
    let dest = dir.path().join("out.png");
    renderer()
        .render(&src, &request(Some(40), None, None), &dest)
        .unwrap();

    let img = image::open(&dest).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (40, 100));
    // Content is 40x20, centered vertically.
    assert_eq!(img.get_pixel(20, 50).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(20, 5).0[3], 0);
}

#[test]
fn bounding_box_sizes_unsized_documents() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_svg(
        dir.path(),
        "bare.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg">
            <rect x="10" y="5" width="80" height="40" fill="#000000"/>
        </svg>"##,
    );
    let pixmap = renderer().rasterize(&src, &request(None, None, None)).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (90, 45));
}

#[test]
fn failures_map_to_taxonomy() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.png");

    let missing = renderer().render(&dir.path().join("nope.svg"), &request(None, None, None), &dest);
    assert!(matches!(missing, Err(SvgVariantsError::Load(_))));

    let broken = write_svg(dir.path(), "broken.svg", "<svg");
    let res = renderer().render(&broken, &request(None, None, None), &dest);
    assert!(matches!(res, Err(SvgVariantsError::Load(_))));

    let bad_vb = write_svg(
        dir.path(),
        "badvb.svg",
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 x 1"/>"#,
    );
    let res = renderer().render(&bad_vb, &request(Some(10), Some(10), None), &dest);
    assert!(matches!(res, Err(SvgVariantsError::Geometry(_))));

    assert!(!dest.exists());
}

fn assert_filled(img: &image::RgbaImage, rgba: [u8; 4]) {
    let (w, h) = img.dimensions();
    for (x, y) in [(w / 2, h / 2), (0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        assert_eq!(img.get_pixel(x, y).0, rgba, "pixel ({x}, {y}) of {w}x{h}");
    }
}

#[test]
fn width_only_view_box_document_fills_the_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_svg(
        dir.path(),
        "w.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="50" viewBox="0 0 200 100">
            <rect width="200" height="100" fill="#ff0000"/>
        </svg>"##,
    );
    let dest = dir.path().join("out.png");
    renderer()
        .render(&src, &request(None, None, None), &dest)
        .unwrap();

    let img = image::open(&dest).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (50, 25));
    assert_filled(&img, [255, 0, 0, 255]);
}

#[test]
fn height_only_view_box_document_fills_the_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_svg(
        dir.path(),
        "h.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" height="50" viewBox="0 0 200 100">
            <rect width="200" height="100" fill="#ff0000"/>
        </svg>"##,
    );
    let dest = dir.path().join("out.png");
    renderer()
        .render(&src, &request(None, None, Some(2.0)), &dest)
        .unwrap();

    let img = image::open(&dest).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (200, 100));
    assert_filled(&img, [255, 0, 0, 255]);
}

#[test]
fn both_percent_document_fills_the_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_svg(
        dir.path(),
        "pct.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="50%" height="50%" viewBox="0 0 200 100">
            <rect width="200" height="100" fill="#ff0000"/>
        </svg>"##,
    );
    let pixmap = renderer()
        .rasterize(&src, &request(None, None, None))
        .unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (100, 50));
    let corner = pixmap.pixel(99, 49).unwrap();
    assert_eq!((corner.red(), corner.alpha()), (255, 255));
}

#[test]
fn system_fonts_are_only_loaded_for_text() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_svg(
        dir.path(),
        "plain.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
            <rect width="4" height="4" fill="#ff0000"/>
        </svg>"##,
    );
    let r = ResvgRenderer::new();
    r.rasterize(&src, &request(None, None, None)).unwrap();
    assert!(r.fontdb.get().is_none());
}
