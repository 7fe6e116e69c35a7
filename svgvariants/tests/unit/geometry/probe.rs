use super::*;

#[test]
fn root_attrs_are_read_verbatim() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="50%" height="12px" viewBox="0 0 200 100"></svg>"#;
    let a = root_size_attrs(svg).unwrap();
    assert_eq!(a.width.as_deref(), Some("50%"));
    assert_eq!(a.height.as_deref(), Some("12px"));
    assert_eq!(
        a.view_box,
        Some(ViewBox {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 100.0
        })
    );
    assert_eq!(a.bbox, BoundingBox::default());
}

#[test]
fn missing_attrs_are_none() {
    let a = root_size_attrs(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
    assert_eq!(a.width, None);
    assert_eq!(a.height, None);
    assert_eq!(a.view_box, None);
}

#[test]
fn non_svg_or_broken_documents_are_load_errors() {
    assert!(matches!(
        root_size_attrs("<html></html>"),
        Err(SvgVariantsError::Load(_))
    ));
    assert!(matches!(
        root_size_attrs("<svg"),
        Err(SvgVariantsError::Load(_))
    ));
}

#[test]
fn malformed_view_box_is_a_geometry_error() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 abc 10"/>"#;
    assert!(matches!(
        root_size_attrs(svg),
        Err(SvgVariantsError::Geometry(_))
    ));
}

#[test]
fn view_box_accepts_commas_and_mixed_whitespace() {
    let vb = parse_view_box("-5,10  40.5\n20").unwrap();
    assert_eq!(
        vb,
        ViewBox {
            x: -5.0,
            y: 10.0,
            width: 40.5,
            height: 20.0
        }
    );
    assert!(parse_view_box("0 0 10").is_err());
    assert!(parse_view_box("0 0 10 10 10").is_err());
    assert!(parse_view_box("").is_err());
}

#[test]
fn content_bbox_covers_drawn_shapes() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg">
        <rect x="10" y="5" width="80" height="40" fill="red"/>
    </svg>"#;
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default()).unwrap();
    let bbox = content_bbox(&tree);
    assert!((bbox.x - 10.0).abs() < 1e-3);
    assert!((bbox.y - 5.0).abs() < 1e-3);
    assert!((bbox.width - 80.0).abs() < 1e-3);
    assert!((bbox.height - 40.0).abs() < 1e-3);
}

#[test]
fn root_size_is_replaced_in_place() {
    let svg = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="50" height='10%' viewBox="0 0 200 100"><g/></svg>"#;
    let out = with_root_size(svg, 50.0, 25.0).unwrap();
    assert!(out.starts_with("<?xml version=\"1.0\"?>"));
    assert!(out.ends_with("<g/></svg>"));
    let a = root_size_attrs(&out).unwrap();
    assert_eq!(a.width.as_deref(), Some("50"));
    assert_eq!(a.height.as_deref(), Some("25"));
    assert_eq!(a.view_box.map(|vb| vb.width), Some(200.0));
}

#[test]
fn missing_root_size_is_inserted() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"/>"#;
    let out = with_root_size(svg, 37.5, 18.75).unwrap();
    let a = root_size_attrs(&out).unwrap();
    assert_eq!(a.width.as_deref(), Some("37.5"));
    assert_eq!(a.height.as_deref(), Some("18.75"));

    let bare = with_root_size("<svg/>", 1.0, 2.0).unwrap();
    let a = root_size_attrs(&bare).unwrap();
    assert_eq!((a.width.as_deref(), a.height.as_deref()), (Some("1"), Some("2")));
}

#[test]
fn text_detection() {
    assert!(has_text_content(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g><text>hi</text></g></svg>"#
    ));
    assert!(!has_text_content(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1" height="1"/></svg>"#
    ));
    assert!(!has_text_content("<svg"));
}
