use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SvgVariantsError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SvgVariantsError::load("x").to_string().contains("load error:"));
    assert!(
        SvgVariantsError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        SvgVariantsError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(SvgVariantsError::io("x").to_string().contains("io error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SvgVariantsError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
