use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};

/// Largest raster edge a variant may request.
pub const MAX_TARGET_DIM: u32 = 16_384;

/// A `viewBox` as declared on the root element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewBox {
    /// Minimum x of the user coordinate system.
    pub x: f64,
    /// Minimum y of the user coordinate system.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl ViewBox {
    /// A view box only drives sizing when it has a positive area.
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Geometric extent of the rendered content, in root user units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

/// Intrinsic sizing inputs read from a document's root element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SizeAttrs {
    /// Raw `width` attribute, if present.
    pub width: Option<String>,
    /// Raw `height` attribute, if present.
    pub height: Option<String>,
    /// Parsed `viewBox`, if present.
    pub view_box: Option<ViewBox>,
    /// Content bounding box, used when nothing else sizes the document.
    pub bbox: BoundingBox,
}

/// Natural size of a document and whether a global scale factor applies to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedGeometry {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// False only when sizing comes purely from an intrinsic `viewBox`.
    pub should_scale: bool,
}

/// One parsed `width`/`height` attribute.
///
/// `value` follows `parseFloat` semantics on the `%`-stripped text: the leading numeric prefix,
/// with zero and unparsable text both counting as "unknown".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct AxisAttr {
    declared: bool,
    percent: bool,
    value: Option<f64>,
}

impl AxisAttr {
    fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        let trimmed = raw.trim();
        let percent = trimmed.ends_with('%');
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
        Self {
            declared: true,
            percent,
            value: parse_leading_number(number).filter(|v| *v != 0.0),
        }
    }
}

/// Resolve the natural size of a document from its root attributes.
///
/// Rules, first applicable wins per axis:
/// 1. with a usable `viewBox`, a single known axis derives the other from the view box aspect,
///    no known axis takes the view box size, and two percentage axes become fractions of the view
///    box (overriding anything derived before);
/// 2. an axis still unknown falls back to the content bounding box far edge.
///
/// A single percentage axis is left as a plain number.
pub fn resolve_geometry(attrs: &SizeAttrs) -> SvgVariantsResult<ResolvedGeometry> {
    let w_attr = AxisAttr::parse(attrs.width.as_deref());
    let h_attr = AxisAttr::parse(attrs.height.as_deref());

    let mut width = w_attr.value;
    let mut height = h_attr.value;

    let view_box = attrs.view_box.filter(ViewBox::is_usable);
    if let Some(vb) = view_box {
        match (width, height) {
            (Some(w), None) => height = Some(w * vb.height / vb.width),
            (None, Some(h)) => width = Some(h * vb.width / vb.height),
            (None, None) => {
                width = Some(vb.width);
                height = Some(vb.height);
            }
            (Some(_), Some(_)) => {}
        }
        if w_attr.percent && h_attr.percent {
            width = w_attr.value.map(|w| vb.width * w / 100.0);
            height = h_attr.value.map(|h| vb.height * h / 100.0);
        }
    }

    let width = width
        .filter(|w| *w != 0.0)
        .unwrap_or(attrs.bbox.width + attrs.bbox.x);
    let height = height
        .filter(|h| *h != 0.0)
        .unwrap_or(attrs.bbox.height + attrs.bbox.y);

    if !width.is_finite() || !height.is_finite() {
        return Err(SvgVariantsError::geometry(format!(
            "document size is not finite: {width}x{height}"
        )));
    }

    Ok(ResolvedGeometry {
        width,
        height,
        should_scale: w_attr.declared || h_attr.declared || view_box.is_none(),
    })
}

/// Decide the pixel size to request from the renderer.
///
/// Missing requested axes take the rounded natural size. `scale` multiplies both axes only for
/// documents with `should_scale`; pure `viewBox` documents ignore it.
pub fn target_size(
    requested_width: Option<u32>,
    requested_height: Option<u32>,
    scale: Option<f64>,
    geometry: &ResolvedGeometry,
) -> SvgVariantsResult<(u32, u32)> {
    let mut width = requested_width
        .filter(|w| *w > 0)
        .map(f64::from)
        .unwrap_or_else(|| js_round(geometry.width));
    let mut height = requested_height
        .filter(|h| *h > 0)
        .map(f64::from)
        .unwrap_or_else(|| js_round(geometry.height));

    if let Some(s) = scale.filter(|s| *s != 0.0)
        && geometry.should_scale
    {
        width = js_round(width * s);
        height = js_round(height * s);
    }

    Ok((to_px(width)?, to_px(height)?))
}

fn to_px(v: f64) -> SvgVariantsResult<u32> {
    if !v.is_finite() || v < 1.0 {
        return Err(SvgVariantsError::geometry(format!(
            "target size must be at least 1px, got {v}"
        )));
    }
    if v > f64::from(MAX_TARGET_DIM) {
        return Err(SvgVariantsError::geometry(format!(
            "target size too large: {v} (max {MAX_TARGET_DIM})"
        )));
    }
    Ok(v as u32)
}

// Half-way cases round towards positive infinity.
fn js_round(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Parse the longest leading decimal number of `s`, ignoring leading whitespace.
///
/// `"12.5px"` gives `12.5`, `"px"` gives `None`.
fn parse_leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolve.rs"]
mod tests;
