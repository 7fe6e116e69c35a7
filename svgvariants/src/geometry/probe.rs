use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};
use crate::geometry::resolve::{BoundingBox, SizeAttrs, ViewBox};

/// Read `width`, `height` and `viewBox` from the root `<svg>` element of `svg_text`.
///
/// The returned bounding box is zeroed; fill it from the parsed tree with [`content_bbox`].
pub fn root_size_attrs(svg_text: &str) -> SvgVariantsResult<SizeAttrs> {
    let doc = roxmltree::Document::parse(svg_text)
        .map_err(|e| SvgVariantsError::load(format!("parse svg xml: {e}")))?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SvgVariantsError::load(format!(
            "document root is <{}>, expected <svg>",
            root.tag_name().name()
        )));
    }

    let view_box = root.attribute("viewBox").map(parse_view_box).transpose()?;

    Ok(SizeAttrs {
        width: root.attribute("width").map(str::to_owned),
        height: root.attribute("height").map(str::to_owned),
        view_box,
        bbox: BoundingBox::default(),
    })
}

/// Return `svg_text` with the root `width`/`height` set to the given pixel values.
///
/// Existing values are replaced in place and missing attributes are inserted after the tag name;
/// the rest of the document is copied verbatim. The renderer uses this so the parsed tree has the
/// resolved size, with the `viewBox` mapped onto exactly that extent.
pub fn with_root_size(svg_text: &str, width: f64, height: f64) -> SvgVariantsResult<String> {
    let doc = roxmltree::Document::parse(svg_text)
        .map_err(|e| SvgVariantsError::load(format!("parse svg xml: {e}")))?;
    let root = doc.root_element();

    let tag_start = root.range().start + 1;
    let name_end = svg_text[tag_start..]
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .map(|i| tag_start + i)
        .ok_or_else(|| SvgVariantsError::load("unterminated root start tag"))?;

    // (range to replace, replacement), applied back to front.
    let mut edits = Vec::with_capacity(2);
    for (name, value) in [("width", width), ("height", height)] {
        match root.attribute_node(name) {
            Some(attr) => edits.push((attr.range_value(), value.to_string())),
            None => edits.push((name_end..name_end, format!(" {name}=\"{value}\""))),
        }
    }
    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));

    let mut out = svg_text.to_owned();
    for (range, text) in edits {
        out.replace_range(range, &text);
    }
    Ok(out)
}

/// `true` when the document has a `<text>` element and so needs a font database.
pub fn has_text_content(svg_text: &str) -> bool {
    roxmltree::Document::parse(svg_text)
        .map(|doc| {
            doc.descendants()
                .any(|n| n.is_element() && n.tag_name().name() == "text")
        })
        .unwrap_or(false)
}

/// Parse a `viewBox` list: four numbers separated by whitespace and/or commas.
pub fn parse_view_box(raw: &str) -> SvgVariantsResult<ViewBox> {
    let mut nums = [0.0f64; 4];
    let mut count = 0usize;
    for token in raw
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
    {
        if count == 4 {
            return Err(SvgVariantsError::geometry(format!(
                "viewBox '{raw}' has more than 4 values"
            )));
        }
        nums[count] = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                SvgVariantsError::geometry(format!("viewBox '{raw}' has invalid value '{token}'"))
            })?;
        count += 1;
    }
    if count != 4 {
        return Err(SvgVariantsError::geometry(format!(
            "viewBox '{raw}' must have 4 values, got {count}"
        )));
    }

    Ok(ViewBox {
        x: nums[0],
        y: nums[1],
        width: nums[2],
        height: nums[3],
    })
}

/// Bounding box of everything drawn by `tree`.
pub fn content_bbox(tree: &usvg::Tree) -> BoundingBox {
    let rect = tree.root().abs_bounding_box();
    BoundingBox {
        x: f64::from(rect.x()),
        y: f64::from(rect.y()),
        width: f64::from(rect.width()),
        height: f64::from(rect.height()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/probe.rs"]
mod tests;
