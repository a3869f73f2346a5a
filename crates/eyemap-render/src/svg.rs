//! SVG assembly.
//!
//! Pure string building with `std::fmt::Write`, no I/O. Hexagons are
//! `<polygon>` elements; the `layer-colors` and `data-layer-thresholds`
//! attributes carry JSON payloads inside single-quoted attributes so
//! the value shape reaches the front-end byte-for-byte.

use std::fmt::Write;

use crate::renderer::HexCell;
use crate::transform::Layout;
use crate::RenderError;

/// Escape text for double-quoted attribute values and element content.
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Context strings attached to one rendered region.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SvgContext<'a> {
    pub label: &'a str,
    pub neuron_type: &'a str,
    pub soma_side: &'a str,
    /// Shared per-layer threshold boundaries, when computed.
    pub layer_thresholds: Option<&'a [f64]>,
}

/// Render a placed layout into an SVG document string.
pub(crate) fn render_svg(
    layout: &Layout<'_>,
    cells: &[HexCell],
    ctx: &SvgContext<'_>,
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(cells.len() * 256);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.1}" height="{:.1}" viewBox="0 0 {:.1} {:.1}">"#,
        layout.width, layout.height, layout.width, layout.height,
    )?;
    writeln!(
        out,
        "  <title>{} {} ({})</title>",
        xml_escape(ctx.neuron_type),
        xml_escape(ctx.label),
        xml_escape(ctx.soma_side),
    )?;

    let thresholds_json = match ctx.layer_thresholds {
        Some(t) => Some(serde_json::to_string(t)?),
        None => None,
    };

    for (placed, cell) in layout.placed.iter().zip(cells) {
        let col = placed.column;
        let points = placed
            .vertices
            .iter()
            .map(|v| format!("{:.2},{:.2}", v.x, v.y))
            .collect::<Vec<_>>()
            .join(" ");
        let layer_colors = serde_json::to_string(&cell.layer_colors)?;

        write!(
            out,
            r##"  <polygon points="{points}" fill="{fill}" stroke="#808080" stroke-width="0.5" data-coord="{coord}" data-region="{region}" data-side="{side}" layer-colors='{layer_colors}'"##,
            fill = cell.fill,
            coord = xml_escape(&col.coordinate.to_string()),
            region = xml_escape(&col.region),
            side = xml_escape(&col.side.to_string()),
        )?;
        if let Some(json) = &thresholds_json {
            write!(out, " data-layer-thresholds='{json}'")?;
        }
        writeln!(
            out,
            "><title>{} {}: {:.2}</title></polygon>",
            xml_escape(&col.region),
            xml_escape(&col.coordinate.to_string()),
            col.value,
        )?;
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}
