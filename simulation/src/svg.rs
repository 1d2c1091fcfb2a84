//! SVG family tree
//!
//! Draws one row per generation level. Parent edges run from the bottom of
//! the parent's box to the top of the child's box, unions are drawn as
//! curves between box centres, and deceased individuals get a red outline.
//! Edges with a missing endpoint are left out.

use std::collections::HashMap;

use crate::components::IndividualId;
use crate::layout;
use crate::records::Snapshot;

const LAYER_GAP: f64 = 120.0;
const NODE_W: f64 = 140.0;
const NODE_H: f64 = 46.0;
const H_GAP: f64 = 40.0;
const MIN_WIDTH: f64 = 400.0;

/// Names longer than this are cut.
const NAME_CHARS: usize = 18;

const BACKGROUND: &str = "#0b1020";
const PARENT_EDGE: &str = "#6ea8fe";
const UNION_EDGE: &str = "#b794f4";

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Top-left corner of every laid-out box, plus the canvas size.
struct Placement {
    coords: HashMap<IndividualId, (f64, f64)>,
    width: f64,
    height: f64,
}

fn place(levels: &HashMap<IndividualId, u32>) -> Placement {
    let layers = layout::layers(levels);
    let max_nodes = layers.values().map(Vec::len).max().unwrap_or(1).max(1);
    let max_level = layers.keys().next_back().copied().unwrap_or(0);

    let width = MIN_WIDTH.max(max_nodes as f64 * (NODE_W + H_GAP) + H_GAP);
    let height = (max_level as f64 + 1.0) * (LAYER_GAP + NODE_H) + LAYER_GAP;

    let mut coords = HashMap::with_capacity(levels.len());
    for (level, row) in &layers {
        let n = row.len().max(1) as f64;
        let row_width = n * NODE_W + (n + 1.0) * H_GAP;
        let x0 = (width - row_width) / 2.0 + H_GAP;
        let y = LAYER_GAP + *level as f64 * (NODE_H + LAYER_GAP);
        for (i, id) in row.iter().enumerate() {
            coords.insert(id.clone(), (x0 + i as f64 * (NODE_W + H_GAP), y));
        }
    }

    Placement {
        coords,
        width,
        height,
    }
}

/// Renders the snapshot as a layered SVG document.
pub fn render_tree(snapshot: &Snapshot, levels: &HashMap<IndividualId, u32>) -> String {
    let Placement {
        coords,
        width,
        height,
    } = place(levels);

    let mut parts = vec![format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" style="background:{BACKGROUND}">"#
    )];

    for child in &snapshot.individuals {
        let Some(&(x2, y2)) = coords.get(&child.id) else {
            continue;
        };
        for parent in &child.parents {
            let Some(&(x1, y1)) = coords.get(parent) else {
                continue;
            };
            parts.push(format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{PARENT_EDGE}" stroke-width="1.5" />"#,
                x1 + NODE_W / 2.0,
                y1 + NODE_H,
                x2 + NODE_W / 2.0,
                y2
            ));
        }
    }

    for union in &snapshot.unions {
        let (a, b) = union.partners();
        let (Some(&(xa, ya)), Some(&(xb, yb))) = (coords.get(a), coords.get(b)) else {
            continue;
        };
        let ym = (ya + yb) / 2.0;
        let (cxa, cxb) = (xa + NODE_W / 2.0, xb + NODE_W / 2.0);
        parts.push(format!(
            r#"<path d="M {cxa} {} C {cxa} {ym} {cxb} {ym} {cxb} {}" stroke="{UNION_EDGE}" stroke-width="1.5" fill="none" />"#,
            ya + NODE_H / 2.0,
            yb + NODE_H / 2.0
        ));
    }

    for person in &snapshot.individuals {
        let Some(&(x, y)) = coords.get(&person.id) else {
            continue;
        };
        let (fill, border) = if person.is_living() {
            ("#152347", "#475569")
        } else {
            ("#3a0f1e", "#ef4444")
        };
        parts.push(format!(
            r#"<rect x="{x}" y="{y}" rx="10" ry="10" width="{NODE_W}" height="{NODE_H}" fill="{fill}" stroke="{border}" stroke-width="1.5" />"#
        ));

        let name: String = person.name.chars().take(NAME_CHARS).collect();
        let partnered = if person.spouse.is_some() { " • ♥" } else { "" };
        parts.push(format!(
            r##"<text x="{}" y="{}" fill="#e2e8f0" font-size="12" font-family="ui-sans-serif">{}</text>"##,
            x + 10.0,
            y + 20.0,
            escape_xml(&name)
        ));
        parts.push(format!(
            r##"<text x="{}" y="{}" fill="#94a3b8" font-size="11" font-family="ui-sans-serif">{}{partnered}</text>"##,
            x + 10.0,
            y + 36.0,
            person.age
        ));
    }

    parts.push("</svg>".to_string());
    parts.concat()
}
