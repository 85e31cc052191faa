//! SVG export of a layout snapshot
//!
//! Anchors are drawn as coloured circles, edges as lines and notes as red
//! circles sized by importance. Simulation coordinates are shifted by the
//! layout margin so anchors on the hexagon are not clipped.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::io::{IoError, IoResult, Writer};
use crate::notes::{DEFAULT_MARGIN, NoteLayout};
use crate::snapshot::LayoutSnapshot;
use crate::vector::Vector2D;

/// One colour per hexagon anchor
pub const ANCHOR_COLORS: [&str; 6] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD",
];

/// Fill for note circles
pub const NOTE_COLOR: &str = "red";

/// Stroke for edges
pub const EDGE_COLOR: &str = "purple";

/// Geometry used when drawing a snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Width and height of the drawing
    pub side_length: f64,
    /// Offset added to every simulation coordinate
    pub margin: f64,
    pub anchor_radius: f64,
    /// Radius of a note with importance 1
    pub note_radius: f64,
    pub edge_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            side_length: 400.0,
            margin: DEFAULT_MARGIN,
            anchor_radius: 6.0,
            note_radius: 3.0,
            edge_width: 3.0,
        }
    }
}

impl RenderOptions {
    /// Options matching a layout's bounding box and margin
    pub fn for_layout(layout: &NoteLayout) -> Self {
        Self {
            side_length: layout.side_length(),
            margin: layout.margin(),
            ..Default::default()
        }
    }
}

struct Circle {
    cx: String,
    cy: String,
    r: String,
    fill: String,
    label: String,
}

struct Line {
    x1: String,
    y1: String,
    x2: String,
    y2: String,
}

#[derive(Template)]
#[template(path = "layout.svg")]
struct LayoutTemplate<'a> {
    size: String,
    anchors: Vec<Circle>,
    edges: Vec<Line>,
    notes: Vec<Circle>,
    edge_color: &'a str,
    edge_width: String,
}

fn coord(value: f64) -> String {
    format!("{value:.2}")
}

/// Renders snapshots as standalone SVG documents
#[derive(Debug, Clone)]
pub struct SvgWriter {
    options: RenderOptions,
}

impl SvgWriter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn shift(&self, position: Vector2D) -> (String, String) {
        (
            coord(position.x + self.options.margin),
            coord(position.y + self.options.margin),
        )
    }

    /// Render a snapshot to an SVG string
    pub fn render(&self, snapshot: &LayoutSnapshot) -> IoResult<String> {
        let anchors = snapshot
            .anchor_positions()
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(i, position)| {
                let (cx, cy) = self.shift(position);
                Circle {
                    cx,
                    cy,
                    r: coord(self.options.anchor_radius),
                    fill: ANCHOR_COLORS[i % ANCHOR_COLORS.len()].to_string(),
                    label: format!("anchor {i}"),
                }
            })
            .collect();

        let edges = snapshot
            .edge_segments()
            .map(|(from, to)| {
                let (x1, y1) = self.shift(from);
                let (x2, y2) = self.shift(to);
                Line { x1, y1, x2, y2 }
            })
            .collect();

        let notes = snapshot
            .notes()
            .map(|note| {
                let (cx, cy) = self.shift(note.position);
                Circle {
                    cx,
                    cy,
                    r: coord(self.options.note_radius * note.importance),
                    fill: NOTE_COLOR.to_string(),
                    label: note.label.to_string(),
                }
            })
            .collect();

        let template = LayoutTemplate {
            size: coord(self.options.side_length),
            anchors,
            edges,
            notes,
            edge_color: EDGE_COLOR,
            edge_width: coord(self.options.edge_width),
        };
        template.render().map_err(|e| IoError::Write(e.to_string()))
    }
}

impl Writer for SvgWriter {
    fn write(&self, snapshot: &LayoutSnapshot, output: &Path) -> IoResult<()> {
        let svg = self.render(snapshot)?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, svg)?;
        Ok(())
    }

    fn format_id(&self) -> &str {
        "svg"
    }
}
