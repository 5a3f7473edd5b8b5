use crate::geometry::{Coordinate, Region, distance_label};

pub const FLAG_TITLE: &str = "Flag";
pub const SELECTED_SPOT_TITLE: &str = "Selected Spot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Red,
    Blue,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Flag,
    Pin,
}

/// How the surface should draw an annotation, derived from its title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationStyle {
    Marker { tint: Tint, glyph: Glyph },
    Label,
}

impl AnnotationStyle {
    pub fn for_title(title: &str) -> Self {
        match title {
            FLAG_TITLE => AnnotationStyle::Marker {
                tint: Tint::Red,
                glyph: Glyph::Flag,
            },
            SELECTED_SPOT_TITLE => AnnotationStyle::Marker {
                tint: Tint::Blue,
                glyph: Glyph::Pin,
            },
            _ => AnnotationStyle::Label,
        }
    }
}

/// A titled point on the map: a marker or a distance label
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub coordinate: Coordinate,
    pub title: String,
}

impl Annotation {
    pub fn new(coordinate: Coordinate, title: impl Into<String>) -> Self {
        Self {
            coordinate,
            title: title.into(),
        }
    }

    /// Distance label for a segment, placed at the segment's midpoint
    pub fn distance(line: &LineOverlay) -> Self {
        Self::new(line.midpoint(), distance_label(line.whole_meters()))
    }

    pub fn style(&self) -> AnnotationStyle {
        AnnotationStyle::for_title(&self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Tint,
    pub width: f32,
}

/// Every segment is drawn the same way
pub const LINE_STYLE: LineStyle = LineStyle {
    color: Tint::Yellow,
    width: 3.0,
};

/// A straight two-point segment overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOverlay {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl LineOverlay {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self { from, to }
    }

    pub fn midpoint(&self) -> Coordinate {
        self.from.midpoint(&self.to)
    }

    pub fn whole_meters(&self) -> i64 {
        self.from.whole_meters_to(&self.to)
    }

    pub fn style(&self) -> LineStyle {
        LINE_STYLE
    }
}

/// Everything the map shows for the current hole
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    /// Cached viewport; `None` until the first fix of the hole framed it
    pub region: Option<Region>,
    pub annotations: Vec<Annotation>,
    pub overlays: Vec<LineOverlay>,
}

impl MapScene {
    /// Derive the full overlay set from scratch.
    ///
    /// # Order
    /// 1. Flag marker
    /// 2. User → flag line with its distance label
    /// 3. With a selected spot: user → spot and spot → flag lines, the spot
    ///    marker, then a distance label for each of the two new segments
    pub fn render(
        region: Option<Region>,
        user: Coordinate,
        flag: Coordinate,
        selected_spot: Option<Coordinate>,
    ) -> Self {
        let mut annotations = Vec::with_capacity(5);
        let mut overlays = Vec::with_capacity(3);

        annotations.push(Annotation::new(flag, FLAG_TITLE));

        let user_to_flag = LineOverlay::new(user, flag);
        overlays.push(user_to_flag);
        annotations.push(Annotation::distance(&user_to_flag));

        if let Some(spot) = selected_spot {
            let user_to_spot = LineOverlay::new(user, spot);
            let spot_to_flag = LineOverlay::new(spot, flag);
            overlays.push(user_to_spot);
            overlays.push(spot_to_flag);

            annotations.push(Annotation::new(spot, SELECTED_SPOT_TITLE));
            annotations.push(Annotation::distance(&user_to_spot));
            annotations.push(Annotation::distance(&spot_to_flag));
        }

        Self {
            region,
            annotations,
            overlays,
        }
    }

    /// Distance labels in render order
    pub fn distance_labels(&self) -> Vec<&str> {
        self.annotations
            .iter()
            .filter(|a| a.style() == AnnotationStyle::Label)
            .map(|a| a.title.as_str())
            .collect()
    }
}
