/// RGB color for fills, strokes, and text.
///
/// Each component is in the range 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);
    pub const WHITE: Color = Color::gray(1.0);
    /// CSS `lightgrey` (#D3D3D3).
    pub const LIGHT_GREY: Color = Color::gray(211.0 / 255.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    pub const fn gray(level: f64) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }
}

/// Page size and margins, in points. The content area is the page inset
/// by the margins; PDF coordinates start at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
}

/// Points per inch.
pub const INCH: f64 = 72.0;

/// A4 portrait (210mm x 297mm).
pub const A4: (f64, f64) = (595.2755905511812, 841.8897637795277);

impl PageGeometry {
    /// Uniform-margin geometry for a page of the given size.
    pub fn new(page_width: f64, page_height: f64, margin: f64) -> Self {
        PageGeometry {
            page_width,
            page_height,
            left_margin: margin,
            right_margin: margin,
            top_margin: margin,
            bottom_margin: margin,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.page_width - self.left_margin - self.right_margin
    }

    pub fn content_height(&self) -> f64 {
        self.page_height - self.top_margin - self.bottom_margin
    }

    /// Y coordinate of the top edge of the content area.
    pub fn content_top(&self) -> f64 {
        self.bottom_margin + self.content_height()
    }

    /// X coordinate of the right edge of the content area.
    pub fn content_right(&self) -> f64 {
        self.left_margin + self.content_width()
    }
}
