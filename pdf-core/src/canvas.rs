use crate::fonts::BuiltinFont;
use crate::graphics::Color;
use crate::writer::{encode_pdf_string, format_coord};

/// Drawing surface for a single page.
///
/// Accumulates content-stream operators; the document writes them out
/// when the page is finished. Coordinates use PDF's bottom-left origin.
#[derive(Debug)]
pub struct Canvas {
    ops: Vec<u8>,
    font: BuiltinFont,
    font_size: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Canvas {
            ops: Vec::new(),
            font: BuiltinFont::Helvetica,
            font_size: 12.0,
        }
    }

    fn push(&mut self, op: String) -> &mut Self {
        self.ops.extend_from_slice(op.as_bytes());
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.push(format!(
            "{} {} {} rg\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
        ))
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.push(format!(
            "{} {} {} RG\n",
            format_coord(color.r),
            format_coord(color.g),
            format_coord(color.b),
        ))
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.push(format!("{} w\n", format_coord(width)))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push(format!("{} {} m\n", format_coord(x), format_coord(y)))
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push(format!("{} {} l\n", format_coord(x), format_coord(y)))
    }

    /// Append a rectangle path; (x, y) is the lower-left corner.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.push(format!(
            "{} {} {} {} re\n",
            format_coord(x),
            format_coord(y),
            format_coord(width),
            format_coord(height),
        ))
    }

    pub fn fill(&mut self) -> &mut Self {
        self.push("f\n".to_string())
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.push("S\n".to_string())
    }

    /// Rectangle filled with the current fill color.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.rect(x, y, width, height).fill()
    }

    /// Stroke a straight segment with the given width and color, leaving
    /// the surrounding graphics state untouched.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color) -> &mut Self {
        self.save_state()
            .set_stroke_color(color)
            .set_line_width(width)
            .move_to(x1, y1)
            .line_to(x2, y2)
            .stroke()
            .restore_state()
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.push("q\n".to_string())
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.push("Q\n".to_string())
    }

    /// Select the font used by subsequent `draw_string` calls.
    pub fn set_font(&mut self, font: BuiltinFont, font_size: f64) -> &mut Self {
        self.font = font;
        self.font_size = font_size;
        self
    }

    /// Draw `text` with its baseline starting at (x, y), in the current
    /// font and fill color.
    pub fn draw_string(&mut self, x: f64, y: f64, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        let mut op = format!(
            "BT\n/{} {} Tf\n{} {} Td\n(",
            self.font.pdf_name(),
            format_coord(self.font_size),
            format_coord(x),
            format_coord(y),
        )
        .into_bytes();
        op.extend_from_slice(&encode_pdf_string(text));
        op.extend_from_slice(b") Tj\nET\n");
        self.ops.extend_from_slice(&op);
        self
    }

    /// Width of `text` in the current font, in points.
    pub fn string_width(&self, text: &str) -> f64 {
        self.font.measure(text, self.font_size)
    }

    pub fn content(&self) -> &[u8] {
        &self.ops
    }

    pub fn into_content(self) -> Vec<u8> {
        self.ops
    }
}
