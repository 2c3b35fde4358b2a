use pdf_core::{BuiltinFont, Canvas, Color, PageDecorator, PageInfo, INCH};

use crate::model::InvoiceNumber;

const STAMP_WIDTH: f64 = 2.0 * INCH;
const STAMP_HEIGHT: f64 = 0.5 * INCH;

/// Per-page banner: company title on the left, black `Invoice: <n>`
/// stamp at the top-right of the content area.
#[derive(Debug, Clone)]
pub struct HeaderDecorator {
    company_name: String,
    invoice_number: InvoiceNumber,
}

impl HeaderDecorator {
    pub fn new(company_name: impl Into<String>, invoice_number: InvoiceNumber) -> Self {
        HeaderDecorator {
            company_name: company_name.into(),
            invoice_number,
        }
    }
}

impl PageDecorator for HeaderDecorator {
    fn decorate(&self, canvas: &mut Canvas, page: &PageInfo) {
        let g = &page.geometry;
        let rect_x = g.left_margin + g.content_width() - STAMP_WIDTH;
        let rect_y = g.bottom_margin + g.content_height() - STAMP_HEIGHT;

        canvas
            .set_fill_color(Color::BLACK)
            .fill_rect(rect_x, rect_y, STAMP_WIDTH, STAMP_HEIGHT);

        canvas
            .set_fill_color(Color::WHITE)
            .set_font(BuiltinFont::HelveticaBold, 12.0)
            .draw_string(
                rect_x + 0.1 * INCH,
                rect_y + 0.2 * INCH,
                &format!("Invoice: {}", self.invoice_number),
            );

        canvas
            .set_fill_color(Color::BLACK)
            .set_font(BuiltinFont::HelveticaBold, 22.0)
            .draw_string(
                g.left_margin,
                rect_y + STAMP_HEIGHT / 2.0 - 10.0,
                &self.company_name,
            );
    }
}
