use std::io::Write;

use chrono::NaiveDate;
use pdf_core::{
    Alignment, DocTemplate, Flowable, PageGeometry, Paragraph, ParagraphStyle, A4, INCH,
};

use crate::error::Result;
use crate::header::HeaderDecorator;
use crate::model::{InvoiceRequest, Scalar};
use crate::tables::{cell_style, issuer_buyer_table, item_table};

pub const DEFAULT_COMPANY_NAME: &str = "GULAB BEEJ BHANDAR";

/// Space kept clear for the banner above the first flowable on pages
/// after the first.
const LATER_PAGES_TOP_INSET: f64 = 0.6 * INCH;

#[derive(Debug, Clone)]
pub struct ComposerOptions {
    pub company_name: String,
    /// Flate-compress page content.
    pub compress: bool,
    /// Draw the banner on every page instead of only the first.
    pub header_on_every_page: bool,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        ComposerOptions {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            compress: true,
            header_on_every_page: true,
        }
    }
}

/// A4 landscape with 1in side margins and 0.1in top and bottom margins.
pub fn page_geometry() -> PageGeometry {
    let (short, long) = A4;
    PageGeometry {
        page_width: long,
        page_height: short,
        left_margin: INCH,
        right_margin: INCH,
        top_margin: 0.1 * INCH,
        bottom_margin: 0.1 * INCH,
    }
}

/// Turns a validated request into a laid-out PDF.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    options: ComposerOptions,
}

impl Composer {
    pub fn new(options: ComposerOptions) -> Self {
        Composer { options }
    }

    pub fn options(&self) -> &ComposerOptions {
        &self.options
    }

    /// The document body in layout order. Fails before anything is
    /// drawn if the item totals cannot be summed.
    pub fn flowables(&self, request: &InvoiceRequest, date: NaiveDate) -> Result<Vec<Flowable>> {
        let total = request.grand_total()?;
        let geometry = page_geometry();
        Ok(vec![
            Flowable::Spacer(0.6 * INCH),
            Flowable::Table(issuer_buyer_table(
                &request.issuer,
                &request.buyer,
                date,
                geometry.page_width,
            )),
            Flowable::Spacer(0.45 * INCH),
            Flowable::Table(item_table(&request.items)),
            Flowable::Spacer(0.25 * INCH),
            Flowable::Paragraph(total_paragraph(&total)),
        ])
    }

    /// Render the invoice into `writer` and hand the writer back.
    pub fn render<W: Write>(&self, request: &InvoiceRequest, date: NaiveDate, writer: W) -> Result<W> {
        let flowables = self.flowables(request, date)?;
        let header = HeaderDecorator::new(
            self.options.company_name.clone(),
            request.invoice_number.clone(),
        );
        let title = format!("Invoice {}", request.invoice_number);

        let mut template = DocTemplate::new(page_geometry())
            .on_first_page(&header)
            .info("Title", &title)
            .info("Creator", concat!("invoice-core ", env!("CARGO_PKG_VERSION")))
            .compress(self.options.compress);
        if self.options.header_on_every_page {
            template = template
                .on_later_pages(&header)
                .later_pages_top_inset(LATER_PAGES_TOP_INSET);
        }

        let writer = template.build(flowables, writer)?;
        tracing::debug!(
            invoice_number = %request.invoice_number,
            items = request.items.len(),
            "invoice rendered"
        );
        Ok(writer)
    }

    pub fn render_to_vec(&self, request: &InvoiceRequest, date: NaiveDate) -> Result<Vec<u8>> {
        self.render(request, date, Vec::new())
    }
}

/// Right-aligned `Total: <sum>` with the label in bold.
fn total_paragraph(total: &Scalar) -> Paragraph {
    let style = ParagraphStyle {
        alignment: Alignment::Right,
        ..cell_style()
    };
    Paragraph::new(style)
        .bold("Total:")
        .text(&format!(" {}", total))
}
