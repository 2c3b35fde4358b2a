use std::collections::VecDeque;
use std::io::Write;

use crate::canvas::Canvas;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::graphics::PageGeometry;
use crate::paragraph::Paragraph;
use crate::tables::Table;

/// Slack allowed when deciding whether a flowable fits, to absorb
/// floating-point error in accumulated heights.
const FIT_TOLERANCE: f64 = 1e-6;

/// A block element positioned and paginated by `DocTemplate`.
#[derive(Debug, Clone)]
pub enum Flowable {
    /// Fixed vertical gap, in points. Dropped when it falls on a page break.
    Spacer(f64),
    Paragraph(Paragraph),
    /// Tables are centered horizontally in the frame.
    Table(Table),
}

enum Split {
    Parts(Flowable, Flowable),
    Discard,
    Unsplittable,
}

impl Flowable {
    fn kind(&self) -> &'static str {
        match self {
            Flowable::Spacer(_) => "spacer",
            Flowable::Paragraph(_) => "paragraph",
            Flowable::Table(_) => "table",
        }
    }

    pub fn height(&self, avail_width: f64) -> f64 {
        match self {
            Flowable::Spacer(h) => *h,
            Flowable::Paragraph(p) => p.height(avail_width),
            Flowable::Table(t) => t.height(),
        }
    }

    /// On an empty frame a table whose first row is too tall for the
    /// page is split inside that row.
    fn split(&self, avail_width: f64, avail_height: f64, empty_frame: bool) -> Split {
        match self {
            Flowable::Spacer(_) => Split::Discard,
            Flowable::Paragraph(p) => {
                let lines = p.layout(avail_width).len();
                let fit = (avail_height / p.style().leading + FIT_TOLERANCE).floor().max(0.0) as usize;
                if fit == 0 || fit >= lines {
                    return Split::Unsplittable;
                }
                let (head, tail) = p.split_lines(avail_width, fit);
                Split::Parts(Flowable::Paragraph(head), Flowable::Paragraph(tail))
            }
            Flowable::Table(t) => {
                let avail_height = avail_height + FIT_TOLERANCE;
                let parts = t.split(avail_height).or_else(|| {
                    if empty_frame {
                        t.split_first_row(avail_height)
                    } else {
                        None
                    }
                });
                match parts {
                    Some((head, tail)) => {
                        Split::Parts(Flowable::Table(head), Flowable::Table(tail))
                    }
                    None => Split::Unsplittable,
                }
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas, frame: &Frame, top: f64) {
        match self {
            Flowable::Spacer(_) => {}
            Flowable::Paragraph(p) => p.draw(canvas, frame.x, top, frame.width),
            Flowable::Table(t) => {
                let x = frame.x + (frame.width - t.width()) / 2.0;
                t.draw(canvas, x, top);
            }
        }
    }
}

/// What a page decorator is told about the page it draws on.
#[derive(Debug, Clone, Copy)]
pub struct PageInfo {
    /// 1-based page number.
    pub number: usize,
    pub geometry: PageGeometry,
}

/// Draws fixed decoration (headers, banners) on a page's canvas before
/// any flowable content is placed on it.
pub trait PageDecorator {
    fn decorate(&self, canvas: &mut Canvas, page: &PageInfo);
}

impl<F> PageDecorator for F
where
    F: Fn(&mut Canvas, &PageInfo),
{
    fn decorate(&self, canvas: &mut Canvas, page: &PageInfo) {
        self(canvas, page)
    }
}

/// The region of a page flowables are stacked into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub width: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Page template plus pagination engine.
///
/// Holds page geometry and decorators; `build` stacks flowables
/// top-down into a frame inside the margins, breaking to a new page
/// whenever the next flowable does not fit.
pub struct DocTemplate<'a> {
    geometry: PageGeometry,
    frame_padding: f64,
    later_pages_top_inset: f64,
    on_first_page: Option<&'a dyn PageDecorator>,
    on_later_pages: Option<&'a dyn PageDecorator>,
    info: Vec<(String, String)>,
    compress: bool,
}

impl<'a> DocTemplate<'a> {
    pub fn new(geometry: PageGeometry) -> Self {
        DocTemplate {
            geometry,
            frame_padding: 6.0,
            later_pages_top_inset: 0.0,
            on_first_page: None,
            on_later_pages: None,
            info: Vec::new(),
            compress: false,
        }
    }

    pub fn on_first_page(mut self, decorator: &'a dyn PageDecorator) -> Self {
        self.on_first_page = Some(decorator);
        self
    }

    pub fn on_later_pages(mut self, decorator: &'a dyn PageDecorator) -> Self {
        self.on_later_pages = Some(decorator);
        self
    }

    /// Inset between the frame padding and the first flowable on pages
    /// after the first, leaving room for a page header.
    pub fn later_pages_top_inset(mut self, inset: f64) -> Self {
        self.later_pages_top_inset = inset;
        self
    }

    pub fn frame_padding(mut self, padding: f64) -> Self {
        self.frame_padding = padding;
        self
    }

    pub fn info(mut self, key: &str, value: &str) -> Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    pub fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Frame for the given 1-based page number.
    pub fn frame(&self, page_number: usize) -> Frame {
        let g = &self.geometry;
        let inset = if page_number > 1 {
            self.later_pages_top_inset
        } else {
            0.0
        };
        Frame {
            x: g.left_margin + self.frame_padding,
            width: g.content_width() - 2.0 * self.frame_padding,
            top: g.content_top() - self.frame_padding - inset,
            bottom: g.bottom_margin + self.frame_padding,
        }
    }

    fn check_geometry(&self) -> Result<()> {
        let g = &self.geometry;
        let values = [
            g.page_width,
            g.page_height,
            g.left_margin,
            g.right_margin,
            g.top_margin,
            g.bottom_margin,
            self.frame_padding,
            self.later_pages_top_inset,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidGeometry(format!("{:?}", g)));
        }
        for page in [1, 2] {
            let frame = self.frame(page);
            if frame.width <= 0.0 || frame.top <= frame.bottom {
                return Err(Error::InvalidGeometry(format!(
                    "margins leave no room for content on page {} of a {}x{} page",
                    page, g.page_width, g.page_height
                )));
            }
        }
        Ok(())
    }

    /// Lay out `flowables` onto as many pages as needed and write the
    /// finished PDF to `writer`, which is returned on success.
    pub fn build<W: Write>(&self, flowables: Vec<Flowable>, writer: W) -> Result<W> {
        self.check_geometry()?;

        let mut doc = PdfDocument::new(writer)?;
        doc.set_compression(self.compress);
        for (key, value) in &self.info {
            doc.set_info(key, value);
        }

        let mut pending: VecDeque<Flowable> = flowables.into();
        let mut page_number = 0;
        loop {
            page_number += 1;
            let page = PageInfo {
                number: page_number,
                geometry: self.geometry,
            };
            let mut canvas = Canvas::new();
            let decorator = if page_number == 1 {
                self.on_first_page
            } else {
                self.on_later_pages
            };
            if let Some(decorator) = decorator {
                canvas.save_state();
                decorator.decorate(&mut canvas, &page);
                canvas.restore_state();
            }

            self.fill_frame(&self.frame(page_number), &mut pending, &mut canvas, page_number)?;
            doc.add_page(self.geometry.page_width, self.geometry.page_height, canvas)?;

            if pending.is_empty() {
                break;
            }
            tracing::debug!(page = page_number, remaining = pending.len(), "page break");
        }

        let pages = doc.page_count();
        let writer = doc.end_document()?;
        tracing::debug!(pages, "document built");
        Ok(writer)
    }

    /// Place flowables from the front of `pending` until the frame is
    /// full. Anything that does not fit stays in `pending`.
    fn fill_frame(
        &self,
        frame: &Frame,
        pending: &mut VecDeque<Flowable>,
        canvas: &mut Canvas,
        page_number: usize,
    ) -> Result<()> {
        let mut cursor_y = frame.top;
        let mut placed_any = false;

        while let Some(flowable) = pending.pop_front() {
            let available = cursor_y - frame.bottom;
            let height = flowable.height(frame.width);
            if height <= available + FIT_TOLERANCE {
                flowable.draw(canvas, frame, cursor_y);
                cursor_y -= height;
                placed_any = true;
                continue;
            }

            match flowable.split(frame.width, available, !placed_any) {
                Split::Parts(head, tail) => {
                    head.draw(canvas, frame, cursor_y);
                    pending.push_front(tail);
                }
                Split::Discard => {}
                Split::Unsplittable if placed_any => pending.push_front(flowable),
                Split::Unsplittable => {
                    return Err(Error::FlowableTooLarge {
                        kind: flowable.kind(),
                        height,
                        available,
                        page: page_number,
                    });
                }
            }
            return Ok(());
        }
        Ok(())
    }
}
