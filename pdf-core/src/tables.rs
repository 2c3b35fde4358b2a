use crate::canvas::Canvas;
use crate::fonts::BuiltinFont;
use crate::graphics::Color;
use crate::paragraph::{Alignment, Paragraph};

// -------------------------------------------------------
// Public types
// -------------------------------------------------------

/// Vertical placement of cell content within the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Bottom,
    Middle,
    Top,
}

/// Content of a single table cell.
#[derive(Debug, Clone)]
pub enum CellContent {
    /// Unwrapped text in the table font. `\n` starts a new line.
    Text(String),
    /// Rich text that wraps to the column width.
    Paragraph(Paragraph),
}

impl CellContent {
    pub fn plain_text(&self) -> String {
        match self {
            CellContent::Text(text) => text.clone(),
            CellContent::Paragraph(p) => p.plain_text(),
        }
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        CellContent::Text(text.to_string())
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        CellContent::Text(text)
    }
}

impl From<Paragraph> for CellContent {
    fn from(p: Paragraph) -> Self {
        CellContent::Paragraph(p)
    }
}

/// Rectangular block of cells addressed as `(column, row)`. Negative
/// indices count back from the last column/row of the whole table, so
/// `(-1, -1)` is the bottom-right cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl CellSpan {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        CellSpan { start, end }
    }

    /// Every cell in the table.
    pub fn all() -> Self {
        CellSpan::new((0, 0), (-1, -1))
    }

    /// Every cell of one row.
    pub fn row(row: i32) -> Self {
        CellSpan::new((0, row), (-1, row))
    }

    /// Every cell from `row` to the end of the table.
    pub fn rows_from(row: i32) -> Self {
        CellSpan::new((0, row), (-1, -1))
    }
}

/// A styling instruction applied to a `CellSpan`.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleCommand {
    Background(Color),
    TextColor(Color),
    /// Horizontal alignment of `Text` cells. Paragraphs keep their own.
    Align(Alignment),
    VAlign(VAlign),
    /// Rule under each row of the span.
    LineBelow { width: f64, color: Color },
    /// Rules between the rows and columns inside the span.
    InnerGrid { width: f64, color: Color },
    /// Rectangle around the span.
    Box { width: f64, color: Color },
}

/// Ordered list of style commands; later commands win for per-cell
/// attributes.
#[derive(Debug, Clone, Default)]
pub struct TableStyle {
    commands: Vec<(CellSpan, StyleCommand)>,
}

impl TableStyle {
    pub fn new() -> Self {
        TableStyle::default()
    }

    pub fn add(mut self, span: CellSpan, command: StyleCommand) -> Self {
        self.commands.push((span, command));
        self
    }

    pub fn commands(&self) -> &[(CellSpan, StyleCommand)] {
        &self.commands
    }
}

/// Space between a cell's edges and its content, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Padding {
            left: 6.0,
            right: 6.0,
            top: 3.0,
            bottom: 3.0,
        }
    }
}

/// Per-cell attributes after applying the style commands.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellStyle {
    background: Option<Color>,
    text_color: Color,
    align: Alignment,
    valign: VAlign,
}

impl Default for CellStyle {
    fn default() -> Self {
        CellStyle {
            background: None,
            text_color: Color::BLACK,
            align: Alignment::Left,
            valign: VAlign::Bottom,
        }
    }
}

/// A grid of cells with fixed column widths and span-based styling.
///
/// Row heights grow to fit content. A table taller than the space left
/// on a page is split between rows with `split`; the fragments remember
/// their position in the original table so styles addressed from the
/// end (`-1`) still land on the real last row.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<f64>,
    rows: Vec<Vec<CellContent>>,
    style: TableStyle,
    /// Font for `Text` cells.
    pub font: BuiltinFont,
    pub font_size: f64,
    pub leading: f64,
    pub padding: Padding,
    /// Index of this fragment's first row in the original table.
    first_row: usize,
    /// Row count of the original table.
    total_rows: usize,
}

impl Table {
    /// Create a table from column widths (points) and rows of cells.
    pub fn new(columns: Vec<f64>, rows: Vec<Vec<CellContent>>) -> Self {
        let total_rows = rows.len();
        Table {
            columns,
            rows,
            style: TableStyle::default(),
            font: BuiltinFont::Helvetica,
            font_size: 10.0,
            leading: 12.0,
            padding: Padding::default(),
            first_row: 0,
            total_rows,
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn columns(&self) -> &[f64] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellContent>] {
        &self.rows
    }

    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    pub fn width(&self) -> f64 {
        self.columns.iter().sum()
    }

    /// Height of every row in this fragment.
    pub fn row_heights(&self) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .enumerate()
                    .map(|(col, &width)| match row.get(col) {
                        Some(cell) => self.content_height(cell, width),
                        None => self.leading,
                    })
                    .fold(0.0_f64, f64::max)
                    + self.padding.top
                    + self.padding.bottom
            })
            .collect()
    }

    pub fn height(&self) -> f64 {
        self.row_heights().iter().sum()
    }

    fn inner_width(&self, col_width: f64) -> f64 {
        (col_width - self.padding.left - self.padding.right).max(0.0)
    }

    fn content_height(&self, cell: &CellContent, col_width: f64) -> f64 {
        match cell {
            CellContent::Text(text) => text.split('\n').count() as f64 * self.leading,
            CellContent::Paragraph(p) => p.height(self.inner_width(col_width)),
        }
    }

    /// Split into the rows that fit in `avail_height` and the rest.
    /// Returns `None` when not even the first row fits, or when the
    /// whole table fits and no split is needed.
    pub fn split(&self, avail_height: f64) -> Option<(Table, Table)> {
        let mut used = 0.0;
        let mut fit = 0;
        for h in self.row_heights() {
            if used + h > avail_height {
                break;
            }
            used += h;
            fit += 1;
        }
        if fit == 0 || fit == self.rows.len() {
            return None;
        }
        Some((self.fragment(0, fit), self.fragment(fit, self.rows.len())))
    }

    /// Split the first row itself between lines, for a row taller than
    /// `avail_height` on its own. Each cell keeps the lines that fit and
    /// the rest continue in a row with the same index at the top of the
    /// second fragment. `None` when some cell cannot keep even one line.
    pub fn split_first_row(&self, avail_height: f64) -> Option<(Table, Table)> {
        let row = self.rows.first()?;
        let inner_height = avail_height - self.padding.top - self.padding.bottom;
        let mut head = Vec::with_capacity(row.len());
        let mut tail = Vec::with_capacity(row.len());
        let mut continues = false;

        for (col, cell) in row.iter().enumerate() {
            let width = self.inner_width(self.columns.get(col).copied().unwrap_or(0.0));
            let (kept, rest) = match cell {
                CellContent::Text(text) => {
                    let lines: Vec<&str> = text.split('\n').collect();
                    let fit = lines_that_fit(inner_height, self.leading)?;
                    if fit >= lines.len() {
                        (cell.clone(), None)
                    } else {
                        (
                            CellContent::Text(lines[..fit].join("\n")),
                            Some(CellContent::Text(lines[fit..].join("\n"))),
                        )
                    }
                }
                CellContent::Paragraph(p) => {
                    let fit = lines_that_fit(inner_height, p.style().leading)?;
                    if fit >= p.layout(width).len() {
                        (cell.clone(), None)
                    } else {
                        let (kept, rest) = p.split_lines(width, fit);
                        (kept.into(), Some(rest.into()))
                    }
                }
            };
            continues |= rest.is_some();
            head.push(kept);
            tail.push(rest.unwrap_or_else(|| CellContent::Text(String::new())));
        }
        if !continues {
            return None;
        }

        let mut rest_rows = Vec::with_capacity(self.rows.len());
        rest_rows.push(tail);
        rest_rows.extend_from_slice(&self.rows[1..]);
        Some((
            self.with_rows(vec![head], self.first_row),
            self.with_rows(rest_rows, self.first_row),
        ))
    }

    fn fragment(&self, start: usize, end: usize) -> Table {
        self.with_rows(self.rows[start..end].to_vec(), self.first_row + start)
    }

    fn with_rows(&self, rows: Vec<Vec<CellContent>>, first_row: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows,
            style: self.style.clone(),
            font: self.font,
            font_size: self.font_size,
            leading: self.leading,
            padding: self.padding,
            first_row,
            total_rows: self.total_rows,
        }
    }

    /// Resolve a span to inclusive local (column, row) bounds within this
    /// fragment, or `None` when it does not touch the fragment.
    fn local_bounds(&self, span: &CellSpan) -> Option<((usize, usize), (usize, usize))> {
        let (c0, c1) = ordered(
            resolve_index(span.start.0, self.columns.len()),
            resolve_index(span.end.0, self.columns.len()),
        );
        let (r0, r1) = ordered(
            resolve_index(span.start.1, self.total_rows),
            resolve_index(span.end.1, self.total_rows),
        );
        let first = self.first_row as i64;
        let last = first + self.rows.len() as i64 - 1;
        let (r0, r1) = (r0.max(first), r1.min(last));
        let (c0, c1) = (c0.max(0), c1.min(self.columns.len() as i64 - 1));
        if r0 > r1 || c0 > c1 {
            return None;
        }
        Some((
            (c0 as usize, (r0 - first) as usize),
            (c1 as usize, (r1 - first) as usize),
        ))
    }

    fn cell_style(&self, col: usize, row: usize) -> CellStyle {
        let mut style = CellStyle::default();
        for (span, command) in self.style.commands() {
            let Some(((c0, r0), (c1, r1))) = self.local_bounds(span) else {
                continue;
            };
            if col < c0 || col > c1 || row < r0 || row > r1 {
                continue;
            }
            match command {
                StyleCommand::Background(color) => style.background = Some(*color),
                StyleCommand::TextColor(color) => style.text_color = *color,
                StyleCommand::Align(align) => style.align = *align,
                StyleCommand::VAlign(valign) => style.valign = *valign,
                StyleCommand::LineBelow { .. }
                | StyleCommand::InnerGrid { .. }
                | StyleCommand::Box { .. } => {}
            }
        }
        style
    }

    /// Draw the table with its top-left corner at (x, top).
    pub fn draw(&self, canvas: &mut Canvas, x: f64, top: f64) {
        let heights = self.row_heights();
        let col_x: Vec<f64> = self
            .columns
            .iter()
            .scan(x, |acc, &w| {
                let left = *acc;
                *acc += w;
                Some(left)
            })
            .collect();
        let row_top: Vec<f64> = heights
            .iter()
            .scan(top, |acc, &h| {
                let t = *acc;
                *acc -= h;
                Some(t)
            })
            .collect();

        for (r, row) in self.rows.iter().enumerate() {
            for (c, &width) in self.columns.iter().enumerate() {
                let style = self.cell_style(c, r);
                if let Some(bg) = style.background {
                    canvas
                        .save_state()
                        .set_fill_color(bg)
                        .fill_rect(col_x[c], row_top[r] - heights[r], width, heights[r])
                        .restore_state();
                }
                if let Some(cell) = row.get(c) {
                    canvas.save_state();
                    self.draw_cell(canvas, cell, &style, col_x[c], row_top[r], width, heights[r]);
                    canvas.restore_state();
                }
            }
        }

        self.draw_rules(canvas, &col_x, &row_top, &heights);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        canvas: &mut Canvas,
        cell: &CellContent,
        style: &CellStyle,
        x: f64,
        top: f64,
        width: f64,
        height: f64,
    ) {
        let pad = self.padding;
        let avail_width = self.inner_width(width);
        let inner_top = top - pad.top;
        let inner_height = height - pad.top - pad.bottom;
        let content_height = self.content_height(cell, width);
        let offset = match style.valign {
            VAlign::Top => 0.0,
            VAlign::Middle => (inner_height - content_height) / 2.0,
            VAlign::Bottom => inner_height - content_height,
        };
        let block_top = inner_top - offset;

        match cell {
            CellContent::Text(text) => {
                canvas
                    .set_fill_color(style.text_color)
                    .set_font(self.font, self.font_size);
                let mut baseline = block_top - self.font_size;
                for line in text.split('\n') {
                    let line_w = canvas.string_width(line);
                    let line_x = match style.align {
                        Alignment::Left => x + pad.left,
                        Alignment::Center => x + pad.left + (avail_width - line_w) / 2.0,
                        Alignment::Right => x + width - pad.right - line_w,
                    };
                    canvas.draw_string(line_x, baseline, line);
                    baseline -= self.leading;
                }
            }
            CellContent::Paragraph(p) => {
                let lines = p.layout(avail_width);
                p.draw_lines(canvas, &lines, x + pad.left, block_top, avail_width);
            }
        }
    }

    fn draw_rules(&self, canvas: &mut Canvas, col_x: &[f64], row_top: &[f64], heights: &[f64]) {
        let right = |c: usize| col_x[c] + self.columns[c];
        let bottom = |r: usize| row_top[r] - heights[r];

        for (span, command) in self.style.commands() {
            let Some(((c0, r0), (c1, r1))) = self.local_bounds(span) else {
                continue;
            };
            match *command {
                StyleCommand::LineBelow { width, color } => {
                    for r in r0..=r1 {
                        canvas.line(col_x[c0], bottom(r), right(c1), bottom(r), width, color);
                    }
                }
                StyleCommand::InnerGrid { width, color } => {
                    for r in r0..r1 {
                        canvas.line(col_x[c0], bottom(r), right(c1), bottom(r), width, color);
                    }
                    for c in c0..c1 {
                        canvas.line(right(c), row_top[r0], right(c), bottom(r1), width, color);
                    }
                }
                StyleCommand::Box { width, color } => {
                    canvas
                        .save_state()
                        .set_stroke_color(color)
                        .set_line_width(width)
                        .rect(
                            col_x[c0],
                            bottom(r1),
                            right(c1) - col_x[c0],
                            row_top[r0] - bottom(r1),
                        )
                        .stroke()
                        .restore_state();
                }
                StyleCommand::Background(_)
                | StyleCommand::TextColor(_)
                | StyleCommand::Align(_)
                | StyleCommand::VAlign(_) => {}
            }
        }
    }
}

/// Whole lines of `leading` that fit in `height`, or `None` for zero.
fn lines_that_fit(height: f64, leading: f64) -> Option<usize> {
    let fit = (height / leading).floor();
    (fit >= 1.0).then_some(fit as usize)
}

fn resolve_index(index: i32, len: usize) -> i64 {
    if index < 0 {
        len as i64 + index as i64
    } else {
        index as i64
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
