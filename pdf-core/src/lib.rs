pub mod objects;
pub mod writer;
pub mod document;
pub mod fonts;
pub mod graphics;
pub mod canvas;
pub mod paragraph;
pub mod tables;
pub mod template;
pub mod error;

pub use canvas::Canvas;
pub use document::PdfDocument;
pub use error::Error;
pub use fonts::BuiltinFont;
pub use graphics::{Color, PageGeometry, A4, INCH};
pub use paragraph::{Alignment, Line, Paragraph, ParagraphStyle};
pub use tables::{CellContent, CellSpan, Padding, StyleCommand, Table, TableStyle, VAlign};
pub use template::{DocTemplate, Flowable, Frame, PageDecorator, PageInfo};
