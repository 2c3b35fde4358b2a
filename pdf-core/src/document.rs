use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::canvas::Canvas;
use crate::fonts::BuiltinFont;
use crate::objects::{ObjId, PdfObject};
use crate::writer::PdfWriter;

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FONT_OBJ_NUM: u32 = 3;

/// Low-level PDF document assembly.
///
/// Generic over `Write` so it works with files, in-memory buffers, or
/// any other writer. Each finished page is written out immediately, so
/// only the page currently being drawn is held in memory.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_obj_ids: Vec<ObjId>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfDocument<W> {
    /// Create a document that writes to `writer`. The header and the
    /// shared font dictionaries are written immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        let mut next_obj_num = FIRST_FONT_OBJ_NUM;
        for font in BuiltinFont::ALL {
            let dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.pdf_base_name())),
                ("Encoding", PdfObject::name("WinAnsiEncoding")),
            ]);
            pdf_writer.write_object(ObjId(next_obj_num, 0), &dict)?;
            next_obj_num += 1;
        }

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            page_obj_ids: Vec::new(),
            next_obj_num,
            compress: false,
        })
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Flate-compress page content streams written from now on.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    pub fn page_count(&self) -> usize {
        self.page_obj_ids.len()
    }

    fn alloc_id(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    /// Write a finished page of the given size (in points) with the
    /// canvas as its content stream.
    pub fn add_page(&mut self, width: f64, height: f64, canvas: Canvas) -> io::Result<()> {
        let content_id = self.alloc_id();
        let page_id = self.alloc_id();

        let content_stream = if self.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(canvas.content())?;
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                encoder.finish()?,
            )
        } else {
            PdfObject::stream(vec![], canvas.into_content())
        };
        self.writer.write_object(content_id, &content_stream)?;

        let fonts = BuiltinFont::ALL
            .iter()
            .zip(FIRST_FONT_OBJ_NUM..)
            .map(|(font, num)| (font.pdf_name(), PdfObject::Reference(ObjId(num, 0))))
            .collect();
        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(PAGES_OBJ)),
            ("MediaBox", PdfObject::media_box(width, height)),
            ("Contents", PdfObject::Reference(content_id)),
            (
                "Resources",
                PdfObject::dict(vec![("Font", PdfObject::dict(fonts))]),
            ),
        ]);
        self.writer.write_object(page_id, &page_dict)?;

        self.page_obj_ids.push(page_id);
        Ok(())
    }

    /// Finish the document: info dictionary, page tree, catalog, xref
    /// table, and trailer. Returns the underlying writer.
    pub fn end_document(mut self) -> io::Result<W> {
        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.alloc_id();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let kids = self
            .page_obj_ids
            .iter()
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(self.page_obj_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        Ok(self.writer.into_inner())
    }
}
