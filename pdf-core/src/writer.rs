use std::io::{self, Write};

use crate::fonts::win_ansi_code;
use crate::objects::{ObjId, PdfObject};

/// Low-level PDF serializer. Writes indirect objects to any `Write`
/// target and records their byte offsets for the xref table.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    xref_entries: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            xref_entries: Vec::new(),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    /// Write the PDF 1.7 header followed by the binary marker comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n")
    }

    /// Write an indirect object, recording its byte offset for xref.
    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.xref_entries.push((id.0, self.offset));
        let mut buf = format!("{} {} obj\n", id.0, id.1).into_bytes();
        serialize(obj, &mut buf);
        buf.extend_from_slice(b"\nendobj\n");
        self.write_bytes(&buf)
    }

    /// Write xref table, trailer, startxref, and %%EOF.
    pub fn write_xref_and_trailer(&mut self, root_id: ObjId, info_id: Option<ObjId>) -> io::Result<()> {
        let xref_offset = self.offset;
        self.xref_entries.sort_by_key(|&(num, _)| num);
        let size = self.xref_entries.last().map_or(0, |&(num, _)| num) + 1;

        let mut buf = format!("xref\n0 {}\n", size).into_bytes();
        // Each entry is exactly 20 bytes including the CRLF.
        buf.extend_from_slice(b"0000000000 65535 f\r\n");
        let mut entries = self.xref_entries.iter().peekable();
        for obj_num in 1..size {
            match entries.peek() {
                Some(&&(num, off)) if num == obj_num => {
                    buf.extend_from_slice(format!("{:010} 00000 n\r\n", off).as_bytes());
                    entries.next();
                }
                _ => buf.extend_from_slice(b"0000000000 00000 f\r\n"),
            }
        }

        buf.extend_from_slice(
            format!("trailer\n<< /Size {} /Root {} {} R", size, root_id.0, root_id.1).as_bytes(),
        );
        if let Some(info) = info_id {
            buf.extend_from_slice(format!(" /Info {} {} R", info.0, info.1).as_bytes());
        }
        buf.extend_from_slice(format!(" >>\nstartxref\n{}\n%%EOF\n", xref_offset).as_bytes());
        self.write_bytes(&buf)?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn serialize(obj: &PdfObject, out: &mut Vec<u8>) {
    match obj {
        PdfObject::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
        PdfObject::Real(f) => out.extend_from_slice(format_real(*f).as_bytes()),
        PdfObject::Name(name) => {
            out.push(b'/');
            out.extend_from_slice(name.as_bytes());
        }
        PdfObject::LiteralString(s) => {
            out.push(b'(');
            out.extend_from_slice(&encode_pdf_string(s));
            out.push(b')');
        }
        PdfObject::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                serialize(item, out);
            }
            out.push(b']');
        }
        PdfObject::Dictionary(entries) => {
            serialize_entries(entries, out);
            out.extend_from_slice(b" >>");
        }
        PdfObject::Stream { dict, data } => {
            serialize_entries(dict, out);
            out.extend_from_slice(format!(" /Length {} >>\nstream\n", data.len()).as_bytes());
            out.extend_from_slice(data);
            out.extend_from_slice(b"\nendstream");
        }
        PdfObject::Reference(id) => {
            out.extend_from_slice(format!("{} {} R", id.0, id.1).as_bytes());
        }
    }
}

/// Writes `<<` and every ` /Key value` pair, leaving the dictionary open.
fn serialize_entries(entries: &[(String, PdfObject)], out: &mut Vec<u8>) {
    out.extend_from_slice(b"<<");
    for (key, val) in entries {
        out.extend_from_slice(b" /");
        out.extend_from_slice(key.as_bytes());
        out.push(b' ');
        serialize(val, out);
    }
}

/// Encode text for a PDF literal string under WinAnsiEncoding.
///
/// Delimiters are backslash-escaped, other WinAnsi characters above
/// ASCII become octal escapes, and anything the standard fonts cannot
/// show becomes `?`.
pub fn encode_pdf_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            ' '..='~' => out.push(c as u8),
            _ => match win_ansi_code(c) {
                Some(code) => out.extend_from_slice(format!("\\{:03o}", code).as_bytes()),
                None => out.push(b'?'),
            },
        }
    }
    out
}

/// Format a float for object output: always carries a decimal point,
/// never scientific notation.
fn format_real(f: f64) -> String {
    if f == f.floor() && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        trim_decimal(format!("{:.6}", f))
    }
}

/// Format a number for content-stream operators: integral values have no
/// decimal point, everything else is rounded to four places.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        trim_decimal(format!("{:.4}", v))
    }
}

fn trim_decimal(s: String) -> String {
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
