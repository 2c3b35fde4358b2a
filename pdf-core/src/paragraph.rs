use crate::canvas::Canvas;
use crate::fonts::BuiltinFont;
use crate::graphics::Color;

/// Horizontal placement of text within its available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Text styling for a paragraph.
#[derive(Debug, Clone)]
pub struct ParagraphStyle {
    pub font: BuiltinFont,
    /// Font used for runs added with `Paragraph::bold`.
    pub bold_font: BuiltinFont,
    pub font_size: f64,
    /// Baseline-to-baseline distance in points.
    pub leading: f64,
    pub alignment: Alignment,
    pub text_color: Color,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        ParagraphStyle {
            font: BuiltinFont::Helvetica,
            bold_font: BuiltinFont::HelveticaBold,
            font_size: 10.0,
            leading: 12.0,
            alignment: Alignment::Left,
            text_color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone)]
enum Inline {
    Text { text: String, bold: bool },
    LineBreak,
}

/// A block of rich text (regular and bold runs, explicit line breaks)
/// that word-wraps to whatever width it is given.
#[derive(Debug, Clone)]
pub struct Paragraph {
    inlines: Vec<Inline>,
    style: ParagraphStyle,
}

/// One laid-out line: styled runs and their combined width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    runs: Vec<Run>,
    width: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Run {
    font: BuiltinFont,
    text: String,
}

impl Line {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Append a word, merging it into the last run when the font matches.
    fn push_word(&mut self, text: &str, font: BuiltinFont, font_size: f64, with_space: bool) {
        let mut piece = String::with_capacity(text.len() + 1);
        if with_space {
            piece.push(' ');
        }
        piece.push_str(text);
        self.width += font.measure(&piece, font_size);
        match self.runs.last_mut() {
            Some(run) if run.font == font => run.text.push_str(&piece),
            _ => self.runs.push(Run { font, text: piece }),
        }
    }
}

/// A word with its font and whether whitespace preceded it.
#[derive(Debug)]
enum Token {
    Word {
        text: String,
        font: BuiltinFont,
        leading_space: bool,
    },
    Break,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle) -> Self {
        Paragraph {
            inlines: Vec::new(),
            style,
        }
    }

    /// One source line per display line, separated by hard breaks.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], style: ParagraphStyle) -> Self {
        let mut paragraph = Paragraph::new(style);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                paragraph = paragraph.line_break();
            }
            paragraph = paragraph.text(line.as_ref());
        }
        paragraph
    }

    /// Append regular text. Embedded `\n` characters are hard breaks.
    pub fn text(mut self, text: &str) -> Self {
        self.inlines.push(Inline::Text {
            text: text.to_string(),
            bold: false,
        });
        self
    }

    /// Append text in the style's bold font.
    pub fn bold(mut self, text: &str) -> Self {
        self.inlines.push(Inline::Text {
            text: text.to_string(),
            bold: true,
        });
        self
    }

    pub fn line_break(mut self) -> Self {
        self.inlines.push(Inline::LineBreak);
        self
    }

    pub fn style(&self) -> &ParagraphStyle {
        &self.style
    }

    /// The source text with hard breaks as `\n` and styling dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Text { text, .. } => out.push_str(text),
                Inline::LineBreak => out.push('\n'),
            }
        }
        out
    }

    fn tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut had_space = false;
        for inline in &self.inlines {
            let (text, bold) = match inline {
                Inline::LineBreak => {
                    tokens.push(Token::Break);
                    had_space = false;
                    continue;
                }
                Inline::Text { text, bold } => (text, *bold),
            };
            let font = if bold {
                self.style.bold_font
            } else {
                self.style.font
            };
            let mut word = String::new();
            for ch in text.chars() {
                if ch == '\n' || ch.is_whitespace() {
                    if !word.is_empty() {
                        tokens.push(Token::Word {
                            text: std::mem::take(&mut word),
                            font,
                            leading_space: had_space,
                        });
                    }
                    if ch == '\n' {
                        tokens.push(Token::Break);
                        had_space = false;
                    } else {
                        had_space = true;
                    }
                } else {
                    word.push(ch);
                }
            }
            if !word.is_empty() {
                tokens.push(Token::Word {
                    text: word,
                    font,
                    leading_space: had_space,
                });
                had_space = false;
            }
        }
        tokens
    }

    /// Word-wrap into lines no wider than `avail_width`.
    ///
    /// Words wider than the whole line are broken between characters so
    /// nothing is clipped. Always returns at least one line.
    pub fn layout(&self, avail_width: f64) -> Vec<Line> {
        let size = self.style.font_size;
        let mut lines = Vec::new();
        let mut current = Line::default();

        for token in self.tokens() {
            let (text, font, leading_space) = match token {
                Token::Break => {
                    lines.push(std::mem::take(&mut current));
                    continue;
                }
                Token::Word {
                    text,
                    font,
                    leading_space,
                } => (text, font, leading_space),
            };
            let with_space = leading_space && !current.is_empty();
            let space_w = if with_space { font.measure(" ", size) } else { 0.0 };
            let word_w = font.measure(&text, size);

            if current.width + space_w + word_w <= avail_width {
                current.push_word(&text, font, size, with_space);
            } else if word_w <= avail_width {
                lines.push(std::mem::take(&mut current));
                current.push_word(&text, font, size, false);
            } else {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = break_word(&text, avail_width, font, size);
                let last = pieces.pop().unwrap_or_default();
                for piece in pieces {
                    let mut line = Line::default();
                    line.push_word(&piece, font, size, false);
                    lines.push(line);
                }
                current.push_word(&last, font, size, false);
            }
        }
        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Height of the wrapped paragraph at `avail_width`.
    pub fn height(&self, avail_width: f64) -> f64 {
        self.layout(avail_width).len() as f64 * self.style.leading
    }

    /// Split after the first `count` wrapped lines. The halves re-wrap
    /// to the same lines at the same width.
    pub fn split_lines(&self, avail_width: f64, count: usize) -> (Paragraph, Paragraph) {
        let lines = self.layout(avail_width);
        let count = count.min(lines.len());
        (
            self.from_layout(&lines[..count]),
            self.from_layout(&lines[count..]),
        )
    }

    fn from_layout(&self, lines: &[Line]) -> Paragraph {
        let mut paragraph = Paragraph::new(self.style.clone());
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                paragraph = paragraph.line_break();
            }
            for run in &line.runs {
                paragraph = if run.font == self.style.bold_font {
                    paragraph.bold(&run.text)
                } else {
                    paragraph.text(&run.text)
                };
            }
        }
        paragraph
    }

    /// Draw the paragraph with its first line's top at `top`, aligned
    /// within `[x, x + width]`.
    pub fn draw(&self, canvas: &mut Canvas, x: f64, top: f64, width: f64) {
        let lines = self.layout(width);
        self.draw_lines(canvas, &lines, x, top, width);
    }

    /// Draw lines previously produced by `layout`.
    pub fn draw_lines(&self, canvas: &mut Canvas, lines: &[Line], x: f64, top: f64, width: f64) {
        let style = &self.style;
        canvas.set_fill_color(style.text_color);
        // Baseline sits one font size below the line top.
        let mut baseline = top - style.font_size;
        for line in lines {
            let mut run_x = match style.alignment {
                Alignment::Left => x,
                Alignment::Center => x + (width - line.width) / 2.0,
                Alignment::Right => x + width - line.width,
            };
            for run in &line.runs {
                canvas
                    .set_font(run.font, style.font_size)
                    .draw_string(run_x, baseline, &run.text);
                run_x += run.font.measure(&run.text, style.font_size);
            }
            baseline -= style.leading;
        }
    }
}

/// Break a word that is wider than `avail_width` into pieces that each
/// fit. Every piece holds at least one character.
fn break_word(word: &str, avail_width: f64, font: BuiltinFont, font_size: f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for ch in word.chars() {
        let ch_w = font.char_width(ch) as f64 * font_size / 1000.0;
        if width + ch_w > avail_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += ch_w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
