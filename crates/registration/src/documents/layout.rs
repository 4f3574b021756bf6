use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point,
};

use crate::error::DocumentError;

pub const A4_SHORT_MM: f32 = 210.0;
pub const A4_LONG_MM: f32 = 297.0;
pub const TEXT_COLUMN_MM: f32 = 170.0;

const PT_TO_MM: f32 = 0.3528;
// Helvetica averages roughly half an em per glyph.
const AVG_GLYPH_EM: f32 = 0.5;
const LINE_HEIGHT_FACTOR: f32 = 1.15;
const BOTTOM_MARGIN_MM: f32 = 20.0;

#[derive(Debug, Clone, Copy)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy)]
pub enum Face {
    Regular,
    Bold,
    TimesRegular,
    TimesBold,
    TimesBoldItalic,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    times: IndirectFontRef,
    times_bold: IndirectFontRef,
    times_bold_italic: IndirectFontRef,
}

/// Thin drawing surface over a printpdf document.
///
/// Coordinates are millimetres measured from the top-left corner; printpdf's
/// bottom-left origin is handled here.
pub struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    width: f32,
    height: f32,
}

impl Canvas {
    pub fn new(title: &str, orientation: Orientation) -> Result<Self, DocumentError> {
        let (width, height) = match orientation {
            Orientation::Portrait => (A4_SHORT_MM, A4_LONG_MM),
            Orientation::Landscape => (A4_LONG_MM, A4_SHORT_MM),
        };
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);

        let font = |builtin| doc.add_builtin_font(builtin).map_err(pdf_error);
        let fonts = Fonts {
            regular: font(BuiltinFont::Helvetica)?,
            bold: font(BuiltinFont::HelveticaBold)?,
            times: font(BuiltinFont::TimesRoman)?,
            times_bold: font(BuiltinFont::TimesBold)?,
            times_bold_italic: font(BuiltinFont::TimesBoldItalic)?,
        };

        Ok(Self {
            doc,
            layer,
            fonts,
            width,
            height,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn font(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.fonts.regular,
            Face::Bold => &self.fonts.bold,
            Face::TimesRegular => &self.fonts.times,
            Face::TimesBold => &self.fonts.times_bold,
            Face::TimesBoldItalic => &self.fonts.times_bold_italic,
        }
    }

    pub fn text(&self, text: &str, size: f32, face: Face, x: f32, y: f32) {
        self.layer
            .use_text(text, size, Mm(x), Mm(self.height - y), self.font(face));
    }

    pub fn centered(&self, text: &str, size: f32, face: Face, center_x: f32, y: f32) {
        let x = (center_x - text_width(text, size) / 2.0).max(0.0);
        self.text(text, size, face, x, y);
    }

    pub fn line(&self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) {
        self.stroke(vec![(x1, y1), (x2, y2)], false, thickness);
    }

    pub fn rect(&self, x: f32, y: f32, w: f32, h: f32, thickness: f32) {
        self.stroke(vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h)], true, thickness);
    }

    fn stroke(&self, points: Vec<(f32, f32)>, is_closed: bool, thickness: f32) {
        self.layer.set_outline_thickness(thickness);
        let points = points
            .into_iter()
            .map(|(x, y)| (Point::new(Mm(x), Mm(self.height - y)), false))
            .collect();
        self.layer.add_line(Line { points, is_closed });
    }

    /// Write wrapped text starting at `y`, continuing on new pages as
    /// needed. Returns the y position below the last line.
    pub fn paragraph(&mut self, text: &str, size: f32, face: Face, x: f32, mut y: f32) -> f32 {
        let step = line_height(size);
        for line in wrap_text(text, size, TEXT_COLUMN_MM) {
            if y > self.height - BOTTOM_MARGIN_MM {
                self.next_page();
                y = BOTTOM_MARGIN_MM;
            }
            if !line.is_empty() {
                self.text(&line, size, face, x, y);
            }
            y += step;
        }
        y
    }

    fn next_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(self.width), Mm(self.height), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    pub fn finish(self) -> Result<Vec<u8>, DocumentError> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error(e: impl std::fmt::Display) -> DocumentError {
    DocumentError::Pdf(e.to_string())
}

pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_EM * PT_TO_MM
}

pub fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * LINE_HEIGHT_FACTOR
}

/// Greedy word wrap to `width_mm`. Explicit newlines are kept, blank lines
/// included; words longer than the column are hard-split.
pub fn wrap_text(text: &str, size: f32, width_mm: f32) -> Vec<String> {
    let max_chars = ((width_mm / (size * AVG_GLYPH_EM * PT_TO_MM)) as usize).max(1);
    let mut lines = Vec::new();

    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();

            let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    lines
}
