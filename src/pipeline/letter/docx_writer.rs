use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::ZipWriter;

use super::RenderError;
use crate::pipeline::archive::entry_options;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Body font, applied through the document defaults.
pub const FONT_NAME: &str = "Times New Roman";
/// Half-points: 24 = 12pt.
pub const FONT_SIZE_HALF_POINTS: u32 = 24;

// Twips (1/1440 inch). A4 portrait, 2 cm margins with a 2.5 cm binding edge.
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
const MARGIN_TOP: u32 = 1134;
const MARGIN_BOTTOM: u32 = 1134;
const MARGIN_RIGHT: u32 = 1134;
const MARGIN_LEFT: u32 = 1417;

/// Usable line width between the margins.
pub const TEXT_WIDTH: u32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

// ═══════════════════════════════════════════════════════════
// Document model
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

impl Align {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Justify => "both",
        }
    }
}

/// A stretch of text with one formatting. `\n` becomes a line break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub align: Option<Align>,
    /// Thin rule under the paragraph.
    pub bottom_border: bool,
    /// Space before and after, in points.
    pub spacing_pt: Option<(u32, u32)>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Run::plain(text)])
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn spaced(mut self, before_pt: u32, after_pt: u32) -> Self {
        self.spacing_pt = Some((before_pt, after_pt));
        self
    }

    /// An empty paragraph drawn as a horizontal rule.
    pub fn rule() -> Self {
        Self {
            bottom_border: true,
            spacing_pt: Some((6, 6)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Paragraph::text(text)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column widths in twips.
    pub columns: Vec<u32>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Builds a single-section WordprocessingML document.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.blocks.push(Block::Paragraph(paragraph));
        self
    }

    pub fn table(&mut self, table: Table) -> &mut Self {
        self.blocks.push(Block::Table(table));
        self
    }

    pub fn to_document_xml(&self) -> Result<Vec<u8>, RenderError> {
        let mut xml = XmlOut::new();
        xml.declaration()?;
        xml.start("w:document", &[("xmlns:w", W_NS)])?;
        xml.start("w:body", &[])?;
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => xml.paragraph(p)?,
                Block::Table(t) => xml.table(t)?,
            }
        }
        xml.section()?;
        xml.end("w:body")?;
        xml.end("w:document")?;
        Ok(xml.finish())
    }

    /// Assemble the full `.docx` package.
    pub fn to_docx(&self) -> Result<Vec<u8>, RenderError> {
        let document = self.to_document_xml()?;
        let styles = styles_xml()?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("[Content_Types].xml", entry_options())?;
        zip.write_all(CONTENT_TYPES_XML.as_bytes())?;
        zip.start_file("_rels/.rels", entry_options())?;
        zip.write_all(PACKAGE_RELS_XML.as_bytes())?;
        zip.start_file("word/document.xml", entry_options())?;
        zip.write_all(&document)?;
        zip.start_file("word/_rels/document.xml.rels", entry_options())?;
        zip.write_all(DOCUMENT_RELS_XML.as_bytes())?;
        zip.start_file("word/styles.xml", entry_options())?;
        zip.write_all(&styles)?;
        Ok(zip.finish()?.into_inner())
    }
}

// ═══════════════════════════════════════════════════════════
// Package parts
// ═══════════════════════════════════════════════════════════

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

fn styles_xml() -> Result<Vec<u8>, RenderError> {
    let size = FONT_SIZE_HALF_POINTS.to_string();
    let mut xml = XmlOut::new();
    xml.declaration()?;
    xml.start("w:styles", &[("xmlns:w", W_NS)])?;
    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", FONT_NAME),
            ("w:hAnsi", FONT_NAME),
            ("w:cs", FONT_NAME),
            ("w:eastAsia", FONT_NAME),
        ],
    )?;
    xml.empty("w:sz", &[("w:val", size.as_str())])?;
    xml.empty("w:szCs", &[("w:val", size.as_str())])?;
    xml.empty("w:lang", &[("w:val", "ms-MY")])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:spacing", &[("w:after", "0"), ("w:line", "240"), ("w:lineRule", "auto")])?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;
    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.end("w:style")?;
    xml.end("w:styles")?;
    Ok(xml.finish())
}

// ═══════════════════════════════════════════════════════════
// XML emission
// ═══════════════════════════════════════════════════════════

/// Emit the inside of a run: `w:t` pieces, `\n` as `w:br`, `\t` as `w:tab`.
pub(super) fn write_run_text(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), RenderError> {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            writer.write_event(Event::Empty(BytesStart::new("w:br")))?;
        }
        for (j, piece) in line.split('\t').enumerate() {
            if j > 0 {
                writer.write_event(Event::Empty(BytesStart::new("w:tab")))?;
            }
            if !piece.is_empty() {
                let mut t = BytesStart::new("w:t");
                t.push_attribute(("xml:space", "preserve"));
                writer.write_event(Event::Start(t))?;
                writer.write_event(Event::Text(BytesText::new(piece)))?;
                writer.write_event(Event::End(BytesEnd::new("w:t")))?;
            }
        }
    }
    Ok(())
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    fn declaration(&mut self) -> Result<(), RenderError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(())
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        let mut tag = BytesStart::new(name);
        for attr in attrs {
            tag.push_attribute(*attr);
        }
        self.writer.write_event(Event::Start(tag))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        let mut tag = BytesStart::new(name);
        for attr in attrs {
            tag.push_attribute(*attr);
        }
        self.writer.write_event(Event::Empty(tag))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn paragraph(&mut self, p: &Paragraph) -> Result<(), RenderError> {
        self.start("w:p", &[])?;
        if p.bottom_border || p.spacing_pt.is_some() || p.align.is_some() {
            self.start("w:pPr", &[])?;
            if p.bottom_border {
                self.start("w:pBdr", &[])?;
                self.empty(
                    "w:bottom",
                    &[("w:val", "single"), ("w:sz", "6"), ("w:space", "1"), ("w:color", "000000")],
                )?;
                self.end("w:pBdr")?;
            }
            if let Some((before, after)) = p.spacing_pt {
                // Spacing is in twentieths of a point
                let before = (before * 20).to_string();
                let after = (after * 20).to_string();
                self.empty(
                    "w:spacing",
                    &[("w:before", before.as_str()), ("w:after", after.as_str())],
                )?;
            }
            if let Some(align) = p.align {
                self.empty("w:jc", &[("w:val", align.as_str())])?;
            }
            self.end("w:pPr")?;
        }
        for run in &p.runs {
            self.run(run)?;
        }
        self.end("w:p")
    }

    fn run(&mut self, run: &Run) -> Result<(), RenderError> {
        self.start("w:r", &[])?;
        if run.bold {
            self.start("w:rPr", &[])?;
            self.empty("w:b", &[])?;
            self.empty("w:bCs", &[])?;
            self.end("w:rPr")?;
        }
        write_run_text(&mut self.writer, &run.text)?;
        self.end("w:r")
    }

    fn table(&mut self, t: &Table) -> Result<(), RenderError> {
        self.start("w:tbl", &[])?;
        self.start("w:tblPr", &[])?;
        self.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
        self.empty("w:tblLayout", &[("w:type", "fixed")])?;
        self.end("w:tblPr")?;

        self.start("w:tblGrid", &[])?;
        for width in &t.columns {
            let width = width.to_string();
            self.empty("w:gridCol", &[("w:w", width.as_str())])?;
        }
        self.end("w:tblGrid")?;

        for row in &t.rows {
            self.start("w:tr", &[])?;
            for (idx, cell) in row.iter().enumerate() {
                self.start("w:tc", &[])?;
                if let Some(width) = t.columns.get(idx) {
                    let width = width.to_string();
                    self.start("w:tcPr", &[])?;
                    self.empty("w:tcW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
                    self.end("w:tcPr")?;
                }
                // A cell must hold at least one paragraph
                if cell.paragraphs.is_empty() {
                    self.paragraph(&Paragraph::empty())?;
                }
                for p in &cell.paragraphs {
                    self.paragraph(p)?;
                }
                self.end("w:tc")?;
            }
            self.end("w:tr")?;
        }
        self.end("w:tbl")
    }

    fn section(&mut self) -> Result<(), RenderError> {
        let [width, height, top, right, bottom, left] = [
            PAGE_WIDTH,
            PAGE_HEIGHT,
            MARGIN_TOP,
            MARGIN_RIGHT,
            MARGIN_BOTTOM,
            MARGIN_LEFT,
        ]
        .map(|twips| twips.to_string());

        self.start("w:sectPr", &[])?;
        self.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
        self.empty(
            "w:pgMar",
            &[
                ("w:top", top.as_str()),
                ("w:right", right.as_str()),
                ("w:bottom", bottom.as_str()),
                ("w:left", left.as_str()),
                ("w:header", "708"),
                ("w:footer", "708"),
                ("w:gutter", "0"),
            ],
        )?;
        self.end("w:sectPr")
    }
}
