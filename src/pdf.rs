use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;
use tracing::info;

use crate::generation::GenerationOutcome;
use crate::models::WorkoutPreferences;

pub const MIME_TYPE: &str = "application/pdf";
pub const TITLE: &str = "Personalized Workout Plan";
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const MM: f32 = 72.0 / 25.4;
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 10.0 * MM;
const BOTTOM_MARGIN: f32 = 20.0 * MM;
const CELL_PADDING: f32 = 1.0 * MM;
const LINE_HEIGHT: f32 = 10.0 * MM;
const FONT_SIZE: f32 = 12.0;
// Courier glyphs are all 600/1000 em wide.
const CHAR_WIDTH: f32 = FONT_SIZE * 0.6;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not write PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not build PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

#[derive(Clone, Debug)]
pub struct PdfArtifact {
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl PdfArtifact {
    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(dir)?;
        let target = dir.join(&self.file_name);
        fs::write(&target, &self.bytes)?;
        info!(path = %target.display(), mime = self.mime_type(), "Downloaded workout plan PDF");
        Ok(target)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

pub type Page = Vec<PlacedLine>;

struct PageCursor {
    pages: Vec<Page>,
    top: f32,
}

impl PageCursor {
    fn new() -> Self {
        PageCursor {
            pages: vec![Vec::new()],
            top: MARGIN,
        }
    }

    fn advance(&mut self, height: f32) {
        self.top += height;
    }

    fn line(&mut self, text: String, centered: bool) {
        if self.top + LINE_HEIGHT > PAGE_HEIGHT - BOTTOM_MARGIN {
            self.pages.push(Vec::new());
            self.top = MARGIN;
        }

        let x = if centered {
            (PAGE_WIDTH - text.chars().count() as f32 * CHAR_WIDTH) / 2.0
        } else {
            MARGIN + CELL_PADDING
        };
        // Baseline sits mid-cell, nudged down by 30% of the font size.
        let y = PAGE_HEIGHT - (self.top + LINE_HEIGHT / 2.0 + 0.3 * FONT_SIZE);

        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedLine { x, y, text });
        }
        self.top += LINE_HEIGHT;
    }
}

pub fn wrap_columns() -> usize {
    ((PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_PADDING) / CHAR_WIDTH).floor() as usize
}

/// Greedy word wrap. Newlines are kept, leading indentation is kept on the
/// first line of a paragraph, words wider than a line are split.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.replace('\t', "    ").lines() {
        let indent = paragraph.len() - paragraph.trim_start_matches(' ').len();
        let mut current = " ".repeat(indent.min(columns - 1));
        let mut current_len = current.len();
        let mut has_word = false;
        let start = lines.len();

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let mut chars: Vec<char> = word.chars().collect();

            if has_word && current_len + 1 + chars.len() > columns {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                has_word = false;
            }

            while !has_word && current_len + chars.len() > columns {
                let room = columns - current_len;
                current.extend(chars.drain(..room));
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if has_word {
                current.push(' ');
                current_len += 1;
            }
            current_len += chars.len();
            current.extend(chars);
            has_word = true;
        }

        if has_word {
            lines.push(current);
        } else if lines.len() == start {
            lines.push(String::new());
        }
    }

    lines
}

pub fn layout(body: &str, preferences: &WorkoutPreferences) -> Vec<Page> {
    let mut cursor = PageCursor::new();

    cursor.line(TITLE.to_string(), true);
    cursor.advance(LINE_HEIGHT);
    for line in preferences.metadata_lines() {
        cursor.line(line, false);
    }
    cursor.advance(LINE_HEIGHT);
    for line in wrap_text(body, wrap_columns()) {
        cursor.line(line, false);
    }

    cursor.pages
}

// Single-byte WinAnsi, as the standard Type1 fonts expect.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

pub fn build_pdf(pages: &[Page]) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        ];
        for line in page {
            operations.push(Operation::new(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    line.x.into(),
                    line.y.into(),
                ],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(&line.text))],
            ));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(TITLE),
        "Creator" => Object::string_literal(env!("CARGO_PKG_NAME")),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

pub fn file_name(now: &DateTime<Local>) -> String {
    format!("Workout_Plan_{}.pdf", now.format(FILE_TIMESTAMP_FORMAT))
}

#[derive(Clone, Debug)]
pub struct DocumentRenderer {
    output_dir: PathBuf,
}

impl DocumentRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        DocumentRenderer {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn render(
        &self,
        outcome: &GenerationOutcome,
        preferences: &WorkoutPreferences,
        now: &DateTime<Local>,
    ) -> Result<PdfArtifact, RenderError> {
        let body = match outcome {
            GenerationOutcome::Success(plan) => plan.as_str(),
            GenerationOutcome::Failure(message) => message.as_str(),
        };

        let pages = layout(body, preferences);
        let bytes = build_pdf(&pages)?;

        let file_name = file_name(now);
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&file_name);
        fs::write(&path, &bytes)?;

        info!(path = %path.display(), pages = pages.len(), "Wrote workout plan PDF");

        Ok(PdfArtifact {
            file_name,
            path,
            bytes,
        })
    }
}
