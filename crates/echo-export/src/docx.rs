use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};
use tracing::{info, warn};

use crate::error::ExportError;
use crate::render::StandardReport;
use crate::styles::DocumentStyles;

/// Generate a DOCX document for a standard report.
///
/// The narrative body uses the subset emitted by the narrative generator:
/// - `<p>…</p>` → paragraph
/// - `<strong>` → bold run
/// - `<u>` → underlined run
/// - `<br/>` → line break
pub fn generate_docx(report: &StandardReport, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Title", "title", styles.title_size))
        .add_style(heading_style("Heading1", "heading 1", styles.heading_size));

    docx = docx
        .add_paragraph(heading_paragraph(&report.title, "Title", styles))
        .add_paragraph(body_paragraph(&format!("for {}", report.subject), styles));

    for row in &report.metadata {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(text_run(&format!("{}: ", row.label), styles).bold())
                .add_run(text_run(&row.value, styles)),
        );
    }

    docx = docx.add_paragraph(heading_paragraph("Report", "Heading1", styles));
    for paragraph in paragraphs(&report.body) {
        docx = docx.add_paragraph(html_paragraph(paragraph, styles));
    }

    docx = docx
        .add_paragraph(Paragraph::new())
        .add_paragraph(body_paragraph(&format!("Created by: {}", report.created_by), styles))
        .add_paragraph(body_paragraph(&format!("Approved by: {}", report.approved_by), styles));

    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).map_err(|e| {
        warn!(error = %e, title = %report.title, "docx packing failed");
        ExportError::Docx(e.to_string())
    })?;

    let bytes = buf.into_inner();
    info!(title = %report.title, bytes = bytes.len(), "docx generated");
    Ok(bytes)
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

fn heading_paragraph(text: &str, style_id: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(text)
            .bold()
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(text_run(text, styles))
}

fn text_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Inner HTML of each `<p>` element, in order.
pub fn paragraphs(html: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut remaining = html;
    while let Some(start) = remaining.find("<p>") {
        let after = &remaining[start + 3..];
        match after.find("</p>") {
            Some(end) => {
                out.push(&after[..end]);
                remaining = &after[end + 4..];
            }
            None => {
                out.push(after);
                break;
            }
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// A segment of inline text with its formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text {
        text: String,
        bold: bool,
        underline: bool,
    },
    Break,
}

/// Parse the inline markup of one paragraph. Unknown tags are dropped.
pub fn parse_inline(html: &str) -> Vec<Inline> {
    let mut segments = Vec::new();
    let (mut bold, mut underline) = (false, false);
    let mut remaining = html;

    while let Some(start) = remaining.find('<') {
        push_text(&mut segments, &remaining[..start], bold, underline);
        let Some(end) = remaining[start..].find('>') else {
            // No closing '>', treat rest as text
            push_text(&mut segments, &remaining[start..], bold, underline);
            return segments;
        };
        let tag = remaining[start + 1..start + end].trim().to_ascii_lowercase();
        match tag.trim_end_matches('/').trim() {
            "strong" | "b" => bold = true,
            "/strong" | "/b" => bold = false,
            "u" => underline = true,
            "/u" => underline = false,
            "br" => segments.push(Inline::Break),
            _ => {}
        }
        remaining = &remaining[start + end + 1..];
    }
    push_text(&mut segments, remaining, bold, underline);
    segments
}

fn push_text(segments: &mut Vec<Inline>, text: &str, bold: bool, underline: bool) {
    if !text.is_empty() {
        segments.push(Inline::Text {
            text: decode_entities(text),
            bold,
            underline,
        });
    }
}

fn html_paragraph(html: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for segment in parse_inline(html) {
        let run = match segment {
            Inline::Break => Run::new().add_break(BreakType::TextWrapping),
            Inline::Text {
                text,
                bold,
                underline,
            } => {
                let mut run = text_run(&text, styles);
                if bold {
                    run = run.bold();
                }
                if underline {
                    run = run.underline("single");
                }
                run
            }
        };
        para = para.add_run(run);
    }
    para
}
