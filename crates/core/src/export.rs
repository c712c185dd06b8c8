//! Printable storyboard export.
//!
//! Renders the full frame collection into a standalone HTML document that
//! can be opened in a browser and printed (or saved as PDF). Every frame
//! gets a card showing its label, tone, type, production flags, content and
//! notes. Empty notes render an explicit placeholder, and frames with no
//! production details yet carry a "Details Pending" badge.

use chrono::NaiveDate;

use crate::frame::Frame;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Document title shown in the browser tab and page header.
pub const DOCUMENT_TITLE: &str = "AI Video Course Storyboard";

/// Placeholder for empty optional notes.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Placeholder for empty suggestions.
pub const NO_SUGGESTIONS: &str = "No suggestions";

/// Placeholder for a frame without content.
pub const NO_CONTENT: &str = "No content specified";

/// Badge shown when scene, camera, editing and costume notes are all empty.
pub const DETAILS_PENDING: &str = "Details Pending";

const STYLESHEET: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Segoe UI', Arial, sans-serif; padding: 30px 40px; color: #1e293b; background: white; line-height: 1.6; }
.header { text-align: center; margin-bottom: 40px; padding-bottom: 20px; border-bottom: 4px solid #2563eb; }
.header h1 { font-size: 28px; color: #1e40af; margin-bottom: 10px; }
.header .meta { color: #64748b; font-size: 14px; }
.frame { page-break-inside: avoid; margin-bottom: 35px; border: 2px solid #e2e8f0; border-radius: 8px; overflow: hidden; }
.frame-header { background: #1e40af; color: white; padding: 15px 20px; }
.frame-header h2 { font-size: 20px; font-weight: 600; }
.frame-body { padding: 20px; }
.badges { display: flex; gap: 8px; flex-wrap: wrap; margin-bottom: 15px; }
.badge { background: #dbeafe; color: #1e40af; padding: 5px 12px; border-radius: 12px; font-size: 11px; font-weight: 600; text-transform: uppercase; }
.badge.pending { background: #fef3c7; color: #92400e; }
.section { margin-bottom: 18px; }
.section-label { font-weight: 700; color: #475569; margin-bottom: 6px; font-size: 12px; text-transform: uppercase; }
.section-value { font-size: 14px; padding: 10px; background: #f8fafc; border-radius: 4px; border-left: 3px solid #2563eb; white-space: pre-wrap; }
.section-value.empty { color: #94a3b8; font-style: italic; border-left-color: #cbd5e1; }
.grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 15px; margin-bottom: 15px; }
.footer { margin-top: 40px; padding-top: 20px; border-top: 2px solid #e2e8f0; text-align: center; color: #64748b; font-size: 12px; }
@media print { body { padding: 20px; } .frame { margin-bottom: 30px; } }
"#;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Default download name for an export produced on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("storyboard-{}.html", date.format("%Y-%m-%d"))
}

/// Render `frames` into a complete HTML document.
pub fn render_html(frames: &[Frame], generated_at: Timestamp) -> String {
    let mut html = String::with_capacity(4096 + frames.len() * 2048);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{DOCUMENT_TITLE} - Export</title>\n"));
    html.push_str(&format!("<style>{STYLESHEET}</style>\n</head>\n<body>\n"));

    html.push_str("<div class=\"header\">\n");
    html.push_str(&format!("<h1>{DOCUMENT_TITLE}</h1>\n<div class=\"meta\">\n"));
    html.push_str(&format!(
        "<p><strong>Generated:</strong> {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&format!(
        "<p><strong>Total Frames:</strong> {}</p>\n</div>\n</div>\n",
        frames.len()
    ));

    for frame in frames {
        render_frame(&mut html, frame);
    }

    html.push_str(
        "<div class=\"footer\">\n<p>AI Video Course Storyboard Export | \
         Generated from Storyboard Management System</p>\n</div>\n</body>\n</html>\n",
    );
    html
}

fn render_frame(html: &mut String, frame: &Frame) {
    html.push_str("<div class=\"frame\">\n<div class=\"frame-header\">\n");
    html.push_str(&format!(
        "<h2>Frame {}</h2>\n</div>\n<div class=\"frame-body\">\n",
        escape_html(&frame.frame_number)
    ));

    html.push_str("<div class=\"badges\">\n");
    push_badge(html, &format!("Tone: {}", frame.frame_tone), false);
    push_badge(html, &format!("Type: {}", frame.frame_type), false);
    push_badge(
        html,
        &format!("Voice Over: {}", yes_no(frame.voice_over_required)),
        false,
    );
    push_badge(
        html,
        &format!("Editing: {}", yes_no(frame.editing_required)),
        false,
    );
    if frame.details_pending() {
        push_badge(html, DETAILS_PENDING, true);
    }
    html.push_str("</div>\n");

    push_section(html, "Content - Dialogues / Narration", &frame.content, NO_CONTENT);

    html.push_str("<div class=\"grid\">\n");
    push_section(
        html,
        "Facilitator Costume / Props",
        &frame.facilitator_costume,
        NOT_SPECIFIED,
    );
    push_section(html, "Frame Type", frame.frame_type.label(), NOT_SPECIFIED);
    html.push_str("</div>\n");

    push_section(html, "Scene Description", &frame.scene_description, NOT_SPECIFIED);
    push_section(
        html,
        "Camera / Cinematographer Notes",
        &frame.camera_note,
        NOT_SPECIFIED,
    );
    push_section(html, "Editing Notes", &frame.editing_note, NOT_SPECIFIED);
    push_section(
        html,
        "Suggestions for Frame Improvement",
        &frame.suggestions,
        NO_SUGGESTIONS,
    );

    html.push_str("</div>\n</div>\n");
}

fn push_badge(html: &mut String, text: &str, pending: bool) {
    let class = if pending { "badge pending" } else { "badge" };
    html.push_str(&format!(
        "<span class=\"{class}\">{}</span>\n",
        escape_html(text)
    ));
}

fn push_section(html: &mut String, label: &str, value: &str, placeholder: &str) {
    html.push_str(&format!(
        "<div class=\"section\">\n<div class=\"section-label\">{label}</div>\n"
    ));
    if value.is_empty() {
        html.push_str(&format!(
            "<div class=\"section-value empty\">{placeholder}</div>\n"
        ));
    } else {
        html.push_str(&format!(
            "<div class=\"section-value\">{}</div>\n",
            escape_html(value)
        ));
    }
    html.push_str("</div>\n");
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Escape text for safe inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
