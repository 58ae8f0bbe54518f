const TRUNCATED_MARKER: &str = "\n.[truncated]";
pub const MAX_REPORT_TEXT: usize = 40_960;

pub trait ReportConverter: Send + Sync {
    fn to_text(&self, html: &str) -> String;
}

/// Renders report HTML as Markdown for text surfaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownReportConverter;

impl ReportConverter for MarkdownReportConverter {
    fn to_text(&self, html: &str) -> String {
        truncate_report(html2md::parse_html(html).trim())
    }
}

pub fn truncate_report(text: &str) -> String {
    if text.len() <= MAX_REPORT_TEXT {
        return text.to_string();
    }
    let mut end = MAX_REPORT_TEXT;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{TRUNCATED_MARKER}", &text[..end])
}
