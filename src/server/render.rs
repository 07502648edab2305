//! HTML rendering of pipeline snapshots

use crate::core::PipelineSnapshot;
use std::fmt::Write;

const PAGE_TITLE: &str = "DevOps Pipeline Monitor";

/// Render the dashboard page
pub fn render_dashboard(snapshots: &[PipelineSnapshot]) -> String {
    let mut html = String::new();
    html.push_str("<html>\n<head>\n");
    let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
    html.push_str("</head>\n<body>\n");

    if snapshots.is_empty() {
        html.push_str("<p>No pipelines registered</p>\n");
    }

    for snapshot in snapshots {
        let _ = writeln!(
            html,
            "<h1>{} ({})</h1>",
            escape(&snapshot.pipeline_name),
            snapshot.status
        );
        html.push_str("<ul>\n");
        for stage in &snapshot.stages {
            let _ = writeln!(html, "<li>{} ({})</li>", escape(&stage.stage_name), stage.status);
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Escape text for use in HTML element content and attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
