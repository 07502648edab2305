//! CLI output formatting

use crate::core::{config::PipelineConfig, Status};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a status for display
pub fn format_status(status: Status) -> String {
    match status {
        Status::Pending => style("PENDING").dim().to_string(),
        Status::Running => style("RUNNING").yellow().to_string(),
        Status::Success => style("SUCCESS").green().to_string(),
        Status::Failed => style("FAILED").red().to_string(),
    }
}

/// Format a configured pipeline and its stages, one line each
pub fn format_pipeline(pipeline: &PipelineConfig) -> String {
    let mut lines = vec![format!(
        "  {} [{}]",
        style(&pipeline.name).bold(),
        format_status(pipeline.status)
    )];
    for stage in &pipeline.stages {
        lines.push(format!(
            "    - {} [{}]",
            style(&stage.name).cyan(),
            format_status(stage.status)
        ));
    }
    lines.join("\n")
}
