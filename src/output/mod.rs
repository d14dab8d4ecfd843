//! Terminal output: coloured messages, the numbered file list and merge
//! summaries.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::merge::MergeReport;

/// Display merge statistics. Only shown in verbose mode.
pub fn display_merge_report(formatter: &OutputFormatter, report: &MergeReport) {
    if !formatter.is_verbose() {
        return;
    }

    formatter.section("Statistics");
    formatter.detail("Input files", &report.merge.files_merged.to_string());
    formatter.detail("Total pages", &report.merge.total_pages.to_string());
    formatter.detail("Input size", &report.merge.format_input_size());
    formatter.detail("Output size", &report.write.format_file_size());
    formatter.detail(
        "Load time",
        &format!("{:.2}s", report.merge.load_time.as_secs_f64()),
    );
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", report.merge.merge_time.as_secs_f64()),
    );
    formatter.detail(
        "Write time",
        &format!("{:.2}s", report.write.write_time.as_secs_f64()),
    );
    formatter.detail(
        "Compression",
        if report.write.compressed { "Yes" } else { "No" },
    );
}
