//! Output formatting for CLI display
//!
//! Pure string builders; the command handlers decide what to print.

use colored::Colorize;

use crate::bulk::BulkOutcome;
use crate::db::{File, TagCount};
use crate::filters::Breadcrumb;
use crate::pagination::Pagination;

/// One-line listing entry: `  #12 cat.jpg [color:red, size:large]`
#[must_use]
pub fn file_line(file: &File, quiet: bool) -> String {
    if quiet {
        return file.id.to_string();
    }
    let tags = file.tag_strings();
    let id = format!("#{}", file.id).dimmed();
    if tags.is_empty() {
        format!("  {id} {} (no tags)", file.filename)
    } else {
        format!("  {id} {} [{}]", file.filename, tags.join(", ").cyan())
    }
}

/// Multi-line detail view of one file
#[must_use]
pub fn file_details(file: &File) -> String {
    let mut out = format!(
        "{} {}\n  {} {}\n",
        format!("#{}", file.id).bold(),
        file.filename.bold(),
        "path:".dimmed(),
        file.path
    );
    if !file.description.is_empty() {
        out.push_str(&format!("  {} {}\n", "description:".dimmed(), file.description));
    }
    if file.tags.is_empty() {
        out.push_str(&format!("  {}\n", "(no tags)".dimmed()));
    }
    for (category, values) in &file.tags {
        out.push_str(&format!("  {} {}\n", format!("{category}:").green(), values.join(", ")));
    }
    out
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &TagCount, quiet: bool) -> String {
    if quiet {
        format!("{}:{}", tag.category, tag.value)
    } else {
        format!("  {} (used by {} file(s))", tag.value, tag.count)
    }
}

/// `Page 2 of 5 (123 files) | prev: 1 | next: 3`
#[must_use]
pub fn pagination_footer(pagination: &Pagination, total: usize) -> String {
    let mut footer = format!(
        "Page {} of {} ({total} file(s))",
        pagination.current_page, pagination.total_pages
    );
    if pagination.has_prev {
        footer.push_str(&format!(" | prev: --page {}", pagination.prev_page));
    }
    if pagination.has_next {
        footer.push_str(&format!(" | next: --page {}", pagination.next_page));
    }
    footer
}

/// `Home > Tags > Color > Red`
#[must_use]
pub fn breadcrumb_trail(crumbs: &[Breadcrumb]) -> String {
    crumbs
        .iter()
        .map(|b| b.name.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}

/// `Added color:red to 3 file(s) (3 row(s) changed)`
#[must_use]
pub fn bulk_outcome(outcome: &BulkOutcome) -> String {
    let verb = match outcome.operation {
        crate::bulk::BulkOperation::Add => "Added",
        crate::bulk::BulkOperation::Remove => "Removed",
    };
    format!(
        "{verb} {} {} {} file(s) ({} row(s) changed)",
        outcome.tag_label(),
        outcome.operation.preposition(),
        outcome.files_changed,
        outcome.rows_affected
    )
}
