//! `inventa audit`: filter a JSON dump of audit entries, then print one page
//! or export every match as CSV.
//!
//! ## Flow
//! ```text
//! logs.json ──► Vec<AuditLogEntry> ──► filter_logs (newest first)
//!                                            │
//!                          ┌─────────────────┴─────────────────┐
//!                          ▼                                   ▼
//!                    --csv <PATH>                        paginate(page)
//!                  to_csv ──► file                      table / JSON page
//! ```

use std::io::Write;
use std::path::Path;

use inventa_core::{filter_logs, paginate, to_csv, AuditFilter, AuditLogEntry};
use tracing::info;

use super::Output;
use crate::cli::AuditArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub fn execute<W: Write>(
    args: &AuditArgs,
    config: &AppConfig,
    output: Output<'_>,
    out: &mut W,
) -> CliResult<u8> {
    let filter = build_filter(args);
    filter.validate()?;

    let entries = read_entries(&args.file)?;
    let matching = filter_logs(&entries, &filter);

    if let Some(path) = &args.csv {
        let count = matching.len();
        let text = to_csv(matching)?;
        std::fs::write(path, text).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        info!(count, path = %path.display(), "Exported audit entries");

        if output.json {
            output.write_json(
                out,
                &serde_json::json!({ "exported": count, "path": path.display().to_string() }),
            )?;
        } else {
            writeln!(out, "Exported {} entries to {}", count, path.display())?;
        }
        return Ok(0);
    }

    let page_size = args.page_size.unwrap_or(config.audit.page_size);
    let page = paginate(matching, args.page, page_size)?;

    if output.json {
        output.write_json(out, &page)?;
        return Ok(0);
    }

    if page.items.is_empty() {
        writeln!(out, "No audit entries match")?;
        return Ok(0);
    }

    writeln!(
        out,
        "{:<20} {:<12} {:<8} {:<10} {:<10} DESCRIPTION",
        "TIMESTAMP", "USER", "ACTION", "ENTITY", "ID"
    )?;
    for entry in &page.items {
        writeln!(
            out,
            "{:<20} {:<12} {:<8} {:<10} {:<10} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.user,
            entry.action,
            entry.entity,
            entry.entity_id.as_deref().unwrap_or("-"),
            entry.description.as_deref().unwrap_or("")
        )?;
    }
    writeln!(
        out,
        "Page {} of {} ({} entries)",
        page.page, page.total_pages, page.total_items
    )?;

    Ok(0)
}

fn build_filter(args: &AuditArgs) -> AuditFilter {
    AuditFilter {
        user: args.user.clone(),
        action: args.action.clone(),
        entity: args.entity.clone(),
        from: args.from.map(|bound| bound.start()),
        to: args.to.map(|bound| bound.end()),
        search: args.search.clone(),
    }
}

/// Reads a JSON array of entries.
fn read_entries(path: &Path) -> CliResult<Vec<AuditLogEntry>> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}
