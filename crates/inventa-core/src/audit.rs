//! # Audit Logs
//!
//! Filtering, pagination and CSV export for audit log entries fetched from
//! the backend.
//!
//! ## Query Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  entries (any order)                                                    │
//! │       │                                                                 │
//! │       ▼  filter_logs(entries, &filter)                                  │
//! │  matching entries, newest first                                         │
//! │       │                                                                 │
//! │       ├──► paginate(matching, page, page_size) → Page { items, ... }   │
//! │       │                                                                 │
//! │       └──► to_csv(matching) → "id,timestamp,user,..." (export button)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_date_range, validate_page_size, ValidationResult};

// =============================================================================
// Entry
// =============================================================================

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    /// Username of whoever performed the action.
    pub user: String,
    /// "CREATE", "UPDATE", "DELETE", "LOGIN", ...
    pub action: String,
    /// Affected entity type: "product", "sale", "purchase", ...
    pub entity: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

// =============================================================================
// Filter
// =============================================================================

/// Criteria for [`filter_logs`]. Unset fields match everything; set fields
/// are combined with AND. Text comparisons ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditFilter {
    /// Substring of the user name.
    pub user: Option<String>,
    /// Exact action.
    pub action: Option<String>,
    /// Exact entity type.
    pub entity: Option<String>,
    /// Inclusive lower bound.
    #[ts(as = "Option<String>")]
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    #[ts(as = "Option<String>")]
    pub to: Option<DateTime<Utc>>,
    /// Substring of description, entity id, user or entity.
    pub search: Option<String>,
}

impl AuditFilter {
    /// Rejects a `from` that is after `to`.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_date_range(self.from, self.to)
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == AuditFilter::default()
    }

    /// True when `entry` satisfies every set criterion.
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        if let Some(user) = non_blank(&self.user) {
            if !contains_ignore_case(&entry.user, user) {
                return false;
            }
        }

        if let Some(action) = non_blank(&self.action) {
            if !entry.action.eq_ignore_ascii_case(action) {
                return false;
            }
        }

        if let Some(entity) = non_blank(&self.entity) {
            if !entry.entity.eq_ignore_ascii_case(entity) {
                return false;
            }
        }

        if self.from.is_some_and(|from| entry.timestamp < from) {
            return false;
        }

        if self.to.is_some_and(|to| entry.timestamp > to) {
            return false;
        }

        if let Some(term) = non_blank(&self.search) {
            let haystacks = [
                entry.description.as_deref(),
                entry.entity_id.as_deref(),
                Some(entry.user.as_str()),
                Some(entry.entity.as_str()),
            ];
            if !haystacks
                .into_iter()
                .flatten()
                .any(|text| contains_ignore_case(text, term))
            {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns the entries matching `filter`, newest first. Entries with equal
/// timestamps keep their input order.
pub fn filter_logs<'a>(entries: &'a [AuditLogEntry], filter: &AuditFilter) -> Vec<&'a AuditLogEntry> {
    let mut matching: Vec<&AuditLogEntry> = entries.iter().filter(|e| filter.matches(e)).collect();
    matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    debug!(
        total = entries.len(),
        matching = matching.len(),
        "Filtered audit log"
    );
    matching
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually returned.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// Always at least 1.
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Cuts `items` into pages of `page_size` and returns page `page` (1-based).
///
/// A page past the end returns the last page; page 0 returns the first.
///
/// ```rust
/// use inventa_core::audit::paginate;
///
/// let page = paginate((1..=45).collect::<Vec<_>>(), 3, 20).unwrap();
/// assert_eq!(page.items, vec![41, 42, 43, 44, 45]);
/// assert_eq!(page.total_pages, 3);
/// assert!(!page.has_next());
/// ```
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> ValidationResult<Page<T>> {
    validate_page_size(page_size)?;

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    })
}

// =============================================================================
// CSV Export
// =============================================================================

const CSV_HEADER: [&str; 8] = [
    "id",
    "timestamp",
    "user",
    "action",
    "entity",
    "entity_id",
    "description",
    "ip_address",
];

/// Renders entries as CSV text (header row first, RFC 3339 timestamps).
pub fn to_csv<'a, I>(entries: I) -> CoreResult<String>
where
    I: IntoIterator<Item = &'a AuditLogEntry>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    let mut rows = 0usize;
    for entry in entries {
        writer.write_record([
            entry.id.to_string().as_str(),
            entry.timestamp.to_rfc3339().as_str(),
            entry.user.as_str(),
            entry.action.as_str(),
            entry.entity.as_str(),
            entry.entity_id.as_deref().unwrap_or(""),
            entry.description.as_deref().unwrap_or(""),
            entry.ip_address.as_deref().unwrap_or(""),
        ])?;
        rows += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::CsvExport(e.to_string()))?;
    debug!(rows, "Rendered audit log CSV");

    String::from_utf8(bytes).map_err(|e| CoreError::CsvExport(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
