//! Output rendering for API responses.
//!
//! Everything here turns a decoded JSON body into text. Nothing prints;
//! the command layer decides where the text goes.

use crate::api::ReferenceKind;
use colored::{ColoredString, Colorize};
use serde_json::Value;

/// Widest any table column may grow.
pub const MAX_COLUMN_WIDTH: usize = 40;

/// Placeholder for absent fields in the job detail view.
pub const NOT_AVAILABLE: &str = "N/A";

const DETAIL_RULE_WIDTH: usize = 60;

const JOB_COLUMNS: [Column; 4] = [
    Column::new("id", "ID"),
    Column::truncated("title", "Title", 40),
    Column::truncated("employer", "Employer", 30),
    Column::truncated("location", "Location", 25),
];

/// One table column: which field to read and how to label it.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    key: &'static str,
    label: &'static str,
    max_chars: Option<usize>,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            max_chars: None,
        }
    }

    /// A column whose values are cut to `max_chars` before layout.
    pub const fn truncated(key: &'static str, label: &'static str, max_chars: usize) -> Self {
        Self {
            key,
            label,
            max_chars: Some(max_chars),
        }
    }

    fn format(&self, row: &Value) -> String {
        let text = cell_text(row.get(self.key));
        match self.max_chars {
            Some(max) => truncate(&text, max),
            None => text,
        }
    }
}

/// The two list shapes the reference endpoints are known to return.
#[derive(Debug, PartialEq)]
pub enum ListShape<'a> {
    /// `{ "<key>": [...] }`
    Named(&'a [Value]),
    /// `[...]`
    Bare(&'a [Value]),
    /// Empty, or neither of the above.
    Empty,
}

impl<'a> ListShape<'a> {
    pub fn resolve(body: &'a Value, key: &str) -> Self {
        if let Some(items) = body.get(key).and_then(Value::as_array) {
            if !items.is_empty() {
                return ListShape::Named(items);
            }
        }
        match body.as_array() {
            Some(items) if !items.is_empty() => ListShape::Bare(items),
            _ => ListShape::Empty,
        }
    }
}

/// Turns response bodies into terminal text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn success(&self, message: &str) -> String {
        format!("{} {}", self.paint("✓", |s| s.green()), message)
    }

    pub fn failure(&self, message: &str) -> String {
        format!("{} {}", self.paint("✗", |s| s.red()), message)
    }

    pub fn notice(&self, message: &str) -> String {
        self.paint(message, |s| s.yellow())
    }

    /// Lay `rows` out in aligned columns with a header and a rule.
    pub fn table(&self, rows: &[Value], columns: &[Column]) -> String {
        if rows.is_empty() {
            return self.notice("No results found.");
        }

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| columns.iter().map(|c| c.format(row)).collect())
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let longest = cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .max()
                    .unwrap_or(0);
                column.label.chars().count().max(longest).min(MAX_COLUMN_WIDTH)
            })
            .collect();

        let header = join_padded(columns.iter().map(|c| c.label), &widths);
        let rule = "─".repeat(header.chars().count());

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(self.paint(&header, |s| s.bold().cyan()));
        lines.push(self.paint(&rule, |s| s.dimmed()));
        for row in &cells {
            lines.push(join_padded(row.iter().map(String::as_str), &widths));
        }
        lines.join("\n")
    }

    /// Success line plus job table, or the empty notice.
    pub fn job_search(&self, body: &Value) -> String {
        match body.get("jobs").and_then(Value::as_array) {
            Some(jobs) if !jobs.is_empty() => format!(
                "{}\n{}",
                self.success(&format!("Found {} jobs", jobs.len())),
                self.table(jobs, &JOB_COLUMNS)
            ),
            _ => self.notice("No jobs found."),
        }
    }

    /// Labelled key/value block for a single job.
    pub fn job_detail(&self, body: &Value) -> String {
        let job = body.get("job").filter(|j| j.is_object()).unwrap_or(body);

        let mut lines = vec![
            String::new(),
            self.paint("Job Details:", |s| s.bold().cyan()),
            self.paint(&"─".repeat(DETAIL_RULE_WIDTH), |s| s.dimmed()),
        ];
        let fields = [
            ("ID", "id"),
            ("Title", "title"),
            ("Employer", "employer"),
            ("Location", "location"),
            ("Job Type", "job_type"),
            ("Salary", "salary"),
            ("Posted", "posted_date"),
            ("Description", "description"),
        ];
        for (label, key) in fields {
            lines.push(self.labelled(label, &field_or_na(job, key)));
        }
        if let Some(url) = present_text(job, "url") {
            lines.push(self.labelled("URL", &url));
        }
        lines.join("\n")
    }

    /// Job types, industries or regions in whichever shape they arrived.
    pub fn reference_list(&self, kind: ReferenceKind, body: &Value) -> String {
        let noun = noun(kind);
        match ListShape::resolve(body, kind.list_key()) {
            ListShape::Named(items) => {
                let columns = [Column::new("id", "ID"), Column::new("name", name_label(kind))];
                format!(
                    "{}\n{}",
                    self.success(&format!("Found {} {}", items.len(), noun)),
                    self.table(items, &columns)
                )
            }
            ListShape::Bare(items) => {
                let mut lines = vec![self.success(&format!("Found {} {}", items.len(), noun))];
                lines.extend(items.iter().map(|item| format!("  • {}", bullet_name(item))));
                lines.join("\n")
            }
            ListShape::Empty => self.notice(&format!("No {} found.", noun)),
        }
    }

    fn labelled(&self, label: &str, value: &str) -> String {
        format!("{} {}", self.paint(&format!("{}:", label), |s| s.bold()), value)
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Pretty JSON exactly as decoded, for `--json`.
pub fn json(body: &Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(body)
}

/// Table text for a value: strings bare, null and missing empty, anything
/// else as compact JSON.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Detail-view text for `key`, with `N/A` standing in for absent values.
pub fn field_or_na(record: &Value, key: &str) -> String {
    present_text(record, key).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn present_text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        value => Some(cell_text(Some(value))),
    }
}

fn bullet_name(item: &Value) -> String {
    present_text(item, "name").unwrap_or_else(|| cell_text(Some(item)))
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", truncate(cell, width), width = width))
        .collect::<Vec<_>>()
        .join("  ")
}

pub(crate) fn noun(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::JobTypes => "job types",
        ReferenceKind::Industries => "industries",
        ReferenceKind::Regions => "regions",
    }
}

fn name_label(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::JobTypes => "Type Name",
        ReferenceKind::Industries => "Industry Name",
        ReferenceKind::Regions => "Region Name",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain() -> Renderer {
        Renderer::new(false)
    }

    #[test]
    fn test_table_layout() {
        let rows = vec![
            json!({"id": 1, "name": "Construction"}),
            json!({"id": 22, "name": null}),
        ];
        let columns = [Column::new("id", "ID"), Column::new("name", "Industry Name")];
        let out = plain().table(&rows, &columns);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "ID  Industry Name");
        assert_eq!(lines[1], "─".repeat("ID  Industry Name".len()));
        assert_eq!(lines[2], "1   Construction ");
        assert_eq!(lines[3], "22               ");
    }

    #[test]
    fn test_column_width_is_capped() {
        let long = "x".repeat(45);
        let rows = vec![json!({"name": long}), json!({"name": "short"})];
        let out = plain().table(&rows, &[Column::new("name", "Name")]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0].chars().count(), MAX_COLUMN_WIDTH);
        assert_eq!(lines[2], "x".repeat(MAX_COLUMN_WIDTH));
        assert_eq!(lines[3].chars().count(), MAX_COLUMN_WIDTH);
        assert!(lines[3].starts_with("short"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(plain().table(&[], &JOB_COLUMNS), "No results found.");
    }

    #[test]
    fn test_job_search_table() {
        let body = json!({"jobs": [{
            "id": 7,
            "title": "A".repeat(50),
            "employer": "B".repeat(35),
            "location": "Victoria"
        }]});
        let out = plain().job_search(&body);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "✓ Found 1 jobs");
        assert!(lines[1].starts_with("ID  Title"));
        let row = lines[3];
        assert!(row.starts_with("7   "));
        assert!(row.contains(&format!("{}  {}", "A".repeat(40), "B".repeat(30))));
        assert!(!row.contains(&"B".repeat(31)));
        assert!(row.ends_with("Victoria"));
    }

    #[test]
    fn test_job_search_empty() {
        assert_eq!(plain().job_search(&json!({"jobs": []})), "No jobs found.");
        assert_eq!(plain().job_search(&json!({"total": 0})), "No jobs found.");
        assert_eq!(plain().job_search(&json!(null)), "No jobs found.");
    }

    #[test]
    fn test_job_detail_placeholders() {
        let out = plain().job_detail(&json!({"id": 3, "title": ""}));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Job Details:");
        assert_eq!(lines[2].chars().count(), 60);
        assert_eq!(lines[3], "ID: 3");
        assert_eq!(lines[4], "Title: N/A");
        assert_eq!(lines[5], "Employer: N/A");
        assert_eq!(lines[6], "Location: N/A");
        assert_eq!(lines[7], "Job Type: N/A");
        assert_eq!(lines[8], "Salary: N/A");
        assert_eq!(lines[9], "Posted: N/A");
        assert_eq!(lines[10], "Description: N/A");
        assert_eq!(lines.len(), 11);
        assert!(!out.contains("URL:"));
    }

    #[test]
    fn test_job_detail_unwraps_envelope_and_shows_url() {
        let body = json!({"job": {
            "id": "J-1",
            "title": "Baker",
            "salary": 52000,
            "url": "https://example.test/jobs/J-1"
        }});
        let out = plain().job_detail(&body);

        assert!(out.contains("ID: J-1"));
        assert!(out.contains("Title: Baker"));
        assert!(out.contains("Salary: 52000"));
        assert!(out.ends_with("URL: https://example.test/jobs/J-1"));
    }

    #[test]
    fn test_job_detail_missing_id_is_na() {
        let out = plain().job_detail(&json!({}));
        assert!(out.contains("ID: N/A"));
    }

    #[test]
    fn test_reference_named_shape() {
        let body = json!({"types": [{"id": 1, "name": "A"}]});
        let out = plain().reference_list(ReferenceKind::JobTypes, &body);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "✓ Found 1 job types");
        assert_eq!(lines[1], "ID  Type Name");
        assert_eq!(lines[3], "1   A        ");
    }

    #[test]
    fn test_reference_bare_shape() {
        let body = json!(["A", {"name": "B"}, {"id": 3}]);
        let out = plain().reference_list(ReferenceKind::Regions, &body);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "✓ Found 3 regions");
        assert_eq!(lines[1], "  • A");
        assert_eq!(lines[2], "  • B");
        assert_eq!(lines[3], r#"  • {"id":3}"#);
    }

    #[test]
    fn test_reference_counts_match_across_shapes() {
        let named = json!({"industries": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]});
        let bare = json!(["A", "B"]);
        let r = plain();
        let first = |s: String| s.lines().next().unwrap().to_string();

        assert_eq!(
            first(r.reference_list(ReferenceKind::Industries, &named)),
            first(r.reference_list(ReferenceKind::Industries, &bare))
        );
    }

    #[test]
    fn test_reference_empty_or_unknown_shape() {
        let r = plain();
        assert_eq!(
            r.reference_list(ReferenceKind::Industries, &json!({"industries": []})),
            "No industries found."
        );
        assert_eq!(
            r.reference_list(ReferenceKind::Regions, &json!([])),
            "No regions found."
        );
        assert_eq!(
            r.reference_list(ReferenceKind::JobTypes, &json!({"data": ["x"]})),
            "No job types found."
        );
    }

    #[test]
    fn test_list_shape_resolve() {
        let named = json!({"regions": [1]});
        assert!(matches!(
            ListShape::resolve(&named, "regions"),
            ListShape::Named(items) if items.len() == 1
        ));
        assert!(matches!(ListShape::resolve(&json!(["x"]), "regions"), ListShape::Bare(_)));
        assert_eq!(ListShape::resolve(&json!("text"), "regions"), ListShape::Empty);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&json!(null))), "");
        assert_eq!(cell_text(Some(&json!("Kelowna"))), "Kelowna");
        assert_eq!(cell_text(Some(&json!(12))), "12");
        assert_eq!(cell_text(Some(&json!(true))), "true");
    }

    #[test]
    fn test_markers() {
        assert_eq!(plain().success("done"), "✓ done");
        assert_eq!(plain().failure("boom"), "✗ boom");
    }

    #[test]
    fn test_json_keeps_key_order() {
        let body: Value = serde_json::from_str(r#"{"z":1,"a":{"y":2,"b":3}}"#).unwrap();
        assert_eq!(
            json(&body).unwrap(),
            "{\n  \"z\": 1,\n  \"a\": {\n    \"y\": 2,\n    \"b\": 3\n  }\n}"
        );
    }
}
