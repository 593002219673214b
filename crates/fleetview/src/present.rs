//! Text presentation of view trees.
//!
//! Row keys are identity only and never appear in any format.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::view::{Row, ViewTree};

/// Output format for rendered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Header line followed by `name / make / model` lines
    #[default]
    Plain,
    /// Aligned columns
    Table,
    /// JSON document
    Json,
}

/// Render a view tree as text.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn present(tree: &ViewTree, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tree)?),
        OutputFormat::Plain => Ok(plain(tree)),
        OutputFormat::Table => Ok(table(tree)),
    }
}

fn plain(tree: &ViewTree) -> String {
    match tree {
        ViewTree::Loading { text } => format!("{text}\n"),
        ViewTree::Populated {
            header,
            rows,
            notice,
        } => {
            let mut out = String::new();
            if let Some(notice) = notice {
                let _ = writeln!(out, "warning: {notice}");
            }
            let _ = writeln!(out, "{}", header.text);
            for row in rows {
                let _ = writeln!(out, "{} / {} / {}", row.name, row.make, row.model);
            }
            out
        }
    }
}

fn table(tree: &ViewTree) -> String {
    let ViewTree::Populated {
        header,
        rows,
        notice,
    } = tree
    else {
        return plain(tree);
    };

    let mut out = String::new();
    if let Some(notice) = notice {
        let _ = writeln!(out, "warning: {notice}");
    }
    let _ = writeln!(out, "{}", header.text);
    if rows.is_empty() {
        return out;
    }

    let width = |heading: &str, cell: fn(&Row) -> &str| {
        rows.iter()
            .map(|row| cell(row).chars().count())
            .max()
            .unwrap_or(0)
            .max(heading.len())
    };
    let name_w = width("NAME", |r| r.name.as_str());
    let make_w = width("MAKE", |r| r.make.as_str());

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<name_w$}  {:<make_w$}  MODEL", "NAME", "MAKE");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<name_w$}  {:<make_w$}  {}",
            row.name, row.make, row.model
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Snapshot;
    use crate::record::Record;
    use crate::view::ListView;

    fn populated() -> ViewTree {
        ListView::default().render(&Snapshot::resolved(vec![
            Record::new("1", "Car A", "Acme", "X1"),
            Record::new("2", "Long Name Van", "Borg", "B2"),
        ]))
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_plain_populated() {
        let text = present(&populated(), OutputFormat::Plain).unwrap();
        assert_eq!(
            text,
            "Found 2 vehicles\nCar A / Acme / X1\nLong Name Van / Borg / B2\n"
        );
    }

    #[test]
    fn test_plain_loading() {
        let tree = ListView::default().render(&Snapshot::loading());
        assert_eq!(present(&tree, OutputFormat::Plain).unwrap(), "Loading...\n");
        assert_eq!(present(&tree, OutputFormat::Table).unwrap(), "Loading...\n");
    }

    #[test]
    fn test_plain_empty() {
        let tree = ListView::default().render(&Snapshot::resolved(Vec::new()));
        assert_eq!(
            present(&tree, OutputFormat::Plain).unwrap(),
            "Found 0 vehicles\n"
        );
    }

    #[test]
    fn test_plain_notice() {
        let tree = ListView::default().render(&Snapshot::failed("backend offline"));
        let text = present(&tree, OutputFormat::Plain).unwrap();
        assert!(text.starts_with("warning: backend offline\n"));
        assert!(text.ends_with("Found 0 vehicles\n"));
    }

    #[test]
    fn test_table_alignment() {
        let text = present(&populated(), OutputFormat::Table).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Found 2 vehicles");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "NAME           MAKE  MODEL");
        assert_eq!(lines[3], "Car A          Acme  X1");
        assert_eq!(lines[4], "Long Name Van  Borg  B2");
    }

    #[test]
    fn test_table_empty_has_no_heading() {
        let tree = ListView::default().render(&Snapshot::resolved(Vec::new()));
        let text = present(&tree, OutputFormat::Table).unwrap();
        assert!(!text.contains("NAME"));
    }

    #[test]
    fn test_json_populated() {
        let text = present(&populated(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["state"], "populated");
        assert_eq!(value["header"]["count"], 2);
        assert_eq!(value["rows"][1]["name"], "Long Name Van");
        assert!(value["rows"][0].get("key").is_none());
    }

    #[test]
    fn test_json_loading() {
        let tree = ListView::default().render(&Snapshot::loading());
        let value: serde_json::Value =
            serde_json::from_str(&present(&tree, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value["state"], "loading");
    }
}
