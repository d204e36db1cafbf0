//! CSV loading, cleaning, and group splitting
//!
//! The input is a comma-separated table with a header row. Rows whose metric
//! value is missing or non-numeric are dropped before analysis; after
//! cleaning, exactly two group labels must remain and each group needs at
//! least 2 usable rows (Welch's test requires a per-group variance).

use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors for loading and validating the input table
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("input has no header row")]
    MissingHeader,

    #[error("missing required column '{0}' in header")]
    MissingColumn(String),

    #[error("no usable rows after dropping missing/non-numeric metric values")]
    NoUsableRows,

    #[error("expected exactly 2 groups in '{column}', found {found}")]
    GroupCount { column: String, found: usize },

    #[error("group '{label}' has {rows} usable row(s); need at least 2")]
    GroupTooSmall { label: String, rows: usize },
}

/// Cleaned observations split into the two experiment arms.
///
/// Group labels are ordered lexicographically: the first label is treated as
/// control (A), the second as treatment (B).
#[derive(Debug, Clone)]
pub struct GroupedSamples {
    pub group_column: String,
    pub metric_column: String,
    pub control_label: String,
    pub treatment_label: String,
    pub control: Vec<f32>,
    pub treatment: Vec<f32>,
    /// Rows discarded during cleaning (missing fields or non-numeric metric)
    pub dropped_rows: usize,
}

impl GroupedSamples {
    /// Parse CSV content and split it into the two arms.
    pub fn from_csv_str(
        content: &str,
        group_column: &str,
        metric_column: &str,
    ) -> Result<Self, DataError> {
        let mut lines = content.lines();
        let header = lines.next().ok_or(DataError::MissingHeader)?;
        let columns = split_record(header);

        let group_idx = find_column(&columns, group_column)?;
        let metric_idx = find_column(&columns, metric_column)?;

        let mut groups: BTreeMap<String, Vec<f32>> = BTreeMap::new();
        let mut dropped = 0usize;
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_record(line);
            let (label, raw) = match (fields.get(group_idx), fields.get(metric_idx)) {
                (Some(label), Some(raw)) => (label.trim(), raw.trim()),
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            match raw.parse::<f32>() {
                Ok(value) if value.is_finite() && !label.is_empty() => {
                    groups.entry(label.to_string()).or_default().push(value);
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "dropped rows with unusable metric values");
        }

        if groups.is_empty() {
            return Err(DataError::NoUsableRows);
        }
        if groups.len() != 2 {
            return Err(DataError::GroupCount {
                column: group_column.to_string(),
                found: groups.len(),
            });
        }

        let (control_label, control) = groups.pop_first().ok_or(DataError::NoUsableRows)?;
        let (treatment_label, treatment) = groups.pop_first().ok_or(DataError::NoUsableRows)?;

        for (label, samples) in [(&control_label, &control), (&treatment_label, &treatment)] {
            if samples.len() < 2 {
                return Err(DataError::GroupTooSmall {
                    label: label.clone(),
                    rows: samples.len(),
                });
            }
        }

        Ok(Self {
            group_column: group_column.to_string(),
            metric_column: metric_column.to_string(),
            control_label,
            treatment_label,
            control,
            treatment,
            dropped_rows: dropped,
        })
    }
}

/// Load the CSV file at `path` and split it into the two arms.
pub fn load_groups(
    path: &Path,
    group_column: &str,
    metric_column: &str,
) -> Result<GroupedSamples, DataError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    GroupedSamples::from_csv_str(&content, group_column, metric_column)
}

fn find_column(columns: &[String], name: &str) -> Result<usize, DataError> {
    columns
        .iter()
        .position(|c| c.trim() == name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))
}

/// Split one CSV record into fields (handles quoted fields, embedded commas,
/// and doubled quotes).
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "\
group,revenue
a,10.0
a,12.0
b,15.0
b,16.0
";

    #[test]
    fn test_split_record_plain_fields() {
        assert_eq!(split_record("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_record_quoted_comma() {
        assert_eq!(
            split_record("\"x,y\",2.0"),
            vec!["x,y".to_string(), "2.0".to_string()]
        );
    }

    #[test]
    fn test_split_record_doubled_quote() {
        assert_eq!(split_record("\"say \"\"hi\"\"\",1"), vec!["say \"hi\"", "1"]);
    }

    #[test]
    fn test_basic_two_groups() {
        let groups = GroupedSamples::from_csv_str(BASIC, "group", "revenue").unwrap();
        assert_eq!(groups.control_label, "a");
        assert_eq!(groups.treatment_label, "b");
        assert_eq!(groups.control, vec![10.0, 12.0]);
        assert_eq!(groups.treatment, vec![15.0, 16.0]);
        assert_eq!(groups.dropped_rows, 0);
    }

    #[test]
    fn test_labels_sorted_lexicographically() {
        let csv = "group,v\nzeta,1.0\nzeta,2.0\nalpha,3.0\nalpha,4.0\n";
        let groups = GroupedSamples::from_csv_str(csv, "group", "v").unwrap();
        assert_eq!(groups.control_label, "alpha");
        assert_eq!(groups.treatment_label, "zeta");
    }

    #[test]
    fn test_non_numeric_rows_dropped() {
        let csv = "group,v\na,1.0\na,oops\na,2.0\nb,\nb,3.0\nb,4.0\n";
        let groups = GroupedSamples::from_csv_str(csv, "group", "v").unwrap();
        assert_eq!(groups.control, vec![1.0, 2.0]);
        assert_eq!(groups.treatment, vec![3.0, 4.0]);
        assert_eq!(groups.dropped_rows, 2);
    }

    #[test]
    fn test_short_rows_dropped() {
        let csv = "group,v\na,1.0\na\na,2.0\nb,3.0\nb,4.0\n";
        let groups = GroupedSamples::from_csv_str(csv, "group", "v").unwrap();
        assert_eq!(groups.dropped_rows, 1);
    }

    #[test]
    fn test_three_groups_rejected() {
        let csv = "group,v\na,1.0\na,2.0\nb,3.0\nb,4.0\nc,5.0\nc,6.0\n";
        let err = GroupedSamples::from_csv_str(csv, "group", "v").unwrap_err();
        match err {
            DataError::GroupCount { found, .. } => assert_eq!(found, 3),
            other => panic!("expected GroupCount, got {other:?}"),
        }
    }

    #[test]
    fn test_single_group_rejected() {
        let csv = "group,v\na,1.0\na,2.0\n";
        let err = GroupedSamples::from_csv_str(csv, "group", "v").unwrap_err();
        assert!(matches!(err, DataError::GroupCount { found: 1, .. }));
    }

    #[test]
    fn test_group_with_one_usable_row_rejected() {
        let csv = "group,v\na,1.0\na,2.0\nb,3.0\nb,oops\n";
        let err = GroupedSamples::from_csv_str(csv, "group", "v").unwrap_err();
        match err {
            DataError::GroupTooSmall { label, rows } => {
                assert_eq!(label, "b");
                assert_eq!(rows, 1);
            }
            other => panic!("expected GroupTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_column_rejected() {
        let err = GroupedSamples::from_csv_str(BASIC, "group", "conversion").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(name) if name == "conversion"));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = GroupedSamples::from_csv_str("", "group", "v").unwrap_err();
        assert!(matches!(err, DataError::MissingHeader));
    }

    #[test]
    fn test_header_only_rejected() {
        let err = GroupedSamples::from_csv_str("group,v\n", "group", "v").unwrap_err();
        assert!(matches!(err, DataError::NoUsableRows));
    }

    #[test]
    fn test_all_rows_unusable_rejected() {
        let csv = "group,v\na,x\nb,y\n";
        let err = GroupedSamples::from_csv_str(csv, "group", "v").unwrap_err();
        assert!(matches!(err, DataError::NoUsableRows));
    }

    #[test]
    fn test_quoted_labels_and_values() {
        let csv = "group,v\n\"a\",1.0\n\"a\",2.0\n\"b\",3.0\n\"b\",4.0\n";
        let groups = GroupedSamples::from_csv_str(csv, "group", "v").unwrap();
        assert_eq!(groups.control_label, "a");
        assert_eq!(groups.treatment, vec![3.0, 4.0]);
    }

    #[test]
    fn test_load_groups_missing_file() {
        let err = load_groups(Path::new("/nonexistent/input.csv"), "group", "v").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
