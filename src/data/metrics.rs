use crate::prelude::HashMap;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One metric value keyed by feature name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDatum {
    pub name: String,
    pub value: f64,
}

/// Static metric values driving the choropleth layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricDataset {
    rows: Vec<MetricDatum>,
    by_name: HashMap<String, f64>,
}

impl MetricDataset {
    pub fn new(rows: Vec<MetricDatum>) -> Self {
        let rows: Vec<MetricDatum> = rows
            .into_iter()
            .filter(|row| !row.name.is_empty() && row.value.is_finite())
            .collect();
        let by_name = rows
            .iter()
            .map(|row| (row.name.clone(), row.value))
            .collect();
        Self { rows, by_name }
    }

    /// Reads `[{"name": ..., "value": ...}]`, skipping rows that don't fit
    pub fn from_value(value: &Value) -> Self {
        let rows = value
            .as_array()
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| MetricDatum::deserialize(row).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self::new(rows)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.by_name.get(name).copied()
    }

    /// Smallest and largest value, if any
    pub fn range(&self) -> Option<(f64, f64)> {
        self.rows.iter().fold(None, |acc, row| match acc {
            None => Some((row.value, row.value)),
            Some((min, max)) => Some((min.min(row.value), max.max(row.value))),
        })
    }

    /// Value rescaled to `[0, 1]` across the dataset range
    pub fn normalized(&self, name: &str) -> Option<f64> {
        let value = self.value(name)?;
        let (min, max) = self.range()?;
        if max > min {
            Some((value - min) / (max - min))
        } else {
            Some(0.5)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricDatum> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[MetricDatum] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skips_unusable_rows() {
        let data = MetricDataset::from_value(&json!([
            {"name": "France", "value": 12.5},
            {"name": "", "value": 3},
            {"name": "Peru"},
            {"value": 8},
            "junk",
            {"name": "Chile", "value": 4}
        ]));
        assert_eq!(data.len(), 2);
        assert_eq!(data.value("France"), Some(12.5));
        assert_eq!(data.value("Chile"), Some(4.0));
        assert_eq!(data.value("Peru"), None);
    }

    #[test]
    fn test_range_and_normalized() {
        let data = MetricDataset::new(vec![
            MetricDatum { name: "A".into(), value: 10.0 },
            MetricDatum { name: "B".into(), value: 30.0 },
            MetricDatum { name: "C".into(), value: f64::NAN },
        ]);
        assert_eq!(data.range(), Some((10.0, 30.0)));
        assert_eq!(data.normalized("A"), Some(0.0));
        assert_eq!(data.normalized("B"), Some(1.0));
        assert_eq!(data.normalized("C"), None);
        assert_eq!(MetricDataset::default().range(), None);
    }

    #[test]
    fn test_non_array_is_empty() {
        assert!(MetricDataset::from_value(&json!({"rows": []})).is_empty());
        assert!(MetricDataset::from_json_str("[").is_err());
    }
}
