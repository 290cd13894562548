use crate::series::{Reading, Series};
use serde::{Deserialize, Serialize};

/// A named body of water (e.g. a lake) and the series measured in it,
/// one per parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaterBody {
    pub name: String,
    series: Vec<Series>,
}

impl WaterBody {
    pub fn new(name: impl Into<String>) -> WaterBody {
        WaterBody {
            name: name.into(),
            series: Vec::new(),
        }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, parameter: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.parameter() == parameter)
    }

    /// Add a series, or append its readings onto the existing series of the
    /// same parameter.
    pub fn merge(&mut self, series: Series) {
        match self
            .series
            .iter_mut()
            .find(|s| s.parameter() == series.parameter())
        {
            Some(existing) => existing.extend(series.readings().iter().copied()),
            None => self.series.push(series),
        }
    }

    /// Latest value of every non-empty series, in series order.
    pub fn snapshot(&self) -> QualitySnapshot {
        let mut snapshot = QualitySnapshot::default();
        for series in &self.series {
            if let Ok(Reading { value, .. }) = series.latest() {
                snapshot.insert(series.parameter(), *value);
            }
        }
        snapshot
    }
}

/// Current value per parameter for one water body. Keeps insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QualitySnapshot {
    entries: Vec<(String, f64)>,
}

impl QualitySnapshot {
    pub fn new() -> QualitySnapshot {
        QualitySnapshot::default()
    }

    /// Set a parameter's current value, replacing any earlier one.
    pub fn insert(&mut self, parameter: impl Into<String>, value: f64) {
        let parameter = parameter.into();
        match self.entries.iter_mut().find(|(name, _)| *name == parameter) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((parameter, value)),
        }
    }

    pub fn get(&self, parameter: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == parameter)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for QualitySnapshot {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut snapshot = QualitySnapshot::default();
        for (parameter, value) in iter {
            snapshot.insert(parameter, value);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_latest_values() {
        let mut lake = WaterBody::new("Lake Chapala");
        lake.merge(
            Series::new("pH")
                .append("02/01/24", 7.2)
                .and_then(|s| s.append("01/01/24", 7.0))
                .unwrap(),
        );
        lake.merge(Series::new("Turbidity").append("05/01/24", 3.5).unwrap());
        lake.merge(Series::new("Nitrates"));

        let snapshot = lake.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("pH"), Some(7.2));
        assert_eq!(snapshot.get("Turbidity"), Some(3.5));
        assert_eq!(snapshot.get("Nitrates"), None);
        let order: Vec<&str> = snapshot.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["pH", "Turbidity"]);
    }

    #[test]
    fn test_merge_appends_to_existing_series() {
        let mut lake = WaterBody::new("Lake Chapala");
        lake.merge(Series::new("pH").append("01/01/24", 7.0).unwrap());
        lake.merge(Series::new("pH").append("03/01/24", 7.6).unwrap());
        assert_eq!(lake.series().len(), 1);
        let ph = lake.get("pH").unwrap();
        assert_eq!(ph.len(), 2);
        assert_eq!(ph.latest().unwrap().value, 7.6);
    }

    #[test]
    fn test_snapshot_insert_replaces() {
        let mut snapshot: QualitySnapshot = vec![("pH", 7.0), ("Nitrates", 2.0)].into_iter().collect();
        snapshot.insert("pH", 8.0);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("pH"), Some(8.0));
    }
}
