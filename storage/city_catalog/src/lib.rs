use anyhow::Context;
use entities::cities::{City, CityId};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use use_cases::cities::CityCatalog;

/// City reference data read from a JSON array at start-up.
#[derive(Clone)]
pub struct JsonCityCatalog {
    cities: Arc<Vec<City>>,
    index: Arc<HashMap<CityId, usize>>,
}

impl JsonCityCatalog {
    #[tracing::instrument(err, level = "info")]
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read city catalog at {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let cities = serde_json::from_str::<Vec<City>>(raw).context("Invalid city catalog")?;
        Ok(Self::from_cities(cities))
    }

    /// Duplicate ids keep the first record.
    pub fn from_cities(cities: Vec<City>) -> Self {
        let mut index = HashMap::with_capacity(cities.len());
        let mut unique = Vec::with_capacity(cities.len());
        for city in cities {
            if index.contains_key(&city.id) {
                tracing::warn!(city = %city.id, "Duplicate city in catalog, keeping the first");
                continue;
            }
            index.insert(city.id.clone(), unique.len());
            unique.push(city);
        }
        tracing::info!(count = unique.len(), "City catalog loaded");

        Self {
            cities: Arc::new(unique),
            index: Arc::new(index),
        }
    }
}

impl CityCatalog for JsonCityCatalog {
    fn get_city_by_id(&self, id: &CityId) -> Option<City> {
        self.index
            .get(id)
            .and_then(|position| self.cities.get(*position))
            .cloned()
    }

    fn all(&self) -> Vec<City> {
        self.cities.as_ref().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CATALOG: &str = r#"[
        {"id": "paris", "name": "Paris", "country": "France", "coordinates": {"lat": 48.8566, "lng": 2.3522}, "population": 2161000, "isTransportHub": true},
        {"id": "hallstatt", "name": "Hallstatt", "country": "Austria", "coordinates": {"lat": 47.56, "lng": 13.65}, "region": "Central Europe"},
        {"id": "paris", "name": "Paris (again)", "country": "France", "coordinates": {"lat": 0.0, "lng": 0.0}}
    ]"#;

    #[rstest]
    #[case("paris", Some("Paris"))]
    #[case("hallstatt", Some("Hallstatt"))]
    #[case("atlantis", None)]
    fn test_lookup_by_id(#[case] id: &str, #[case] name: Option<&str>) {
        let catalog = JsonCityCatalog::from_json(CATALOG).unwrap();
        let found = catalog.get_city_by_id(&CityId::from(id));
        assert_eq!(found.as_ref().map(|city| city.name.as_str()), name);
    }

    #[test]
    fn test_duplicate_ids_keep_the_first_record() {
        let catalog = JsonCityCatalog::from_json(CATALOG).unwrap();
        let all = catalog.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Paris");
        assert!(all[0].is_transport_hub);
        assert_eq!(all[1].population, None);
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        assert!(JsonCityCatalog::from_json(r#"{"cities": []}"#).is_err());
    }

    #[test]
    fn test_shipped_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configuration/cities.json");
        let catalog = JsonCityCatalog::from_path(&path).unwrap();
        assert!(catalog.get_city_by_id(&CityId::from("paris")).is_some());
    }
}
