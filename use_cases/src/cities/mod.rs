use entities::cities::{City, CityId};
#[cfg(test)]
use mockall::automock;
use std::cmp::Reverse;
use std::sync::Arc;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 1000;

/// Read-only reference data, loaded once at start-up.
#[cfg_attr(test, automock)]
pub trait CityCatalog: Send + Sync {
    fn get_city_by_id(&self, id: &CityId) -> Option<City>;

    fn all(&self) -> Vec<City>;
}

#[derive(Debug, Default, Clone)]
pub struct CityQuery {
    pub country: Option<String>,
    pub region: Option<String>,
    pub min_population: Option<u64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl CityQuery {
    fn matches(&self, city: &City) -> bool {
        let country = self
            .country
            .as_deref()
            .map_or(true, |country| city.country.eq_ignore_ascii_case(country));
        let region = self.region.as_deref().map_or(true, |region| {
            city.region
                .as_deref()
                .map_or(false, |city_region| city_region.eq_ignore_ascii_case(region))
        });
        let population = self
            .min_population
            .map_or(true, |min| city.population.unwrap_or(0) >= min);
        country && region && population
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityPage {
    pub cities: Vec<City>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

pub trait ListCitiesInteractor: Send + Sync {
    fn list(&self, query: CityQuery) -> CityPage;

    fn get(&self, id: &CityId) -> Option<City>;
}

pub struct ListCitiesInteractorImpl {
    catalog: Arc<dyn CityCatalog>,
}

impl ListCitiesInteractorImpl {
    pub fn new(catalog: Arc<dyn CityCatalog>) -> Self {
        Self { catalog }
    }
}

impl ListCitiesInteractor for ListCitiesInteractorImpl {
    #[tracing::instrument(skip(self), level = "info")]
    fn list(&self, query: CityQuery) -> CityPage {
        let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);

        let mut matching = self
            .catalog
            .all()
            .into_iter()
            .filter(|city| query.matches(city))
            .collect::<Vec<_>>();
        // stable, so equally-sized cities keep catalog order
        matching.sort_by_key(|city| Reverse(city.population.unwrap_or(0)));

        let total = matching.len();
        let cities = matching
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        CityPage {
            cities,
            total,
            page,
            limit,
            pages: total / limit + usize::from(total % limit != 0),
        }
    }

    fn get(&self, id: &CityId) -> Option<City> {
        self.catalog.get_city_by_id(id)
    }
}
