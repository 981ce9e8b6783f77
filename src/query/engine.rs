//! Brewery query pipeline
//!
//! filter → sort → paginate → project, each stage materialized eagerly.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{
    BreweryEntity, BreweryOutput, PagedResult, SearchRequest, SortBy, SortOrder,
};

use super::geo::haversine_km;

/// Upper bound on autocomplete suggestions
pub const MAX_SUGGESTIONS: usize = 10;

/// Runs the full pipeline for one request.
///
/// `total_count` is the size of the sorted set before pagination. Distance
/// sorting drops breweries without coordinates, so they do not count there.
pub fn execute(breweries: &[BreweryEntity], request: &SearchRequest) -> PagedResult<BreweryOutput> {
    let position = request.user_position();

    let filtered = filter(breweries, request);
    let sorted = sort(filtered, request.sort_by, request.sort_order, position);
    let total_count = sorted.len();
    let page = paginate(&sorted, request.page, request.page_size);
    let items = project(page, position);

    PagedResult::new(items, total_count, request.page, request.page_size)
}

// == Filter ==
/// Keeps breweries matching every non-blank filter in `request`.
///
/// Term matches the name, city matches the city, state matches the state;
/// all are case-insensitive substring matches.
pub fn filter<'a>(breweries: &'a [BreweryEntity], request: &SearchRequest) -> Vec<&'a BreweryEntity> {
    let term = lowered(&request.search_term);
    let city = lowered(&request.city);
    let state = lowered(&request.state);

    breweries
        .iter()
        .filter(|b| term.as_deref().map_or(true, |t| contains_lowered(&b.name, t)))
        .filter(|b| city.as_deref().map_or(true, |c| contains_lowered(&b.city, c)))
        .filter(|b| state.as_deref().map_or(true, |s| contains_lowered(&b.state, s)))
        .collect()
}

// == Sort ==
/// Orders breweries by the requested key.
///
/// Distance needs a caller position and drops breweries without
/// coordinates; without a position, or for an unrecognized key, the order
/// is by name ascending.
pub fn sort<'a>(
    mut breweries: Vec<&'a BreweryEntity>,
    sort_by: SortBy,
    order: SortOrder,
    position: Option<(f64, f64)>,
) -> Vec<&'a BreweryEntity> {
    match (sort_by, position) {
        (SortBy::Name, _) => breweries.sort_by(|a, b| directed(a.name.cmp(&b.name), order)),
        (SortBy::City, _) => breweries.sort_by(|a, b| directed(a.city.cmp(&b.city), order)),
        (SortBy::Distance, Some(origin)) => return sort_by_distance(breweries, origin, order),
        (SortBy::Distance, None) | (SortBy::Unrecognized, _) => {
            breweries.sort_by(|a, b| a.name.cmp(&b.name))
        }
    }
    breweries
}

fn sort_by_distance<'a>(
    breweries: Vec<&'a BreweryEntity>,
    origin: (f64, f64),
    order: SortOrder,
) -> Vec<&'a BreweryEntity> {
    let mut measured: Vec<(&BreweryEntity, f64)> = breweries
        .into_iter()
        .filter_map(|b| b.coordinates().map(|at| (b, haversine_km(origin, at))))
        .collect();

    measured.sort_by(|a, b| directed(a.1.total_cmp(&b.1), order));
    measured.into_iter().map(|(b, _)| b).collect()
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

// == Paginate ==
/// Slice for a 1-based `page` of `page_size` items.
///
/// Out-of-range pages are empty. Values are used as given: page 0 behaves
/// like page 1 and a zero page size yields nothing.
pub fn paginate<T>(items: &[T], page: u32, page_size: u32) -> &[T] {
    let size = page_size as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

// == Project ==
/// Maps breweries to output records, attaching distance when both the
/// caller position and the brewery coordinates are known.
pub fn project(breweries: &[&BreweryEntity], position: Option<(f64, f64)>) -> Vec<BreweryOutput> {
    breweries
        .iter()
        .map(|b| {
            let distance = position
                .zip(b.coordinates())
                .map(|(origin, at)| haversine_km(origin, at));
            BreweryOutput::from_entity(b, distance)
        })
        .collect()
}

// == Suggest ==
/// Distinct brewery names containing `term` (case-insensitive), sorted
/// ascending and capped at `limit`.
pub fn suggest_names(breweries: &[BreweryEntity], term: &str, limit: usize) -> Vec<String> {
    let needle = term.to_lowercase();
    let names: BTreeSet<&str> = breweries
        .iter()
        .filter(|b| contains_lowered(&b.name, &needle))
        .map(|b| b.name.as_str())
        .collect();

    names.into_iter().take(limit).map(str::to_string).collect()
}

/// Lowercased filter value, or None when absent or blank.
fn lowered(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_lowercase)
}

/// `needle` must already be lowercase.
fn contains_lowered(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brewery(id: &str, name: &str, city: &str, state: &str, at: Option<(f64, f64)>) -> BreweryEntity {
        BreweryEntity {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            latitude: at.map(|p| p.0),
            longitude: at.map(|p| p.1),
            ..Default::default()
        }
    }

    fn dataset() -> Vec<BreweryEntity> {
        vec![
            brewery("1", "Dogfish Head", "Milton", "Delaware", Some((38.78, -75.31))),
            brewery("2", "Great Divide", "Denver", "Colorado", Some((39.75, -104.99))),
            brewery("3", "Avery Brewing", "Boulder", "Colorado", Some((40.06, -105.20))),
            brewery("4", "Bissell Brothers", "Portland", "Maine", None),
            brewery("5", "Zipline Brewing", "Lincoln", "Nebraska", Some((40.80, -96.70))),
        ]
    }

    fn names(items: &[BreweryOutput]) -> Vec<&str> {
        items.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_dog_scenario() {
        let data = vec![
            brewery("1", "Dogfish Head", "Milton", "Delaware", None),
            brewery("2", "Great Divide", "Denver", "Colorado", None),
        ];
        let request = SearchRequest {
            search_term: Some("dog".to_string()),
            page: 1,
            page_size: 20,
            ..Default::default()
        };

        let result = execute(&data, &request);
        assert_eq!(result.total_count, 1);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.items[0].name, "Dogfish Head");
    }

    #[test]
    fn test_filters_are_anded() {
        let data = dataset();
        let request = SearchRequest {
            search_term: Some("BREW".to_string()),
            state: Some("colo".to_string()),
            ..Default::default()
        };

        let result = execute(&data, &request);
        assert_eq!(names(&result.items), vec!["Avery Brewing"]);
    }

    #[test]
    fn test_mixed_case_filters_match() {
        let data = dataset();
        let request = SearchRequest {
            search_term: Some("gReAt".to_string()),
            city: Some("DENver".to_string()),
            state: Some("coLORADO".to_string()),
            ..Default::default()
        };

        let result = execute(&data, &request);
        assert_eq!(names(&result.items), vec!["Great Divide"]);
        assert_eq!(
            suggest_names(&data, "BREW", MAX_SUGGESTIONS),
            vec!["Avery Brewing", "Zipline Brewing"]
        );
    }

    #[test]
    fn test_blank_filters_ignored() {
        let data = dataset();
        let request = SearchRequest {
            search_term: Some("   ".to_string()),
            city: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(execute(&data, &request).total_count, data.len());
    }

    #[test]
    fn test_sort_by_name_desc() {
        let data = dataset();
        let request = SearchRequest {
            sort_order: SortOrder::Desc,
            ..Default::default()
        };

        let result = execute(&data, &request);
        assert_eq!(result.items[0].name, "Zipline Brewing");
        assert_eq!(result.items[4].name, "Avery Brewing");
    }

    #[test]
    fn test_sort_by_city_asc() {
        let data = dataset();
        let request = SearchRequest {
            sort_by: SortBy::City,
            ..Default::default()
        };

        let cities: Vec<_> = execute(&data, &request)
            .items
            .into_iter()
            .map(|b| b.city)
            .collect();
        assert_eq!(cities, vec!["Boulder", "Denver", "Lincoln", "Milton", "Portland"]);
    }

    #[test]
    fn test_sort_by_distance_excludes_missing_coordinates() {
        let data = dataset();
        let request = SearchRequest {
            sort_by: SortBy::Distance,
            user_latitude: Some(39.74),
            user_longitude: Some(-104.99),
            ..Default::default()
        };

        let result = execute(&data, &request);
        assert_eq!(result.total_count, 4);
        assert_eq!(
            names(&result.items),
            vec!["Great Divide", "Avery Brewing", "Zipline Brewing", "Dogfish Head"]
        );
        assert!(result.items.iter().all(|b| b.distance.is_some()));
        assert!(result.items[0].distance.unwrap() < 2.0);
    }

    #[test]
    fn test_sort_by_distance_desc() {
        let data = dataset();
        let request = SearchRequest {
            sort_by: SortBy::Distance,
            sort_order: SortOrder::Desc,
            user_latitude: Some(39.74),
            user_longitude: Some(-104.99),
            ..Default::default()
        };

        let result = execute(&data, &request);
        assert_eq!(result.items[0].name, "Dogfish Head");
        assert_eq!(result.items[3].name, "Great Divide");
    }

    #[test]
    fn test_distance_without_position_falls_back_to_name_asc() {
        let data = dataset();
        let request = SearchRequest {
            sort_by: SortBy::Distance,
            sort_order: SortOrder::Desc,
            user_latitude: Some(39.74),
            ..Default::default()
        };

        let result = execute(&data, &request);
        assert_eq!(result.total_count, 5);
        assert_eq!(result.items[0].name, "Avery Brewing");
        assert!(result.items.iter().all(|b| b.distance.is_none()));
    }

    #[test]
    fn test_unrecognized_sort_falls_back_to_name_asc() {
        let data = dataset();
        let request = SearchRequest {
            sort_by: SortBy::Unrecognized,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };

        assert_eq!(execute(&data, &request).items[0].name, "Avery Brewing");
    }

    #[test]
    fn test_distance_attached_regardless_of_sort_key() {
        let data = dataset();
        let request = SearchRequest {
            sort_by: SortBy::Name,
            user_latitude: Some(39.74),
            user_longitude: Some(-104.99),
            ..Default::default()
        };

        let result = execute(&data, &request);
        let bissell = result
            .items
            .iter()
            .find(|b| b.name == "Bissell Brothers")
            .unwrap();
        assert!(bissell.distance.is_none());
        assert_eq!(result.items.iter().filter(|b| b.distance.is_some()).count(), 4);
    }

    #[test]
    fn test_page_out_of_range() {
        let data: Vec<_> = dataset().into_iter().take(3).collect();
        let request = SearchRequest {
            page: 5,
            page_size: 20,
            ..Default::default()
        };

        let result = execute(&data, &request);
        assert!(result.items.is_empty());
        assert_eq!(result.total_count, 3);
        assert_eq!(result.page, 5);
    }

    #[test]
    fn test_paginate_slices() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(paginate(&items, 1, 2), &[1, 2]);
        assert_eq!(paginate(&items, 3, 2), &[5]);
        assert!(paginate(&items, 4, 2).is_empty());
        assert_eq!(paginate(&items, 0, 2), &[1, 2]);
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate(&items, u32::MAX, u32::MAX).is_empty());
    }

    #[test]
    fn test_suggest_names() {
        let data = vec![
            brewery("1", "abbott", "", "", None),
            brewery("2", "Zymo", "", "", None),
            brewery("3", "Abbey Ale", "", "", None),
            brewery("4", "Abbey Ale", "", "", None),
        ];

        assert_eq!(
            suggest_names(&data, "ab", MAX_SUGGESTIONS),
            vec!["Abbey Ale", "abbott"]
        );
    }

    #[test]
    fn test_suggest_names_capped() {
        let data: Vec<_> = (0..25)
            .map(|i| brewery(&i.to_string(), &format!("Brew {i:02}"), "", "", None))
            .collect();

        let suggestions = suggest_names(&data, "brew", MAX_SUGGESTIONS);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "Brew 00");
        assert_eq!(suggestions[9], "Brew 09");
    }
}
