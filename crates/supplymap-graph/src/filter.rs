use crate::profile::ViewProfile;
use serde::{Deserialize, Serialize};
use supplymap_core::{CategoryFilter, Entity, SeverityFilter};

/// Predicates applied to the catalog. All of them must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub category: CategoryFilter,
    pub severity: SeverityFilter,
}

impl FilterCriteria {
    pub fn matches(&self, entity: &Entity) -> bool {
        self.matches_search(entity)
            && self.category.matches(entity.category_id)
            && self.severity.matches(entity.stock.severity())
    }

    /// The criteria as they apply on `profile`'s view. Views without
    /// shortage data drop the severity predicate.
    pub fn scoped_to(&self, profile: &ViewProfile) -> FilterCriteria {
        let mut scoped = self.clone();
        if !profile.severity_filter {
            scoped.severity = SeverityFilter::All;
        }
        scoped
    }

    fn matches_search(&self, entity: &Entity) -> bool {
        self.search_term.is_empty()
            || entity
                .name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }
}

/// Visible subset of `entities`, in input order.
pub fn filter_entities<'a>(entities: &'a [Entity], criteria: &FilterCriteria) -> Vec<&'a Entity> {
    entities.iter().filter(|e| criteria.matches(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplymap_catalog::builtin;
    use supplymap_core::{CategoryId, EntityId, Severity};

    fn ids(entities: &[&Entity]) -> Vec<i64> {
        entities.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn test_no_filter_returns_everything_in_order() {
        let catalog = builtin::products_map().unwrap();
        let visible = filter_entities(catalog.entities(), &FilterCriteria::default());
        assert_eq!(ids(&visible), vec![101, 102, 201, 301, 401, 501]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = builtin::products_map().unwrap();
        let criteria = FilterCriteria {
            search_term: "MASKS".to_string(),
            ..Default::default()
        };
        let visible = filter_entities(catalog.entities(), &criteria);
        assert_eq!(ids(&visible), vec![102, 301]);
    }

    #[test]
    fn test_category_filter() {
        let catalog = builtin::partnership_network().unwrap();
        let criteria = FilterCriteria {
            category: CategoryFilter::Only(CategoryId(1)),
            ..Default::default()
        };
        let visible = filter_entities(catalog.entities(), &criteria);
        assert_eq!(ids(&visible), vec![101, 102]);
    }

    #[test]
    fn test_severity_filter() {
        let catalog = builtin::products_map().unwrap();
        let high = FilterCriteria {
            severity: SeverityFilter::Only(Severity::High),
            ..Default::default()
        };
        assert_eq!(ids(&filter_entities(catalog.entities(), &high)), vec![201]);

        let medium = FilterCriteria {
            severity: SeverityFilter::Only(Severity::Medium),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_entities(catalog.entities(), &medium)),
            vec![101, 401, 501]
        );

        // Surplus items have no shortage and fall into `Low`.
        let low = FilterCriteria {
            severity: SeverityFilter::Only(Severity::Low),
            ..Default::default()
        };
        assert_eq!(ids(&filter_entities(catalog.entities(), &low)), vec![102, 301]);
    }

    #[test]
    fn test_severity_ignored_on_partnership() {
        let catalog = builtin::partnership_network().unwrap();
        let criteria = FilterCriteria {
            severity: SeverityFilter::Only(Severity::High),
            ..Default::default()
        };

        let scoped = criteria.scoped_to(&ViewProfile::partnership());
        assert_eq!(scoped.severity, SeverityFilter::All);
        assert_eq!(
            ids(&filter_entities(catalog.entities(), &scoped)),
            vec![101, 102, 201, 301]
        );

        let products = criteria.scoped_to(&ViewProfile::products());
        assert_eq!(products, criteria);
    }

    #[test]
    fn test_predicates_are_anded() {
        let catalog = builtin::products_map().unwrap();
        let criteria = FilterCriteria {
            search_term: "surgical".to_string(),
            category: CategoryFilter::Only(CategoryId(5)),
            severity: SeverityFilter::All,
        };
        let visible = filter_entities(catalog.entities(), &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, EntityId(501));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Every returned entity contains the term; every dropped one does not.
            #[test]
            fn prop_search_is_sound_and_complete(term in "[a-zA-Z0-9 ]{0,6}") {
                let catalog = builtin::products_map().unwrap();
                let criteria = FilterCriteria {
                    search_term: term.clone(),
                    ..Default::default()
                };
                let visible = filter_entities(catalog.entities(), &criteria);
                let needle = term.to_lowercase();

                for entity in catalog.entities() {
                    let contains = entity.name.to_lowercase().contains(&needle);
                    let shown = visible.iter().any(|v| v.id == entity.id);
                    prop_assert_eq!(contains, shown, "entity {}", entity.name);
                }
            }

            /// Output is an order-preserving subsequence of the input.
            #[test]
            fn prop_filter_preserves_order(
                category in prop::option::of(1i64..6),
                severity in prop_oneof![
                    Just(SeverityFilter::All),
                    Just(SeverityFilter::Only(Severity::High)),
                    Just(SeverityFilter::Only(Severity::Medium)),
                    Just(SeverityFilter::Only(Severity::Low)),
                ],
            ) {
                let catalog = builtin::products_map().unwrap();
                let criteria = FilterCriteria {
                    search_term: String::new(),
                    category: category.map(CategoryId).into(),
                    severity,
                };
                let visible = filter_entities(catalog.entities(), &criteria);
                let positions: Vec<usize> = visible
                    .iter()
                    .map(|v| catalog.entities().iter().position(|e| e.id == v.id).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
