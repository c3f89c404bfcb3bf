use crate::Location;

pub trait Filter {
    fn matches(&self, location: &Location) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCondition {
    /// Exact, case-sensitive category tag
    HasCategory(String),
    /// Substring of the display name, compared case-insensitively.
    ///
    /// Unlike [`FilterCondition::HasCategory`], `"paris"` matches `"Paris"`.
    NameContains(String),
    And(Vec<FilterCondition>),
    Or(Vec<FilterCondition>),
    Not(Box<FilterCondition>),
}

impl FilterCondition {
    fn matches_condition(condition: &FilterCondition, location: &Location) -> bool {
        match condition {
            FilterCondition::HasCategory(tag) => location.has_category(tag),
            FilterCondition::NameContains(needle) => location
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            FilterCondition::And(conditions) => conditions
                .iter()
                .all(|c| Self::matches_condition(c, location)),
            FilterCondition::Or(conditions) => conditions
                .iter()
                .any(|c| Self::matches_condition(c, location)),
            FilterCondition::Not(condition) => !Self::matches_condition(condition, location),
        }
    }
}

impl Filter for FilterCondition {
    fn matches(&self, location: &Location) -> bool {
        Self::matches_condition(self, location)
    }
}

impl<F> Filter for F
where
    F: Fn(&Location) -> bool,
{
    fn matches(&self, location: &Location) -> bool {
        self(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venice() -> Location {
        Location::new("VN", "Venice").with_categories(["romantic", "coastal", "historical"])
    }

    #[test]
    fn test_composite_conditions() {
        let loc = venice();
        let romantic_coast = FilterCondition::And(vec![
            FilterCondition::HasCategory("romantic".into()),
            FilterCondition::HasCategory("coastal".into()),
        ]);
        assert!(romantic_coast.matches(&loc));

        let not_urban = FilterCondition::Not(Box::new(FilterCondition::HasCategory("urban".into())));
        assert!(not_urban.matches(&loc));

        let either = FilterCondition::Or(vec![
            FilterCondition::HasCategory("urban".into()),
            FilterCondition::NameContains("VEN".into()),
        ]);
        assert!(either.matches(&loc));
    }

    #[test]
    fn test_name_ignores_case_but_category_does_not() {
        let loc = venice();
        assert!(FilterCondition::NameContains("nIcE".into()).matches(&loc));
        assert!(FilterCondition::HasCategory("romantic".into()).matches(&loc));
        assert!(!FilterCondition::HasCategory("Romantic".into()).matches(&loc));
    }

    #[test]
    fn test_empty_and_or() {
        let loc = venice();
        assert!(FilterCondition::And(vec![]).matches(&loc));
        assert!(!FilterCondition::Or(vec![]).matches(&loc));
    }

    #[test]
    fn test_closure_filter() {
        let loc = venice();
        let f = |l: &Location| l.categories.len() == 3;
        assert!(f.matches(&loc));
    }
}
