//! Filter conditions and the composite filter expression.
//!
//! Each filterable column contributes at most one [`FilterCondition`]; the
//! [`Expression`] a data source evaluates is the logical conjunction of all
//! active conditions, in field insertion order.

use super::value::Value;

/// How a condition's value relates to an item's field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Substring match for strings, equality for everything else.
    /// Produced when the user supplies a single filter value.
    Contains,
    /// Membership in a list of candidate values.
    /// Produced when the user supplies multiple filter values.
    MatchAny,
}

/// A single per-field filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// The field this condition applies to.
    pub field: String,
    /// How `values` relates to the item's field value.
    pub operator: FilterOperator,
    /// The condition's value(s): one entry for `Contains`, one or more for
    /// `MatchAny`.
    pub values: Vec<Value>,
}

impl FilterCondition {
    /// Creates a `Contains` condition for a single value.
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::Contains,
            values: vec![value.into()],
        }
    }

    /// Creates a `MatchAny` condition over a list of values.
    pub fn match_any(field: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::MatchAny,
            values: values.into_iter().collect(),
        }
    }

    /// Tests an item's field value against this condition.
    ///
    /// A missing value never matches.
    pub fn matches(&self, value: &Value) -> bool {
        if value.is_none() {
            return false;
        }
        match self.operator {
            FilterOperator::Contains => match self.values.first() {
                Some(Value::String(needle)) => value
                    .as_str()
                    .map(|haystack| haystack.contains(needle.as_str()))
                    .unwrap_or(false),
                Some(expected) => value == expected,
                None => true,
            },
            FilterOperator::MatchAny => self.values.contains(value),
        }
    }
}

/// The composite filter: a conjunction of per-field conditions.
///
/// An empty expression matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    conditions: Vec<FilterCondition>,
}

impl Expression {
    /// Creates an empty expression (matches all items).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an expression from a list of conditions, preserving order.
    pub fn from_conditions(conditions: impl IntoIterator<Item = FilterCondition>) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
        }
    }

    /// Returns `true` if no conditions are active.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// The active conditions, in insertion order.
    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    /// Evaluates the conjunction against one item, using `get_field_value`
    /// to extract the item's value per field.
    pub fn evaluate_with<F>(&self, mut get_field_value: F) -> bool
    where
        F: FnMut(&str) -> Value,
    {
        self.conditions
            .iter()
            .all(|condition| condition.matches(&get_field_value(&condition.field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_substring_on_strings() {
        let condition = FilterCondition::contains("name", "li");
        assert!(condition.matches(&Value::from("Alice")));
        assert!(condition.matches(&Value::from("Charlie")));
        assert!(!condition.matches(&Value::from("Bob")));
    }

    #[test]
    fn test_contains_equality_on_non_strings() {
        let condition = FilterCondition::contains("age", 30i64);
        assert!(condition.matches(&Value::from(30i64)));
        assert!(!condition.matches(&Value::from(31i64)));
    }

    #[test]
    fn test_match_any() {
        let condition =
            FilterCondition::match_any("state", [Value::from("CA"), Value::from("TX")]);
        assert!(condition.matches(&Value::from("CA")));
        assert!(condition.matches(&Value::from("TX")));
        assert!(!condition.matches(&Value::from("ON")));
    }

    #[test]
    fn test_missing_value_never_matches() {
        let contains = FilterCondition::contains("f", "x");
        let any = FilterCondition::match_any("f", [Value::None]);
        assert!(!contains.matches(&Value::None));
        assert!(!any.matches(&Value::None));
    }

    #[test]
    fn test_empty_expression_matches_all() {
        let expression = Expression::new();
        assert!(expression.is_empty());
        assert!(expression.evaluate_with(|_| Value::None));
    }

    #[test]
    fn test_conjunction() {
        let expression = Expression::from_conditions([
            FilterCondition::contains("country", "US"),
            FilterCondition::match_any("state", [Value::from("CA")]),
        ]);

        let us_ca = |field: &str| match field {
            "country" => Value::from("US"),
            "state" => Value::from("CA"),
            _ => Value::None,
        };
        let us_tx = |field: &str| match field {
            "country" => Value::from("US"),
            "state" => Value::from("TX"),
            _ => Value::None,
        };

        assert!(expression.evaluate_with(us_ca));
        assert!(!expression.evaluate_with(us_tx));
    }
}
