//! Column configuration.

use std::sync::Arc;

use crate::data::Value;

use super::cell::{template_for, ColumnKind, ColumnTemplate};
use super::container::Grid;

/// Configuration of one grid column.
///
/// Columns are sortable by default and filterable on request, matching how
/// most grids configure them. A column without a field can still render
/// through its template (selector and expander columns work this way) but
/// ignores sort and filter triggers.
pub struct GridColumn<T> {
    /// The item field this column is bound to, if any.
    pub field: Option<String>,
    /// Header title.
    pub title: String,
    /// Whether the header's sort trigger is honored.
    pub is_sortable: bool,
    /// Whether the column offers a filter popup.
    pub is_filterable: bool,
    value: Option<Arc<dyn Fn(&T) -> Value + Send + Sync>>,
    kind: ColumnKind,
    template: Arc<dyn ColumnTemplate<T>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> GridColumn<T> {
    fn with_kind(field: Option<String>, kind: ColumnKind) -> Self {
        Self {
            title: field.clone().unwrap_or_default(),
            field,
            is_sortable: kind == ColumnKind::Default,
            is_filterable: false,
            value: None,
            kind,
            template: template_for(kind),
        }
    }

    /// Creates a column bound to `field`, titled after it.
    pub fn new(field: impl Into<String>) -> Self {
        Self::with_kind(Some(field.into()), ColumnKind::Default)
    }

    /// Creates a column bound to no field.
    pub fn unbound() -> Self {
        Self::with_kind(None, ColumnKind::Default)
    }

    /// Creates a row-selection checkbox column.
    pub fn selector() -> Self {
        Self::with_kind(None, ColumnKind::Selector)
    }

    /// Creates a row-expansion toggle column.
    pub fn expander() -> Self {
        Self::with_kind(None, ColumnKind::Expander)
    }

    /// Sets the header title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Disables sorting for this column.
    pub fn not_sortable(mut self) -> Self {
        self.is_sortable = false;
        self
    }

    /// Enables the filter popup for this column.
    pub fn filterable(mut self) -> Self {
        self.is_filterable = true;
        self
    }

    /// Overrides how this column extracts a value from an item, instead of
    /// going through the data source's field accessor.
    pub fn with_value(mut self, value: impl Fn(&T) -> Value + Send + Sync + 'static) -> Self {
        self.value = Some(Arc::new(value));
        self
    }

    /// Installs a caller-supplied template.
    pub fn with_template(mut self, template: impl ColumnTemplate<T> + 'static) -> Self {
        self.kind = ColumnKind::Custom;
        self.template = Arc::new(template);
        self
    }

    /// The built-in variant this column renders as.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// The template rendering this column's cells.
    pub fn template(&self) -> &Arc<dyn ColumnTemplate<T>> {
        &self.template
    }

    /// Extracts this column's value from an item, through the override when
    /// one is set and the data source's accessor otherwise.
    pub fn value_of(&self, grid: &Grid<T>, item: &T) -> Value {
        if let Some(value) = &self.value {
            return value(item);
        }
        match &self.field {
            Some(field) => grid.data_source().field_accessor().get_value(item, field),
            None => Value::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let column = GridColumn::<i64>::new("age");
        assert_eq!(column.field.as_deref(), Some("age"));
        assert_eq!(column.title, "age");
        assert!(column.is_sortable);
        assert!(!column.is_filterable);
        assert_eq!(column.kind(), ColumnKind::Default);
    }

    #[test]
    fn test_builders() {
        let column = GridColumn::<i64>::new("age")
            .with_title("Age")
            .not_sortable()
            .filterable();
        assert_eq!(column.title, "Age");
        assert!(!column.is_sortable);
        assert!(column.is_filterable);
    }

    #[test]
    fn test_special_columns_have_no_field_and_no_sort() {
        let selector = GridColumn::<i64>::selector();
        assert_eq!(selector.field, None);
        assert!(!selector.is_sortable);
        assert_eq!(selector.kind(), ColumnKind::Selector);

        let expander = GridColumn::<i64>::expander();
        assert!(!expander.is_sortable);
        assert_eq!(expander.kind(), ColumnKind::Expander);
    }
}
