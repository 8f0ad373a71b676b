//! In-memory data source.
//!
//! [`MemoryDataSource`] serves the [`DataSource`](super::DataSource)
//! contract from an owned `Vec<T>`: a filter pass over the full dataset,
//! then a sort pass, then paging. It backs small client-side grids and the
//! crate's own tests; a remote source would implement the same trait against
//! a server instead.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use parking_lot::RwLock;

use super::error::DataError;
use super::expression::Expression;
use super::source::{DataSource, FieldAccessor, SortDirection, SortSpec, View, ViewOptions};

/// Mutable bound state: the active descriptors and the last materialized
/// view.
struct BoundState<T> {
    sorted_by: Vec<SortSpec>,
    filtered_by: Expression,
    view: Option<Arc<View<T>>>,
}

/// A data source over an in-memory dataset.
///
/// `sort` and `filter` update the active descriptors only; the view changes
/// when [`data_bind`](DataSource::data_bind) runs. The full filtered/sorted
/// dataset is always resident, so every view carries `all_data`.
pub struct MemoryDataSource<T> {
    items: Vec<T>,
    accessor: Arc<dyn FieldAccessor<T>>,
    page_size: Option<usize>,
    state: RwLock<BoundState<T>>,
}

impl<T: Clone + Send + Sync + 'static> MemoryDataSource<T> {
    /// Creates an unpaged source over `items`.
    pub fn new(items: Vec<T>, accessor: Arc<dyn FieldAccessor<T>>) -> Self {
        Self {
            items,
            accessor,
            page_size: None,
            state: RwLock::new(BoundState {
                sorted_by: Vec::new(),
                filtered_by: Expression::new(),
                view: None,
            }),
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Applies a filter pass, then a sort pass, over the full dataset.
    fn materialize(&self, filtered_by: &Expression, sorted_by: &[SortSpec]) -> Vec<T> {
        let mut rows: Vec<T> = self
            .items
            .iter()
            .filter(|item| {
                filtered_by.evaluate_with(|field| self.accessor.get_value(item, field))
            })
            .cloned()
            .collect();

        if !sorted_by.is_empty() {
            rows.sort_by(|a, b| {
                for spec in sorted_by {
                    let value_a = self.accessor.get_value(a, &spec.field);
                    let value_b = self.accessor.get_value(b, &spec.field);
                    let ordering = match spec.direction {
                        SortDirection::Ascending => value_a.compare(&value_b),
                        SortDirection::Descending => value_a.compare(&value_b).reverse(),
                    };
                    if ordering != std::cmp::Ordering::Equal {
                        return ordering;
                    }
                }
                std::cmp::Ordering::Equal
            });
        }

        rows
    }

    fn first_page(&self, rows: &[T]) -> Vec<T> {
        match self.page_size {
            Some(page_size) => rows.iter().take(page_size).cloned().collect(),
            None => rows.to_vec(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> DataSource<T> for MemoryDataSource<T> {
    fn view(&self) -> Option<Arc<View<T>>> {
        self.state.read().view.clone()
    }

    fn sort(&self, sorted_by: Vec<SortSpec>) {
        self.state.write().sorted_by = sorted_by;
    }

    fn filter(&self, filtered_by: Expression) {
        self.state.write().filtered_by = filtered_by;
    }

    fn data_bind(&self, _force_reload: bool) -> BoxFuture<'_, Result<Arc<View<T>>, DataError>> {
        Box::pin(async move {
            let (filtered_by, sorted_by) = {
                let state = self.state.read();
                (state.filtered_by.clone(), state.sorted_by.clone())
            };

            let rows = self.materialize(&filtered_by, &sorted_by);
            let view = Arc::new(View {
                data: self.first_page(&rows),
                total_count: rows.len(),
                sorted_by,
                filtered_by,
                all_data: Some(rows),
            });

            self.state.write().view = Some(view.clone());
            tracing::debug!(
                target: "trellis::data",
                total_count = view.total_count,
                "data bound"
            );
            Ok(view)
        })
    }

    fn get_view(&self, options: ViewOptions) -> BoxFuture<'_, Result<Arc<View<T>>, DataError>> {
        Box::pin(async move {
            let rows = self.materialize(&options.filtered_by, &options.sorted_by);
            Ok(Arc::new(View {
                total_count: rows.len(),
                data: rows.clone(),
                sorted_by: options.sorted_by,
                filtered_by: options.filtered_by,
                all_data: Some(rows),
            }))
        })
    }

    fn field_accessor(&self) -> &dyn FieldAccessor<T> {
        self.accessor.as_ref()
    }

    fn page_size(&self) -> Option<usize> {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::expression::FilterCondition;
    use crate::data::Value;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: &'static str,
        age: i64,
    }

    fn person_accessor() -> Arc<dyn FieldAccessor<Person>> {
        Arc::new(|person: &Person, field: &str| match field {
            "name" => Value::from(person.name),
            "age" => Value::from(person.age),
            _ => Value::None,
        })
    }

    fn people() -> Vec<Person> {
        vec![
            Person { name: "Charlie", age: 35 },
            Person { name: "Alice", age: 30 },
            Person { name: "Bob", age: 25 },
            Person { name: "David", age: 20 },
        ]
    }

    #[tokio::test]
    async fn test_bind_without_descriptors() {
        let source = MemoryDataSource::new(people(), person_accessor());
        let view = source.data_bind(false).await.unwrap();

        assert_eq!(view.total_count, 4);
        assert_eq!(view.data.len(), 4);
        assert_eq!(view.data[0].name, "Charlie"); // source order preserved
    }

    #[tokio::test]
    async fn test_sort_takes_effect_on_bind_only() {
        let source = MemoryDataSource::new(people(), person_accessor());
        source.data_bind(false).await.unwrap();

        source.sort(vec![SortSpec::new("name", SortDirection::Ascending)]);
        // Not rebound yet: the view still shows the old order.
        assert_eq!(source.view().unwrap().data[0].name, "Charlie");

        source.data_bind(false).await.unwrap();
        let names: Vec<_> = source.view().unwrap().data.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie", "David"]);
    }

    #[tokio::test]
    async fn test_sort_descending() {
        let source = MemoryDataSource::new(people(), person_accessor());
        source.sort(vec![SortSpec::new("age", SortDirection::Descending)]);
        let view = source.data_bind(false).await.unwrap();

        let ages: Vec<_> = view.data.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![35, 30, 25, 20]);
    }

    #[tokio::test]
    async fn test_filter_narrows_scope() {
        let source = MemoryDataSource::new(people(), person_accessor());
        source.filter(Expression::from_conditions([FilterCondition::match_any(
            "age",
            [Value::from(30i64), Value::from(35i64)],
        )]));
        let view = source.data_bind(false).await.unwrap();

        assert_eq!(view.total_count, 2);
        let names: Vec<_> = view.data.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Charlie", "Alice"]);
    }

    #[tokio::test]
    async fn test_paging() {
        let source = MemoryDataSource::new(people(), person_accessor()).with_page_size(3);
        let view = source.data_bind(false).await.unwrap();

        assert_eq!(view.data.len(), 3);
        assert_eq!(view.total_count, 4);
        assert_eq!(view.all_data().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_get_view_spans_all_pages_without_mutating_state() {
        let source = MemoryDataSource::new(people(), person_accessor()).with_page_size(2);
        source.data_bind(false).await.unwrap();
        let bound = source.view().unwrap();

        let fetched = source
            .get_view(ViewOptions {
                filtered_by: Expression::new(),
                sorted_by: vec![SortSpec::new("name", SortDirection::Ascending)],
            })
            .await
            .unwrap();

        assert_eq!(fetched.data.len(), 4);
        assert_eq!(fetched.data[0].name, "Alice");
        // The bound view is untouched.
        assert!(Arc::ptr_eq(&bound, &source.view().unwrap()));
    }
}
