//! The data source contract consumed by the grid.
//!
//! A [`DataSource`] materializes paged, sorted, filtered views of an
//! external dataset. The grid layer never reimplements that logic; it only
//! instructs the source to re-sort/re-filter/re-bind and re-derives its own
//! state from the resulting [`View`] snapshots.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use super::error::DataError;
use super::expression::Expression;
use super::value::Value;

/// Sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

/// One entry of a sort specification.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    /// The field to sort by.
    pub field: String,
    /// The direction to sort in.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort spec for a field and direction.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// An immutable snapshot of fetched data.
///
/// A view is superseded wholesale by each new fetch and never mutated in
/// place; holders of an `Arc<View<T>>` can rely on it staying fixed.
#[derive(Debug, Clone)]
pub struct View<T> {
    /// The current page of items.
    pub data: Vec<T>,
    /// Total number of items in the filtered/sorted scope, across all pages.
    pub total_count: usize,
    /// The sort spec this view was produced under.
    pub sorted_by: Vec<SortSpec>,
    /// The filter expression this view was produced under.
    pub filtered_by: Expression,
    /// The complete unpaged dataset, when resident.
    pub all_data: Option<Vec<T>>,
}

impl<T> View<T> {
    /// The complete unpaged dataset, if the source keeps it resident.
    pub fn all_data(&self) -> Option<&[T]> {
        self.all_data.as_deref()
    }
}

/// Options for a one-shot [`DataSource::get_view`] fetch.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Filter to fetch under.
    pub filtered_by: Expression,
    /// Sort to fetch under.
    pub sorted_by: Vec<SortSpec>,
}

/// Extracts a named field's value from an opaque item.
pub trait FieldAccessor<T>: Send + Sync {
    /// Returns the value of `field` on `item`, or [`Value::None`] when the
    /// item has no such field.
    fn get_value(&self, item: &T, field: &str) -> Value;
}

impl<T, F> FieldAccessor<T> for F
where
    F: Fn(&T, &str) -> Value + Send + Sync,
{
    fn get_value(&self, item: &T, field: &str) -> Value {
        self(item, field)
    }
}

/// A source of paged, sorted, filtered data.
///
/// `sort` and `filter` only replace the active descriptors; nothing is
/// refetched until [`data_bind`](Self::data_bind) runs. Fetch failures are
/// not interpreted by the grid layer; they propagate to whatever awaited the
/// returned future.
pub trait DataSource<T>: Send + Sync {
    /// The current view, or `None` before the first bind.
    fn view(&self) -> Option<Arc<View<T>>>;

    /// Replaces the active sort spec. Does not refetch.
    fn sort(&self, sorted_by: Vec<SortSpec>);

    /// Replaces the active filter expression. Does not refetch.
    fn filter(&self, filtered_by: Expression);

    /// Asynchronously (re)fetches the current page under the active sort and
    /// filter, replacing [`view`](Self::view).
    fn data_bind(&self, force_reload: bool) -> BoxFuture<'_, Result<Arc<View<T>>, DataError>>;

    /// One-shot fetch of a view - potentially spanning all pages - without
    /// mutating bound state.
    fn get_view(&self, options: ViewOptions) -> BoxFuture<'_, Result<Arc<View<T>>, DataError>>;

    /// The accessor used to extract field values from items.
    fn field_accessor(&self) -> &dyn FieldAccessor<T>;

    /// Items per page, or `None` when the source is unpaged.
    fn page_size(&self) -> Option<usize>;
}
