//! Page-count helper for a bound data source.

use super::source::DataSource;

/// Computes the page count of a bound data source.
///
/// Used to decide whether an operation over the full filtered/sorted scope
/// (select-all, distinct-value harvesting) needs a dedicated full-scope
/// fetch, or whether the already-resident page covers everything.
pub struct DataSourcePager<'a, T> {
    source: &'a dyn DataSource<T>,
}

impl<'a, T> DataSourcePager<'a, T> {
    /// Creates a pager over the given source.
    pub fn new(source: &'a dyn DataSource<T>) -> Self {
        Self { source }
    }

    /// Number of pages in the current view's scope.
    ///
    /// Returns 0 when no view is materialized, and 1 when the source is
    /// unpaged.
    pub fn page_count(&self) -> usize {
        let Some(view) = self.source.view() else {
            return 0;
        };
        match self.source.page_size() {
            Some(page_size) if page_size > 0 => view.total_count.div_ceil(page_size).max(1),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::MemoryDataSource;
    use crate::data::Value;
    use std::sync::Arc;

    fn source_with(count: usize, page_size: usize) -> MemoryDataSource<i64> {
        let items: Vec<i64> = (0..count as i64).collect();
        MemoryDataSource::new(items, Arc::new(|item: &i64, _field: &str| Value::from(*item)))
            .with_page_size(page_size)
    }

    #[tokio::test]
    async fn test_page_count_rounds_up() {
        let source = source_with(25, 10);
        source.data_bind(false).await.unwrap();
        assert_eq!(DataSourcePager::new(&source).page_count(), 3);
    }

    #[tokio::test]
    async fn test_page_count_exact_fit() {
        let source = source_with(20, 10);
        source.data_bind(false).await.unwrap();
        assert_eq!(DataSourcePager::new(&source).page_count(), 2);
    }

    #[test]
    fn test_page_count_without_view() {
        let source = source_with(5, 10);
        assert_eq!(DataSourcePager::new(&source).page_count(), 0);
    }

    #[tokio::test]
    async fn test_page_count_unpaged_source() {
        let items: Vec<i64> = (0..5).collect();
        let source =
            MemoryDataSource::new(items, Arc::new(|item: &i64, _field: &str| Value::from(*item)));
        source.data_bind(false).await.unwrap();
        assert_eq!(DataSourcePager::new(&source).page_count(), 1);
    }

    #[tokio::test]
    async fn test_page_count_empty_scope() {
        let source = source_with(0, 10);
        source.data_bind(false).await.unwrap();
        assert_eq!(DataSourcePager::new(&source).page_count(), 1);
    }
}
