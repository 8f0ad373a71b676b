//! Data layer: values, filter expressions, and the data source contract.
//!
//! The grid layer treats data access as a black box behind [`DataSource`].
//! This module provides the vocabulary that contract speaks - [`Value`],
//! [`Expression`], [`SortSpec`], [`View`] - plus the shared
//! [`FilterContext`] registry and an in-memory reference source.

mod error;
mod expression;
mod filter_context;
mod memory;
mod pager;
mod source;
mod value;

pub use error::{DataError, Result};
pub use expression::{Expression, FilterCondition, FilterOperator};
pub use filter_context::FilterContext;
pub use memory::MemoryDataSource;
pub use pager::DataSourcePager;
pub use source::{DataSource, FieldAccessor, SortDirection, SortSpec, View, ViewOptions};
pub use value::Value;
