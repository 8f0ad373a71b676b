//! Trellis - a coordination layer for interactive tabular-data widgets.
//!
//! Trellis keeps the stateful heart of a data grid consistent: multi-row
//! selection, the active sort field and direction, and per-column filter
//! conditions, while the data itself is fetched asynchronously from a
//! [`DataSource`](data::DataSource).
//!
//! Rendering is deliberately out of scope; the [`grid::ColumnTemplate`]
//! capability interface is the seam a presentation layer plugs into.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trellis::data::{DataSource, MemoryDataSource, Value};
//! use trellis::grid::{GridBuilder, GridColumn, SelectionMode};
//!
//! #[derive(Clone, PartialEq)]
//! struct City {
//!     name: String,
//!     country: String,
//! }
//!
//! # async fn run(cities: Vec<City>) -> Result<(), trellis::data::DataError> {
//! let source: Arc<dyn DataSource<City>> = Arc::new(
//!     MemoryDataSource::new(
//!         cities,
//!         Arc::new(|city: &City, field: &str| match field {
//!             "name" => Value::from(city.name.clone()),
//!             "country" => Value::from(city.country.clone()),
//!             _ => Value::None,
//!         }),
//!     )
//!     .with_page_size(25),
//! );
//! source.data_bind(false).await?;
//!
//! let grid = GridBuilder::new(source)
//!     .selection_mode(SelectionMode::Multiple)
//!     .column(GridColumn::selector())
//!     .column(GridColumn::new("name").with_title("City"))
//!     .column(GridColumn::new("country").with_title("Country").filterable())
//!     .build();
//!
//! grid.selector().select_all().await?;
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod grid;

pub use trellis_core::{ConnectionGuard, ConnectionId, Signal};
