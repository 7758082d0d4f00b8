//! Records market-model tracing events into column tables.
//!
//! Every `tracing::info!` event becomes one row in the table named after its
//! target; each field becomes a column. Columns appear the first time a field
//! is seen and are zero-padded so every column in a table has the same length.
//!
//! # Usage
//!
//! ```ignore
//! // In model code:
//! tracing::info!(target: "surplus", tax_rate, deadweight_loss, tax_revenue);
//!
//! // In a test:
//! let recorder = instrument::capture(|| {
//!     // ... sweep tax values ...
//! });
//! let revenue = recorder.f64_column("surplus", "tax_revenue");
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use polars::prelude::*;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::{Event, Id, Metadata, Subscriber};

/// One column of a recorded table.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedColumn {
    U64(Vec<u64>),
    I64(Vec<i64>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl TypedColumn {
    pub fn len(&self) -> usize {
        match self {
            TypedColumn::U64(v) => v.len(),
            TypedColumn::I64(v) => v.len(),
            TypedColumn::F64(v) => v.len(),
            TypedColumn::Bool(v) => v.len(),
            TypedColumn::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pad_to(&mut self, rows: usize) {
        let missing = rows.saturating_sub(self.len());
        match self {
            TypedColumn::U64(v) => v.extend(std::iter::repeat_n(0, missing)),
            TypedColumn::I64(v) => v.extend(std::iter::repeat_n(0, missing)),
            TypedColumn::F64(v) => v.extend(std::iter::repeat_n(0.0, missing)),
            TypedColumn::Bool(v) => v.extend(std::iter::repeat_n(false, missing)),
            TypedColumn::Str(v) => v.extend(std::iter::repeat_n(String::new(), missing)),
        }
    }

    fn to_polars(&self, name: &str) -> Column {
        match self {
            TypedColumn::U64(v) => Column::new(name.into(), v),
            TypedColumn::I64(v) => Column::new(name.into(), v),
            TypedColumn::F64(v) => Column::new(name.into(), v),
            TypedColumn::Bool(v) => Column::new(name.into(), v),
            TypedColumn::Str(v) => Column::new(name.into(), v),
        }
    }
}

/// Rows recorded under one tracing target.
#[derive(Debug, Clone, Default)]
pub struct DynamicTable {
    pub columns: HashMap<String, TypedColumn>,
    pub row_count: usize,
}

impl DynamicTable {
    fn pad_columns(&mut self) {
        let rows = self.row_count;
        for col in self.columns.values_mut() {
            col.pad_to(rows);
        }
    }

    /// Float column by field name. Missing or non-float columns give `None`.
    pub fn f64s(&self, field: &str) -> Option<&[f64]> {
        match self.columns.get(field)? {
            TypedColumn::F64(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut names: Vec<&String> = self.columns.keys().collect();
        names.sort();
        let columns = names
            .into_iter()
            .map(|name| self.columns[name].to_polars(name))
            .collect();
        DataFrame::new(columns)
    }
}

/// All tables, keyed by tracing target.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub tables: HashMap<String, DynamicTable>,
}

impl Recorder {
    pub fn table(&self, target: &str) -> Option<&DynamicTable> {
        self.tables.get(target)
    }

    /// Copy of a float column, empty if the target or field was never recorded.
    pub fn f64_column(&self, target: &str, field: &str) -> Vec<f64> {
        self.table(target)
            .and_then(|t| t.f64s(field))
            .map(<[f64]>::to_vec)
            .unwrap_or_default()
    }

    /// One DataFrame per target. Fails on the first table polars rejects.
    pub fn to_dataframes(&self) -> PolarsResult<HashMap<String, DataFrame>> {
        self.tables
            .iter()
            .map(|(name, table)| Ok((name.clone(), table.to_dataframe()?)))
            .collect()
    }
}

thread_local! {
    static RECORDER: RefCell<Recorder> = RefCell::default();
}

/// Appends one event's fields to the current row of a table.
struct RowVisitor<'a> {
    table: &'a mut DynamicTable,
}

impl RowVisitor<'_> {
    /// New columns start with `row_count` default values so they line up.
    fn push<T>(
        &mut self,
        field: &Field,
        value: T,
        empty: impl FnOnce(usize) -> TypedColumn,
        slot: impl FnOnce(&mut TypedColumn) -> Option<&mut Vec<T>>,
    ) {
        let rows = self.table.row_count;
        let col = self
            .table
            .columns
            .entry(field.name().to_string())
            .or_insert_with(|| empty(rows));
        if let Some(v) = slot(col) {
            v.push(value);
        }
    }
}

impl Visit for RowVisitor<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(
            field,
            value,
            |n| TypedColumn::F64(vec![0.0; n]),
            |c| match c {
                TypedColumn::F64(v) => Some(v),
                _ => None,
            },
        );
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(
            field,
            value,
            |n| TypedColumn::U64(vec![0; n]),
            |c| match c {
                TypedColumn::U64(v) => Some(v),
                _ => None,
            },
        );
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(
            field,
            value,
            |n| TypedColumn::I64(vec![0; n]),
            |c| match c {
                TypedColumn::I64(v) => Some(v),
                _ => None,
            },
        );
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(
            field,
            value,
            |n| TypedColumn::Bool(vec![false; n]),
            |c| match c {
                TypedColumn::Bool(v) => Some(v),
                _ => None,
            },
        );
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(
            field,
            value.to_string(),
            |n| TypedColumn::Str(vec![String::new(); n]),
            |c| match c {
                TypedColumn::Str(v) => Some(v),
                _ => None,
            },
        );
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{value:?}"));
    }
}

/// Subscriber that keeps info-level events and ignores spans.
pub struct DataFrameSubscriber;

impl Subscriber for DataFrameSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.is_event() && *metadata.level() <= tracing::Level::INFO
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let target = event.metadata().target().to_string();
        RECORDER.with(|r| {
            let mut recorder = r.borrow_mut();
            let table = recorder.tables.entry(target).or_default();
            event.record(&mut RowVisitor { table: &mut *table });
            table.row_count += 1;
            // Fields absent from this event still get a cell.
            table.pad_columns();
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Take everything recorded on this thread.
pub fn drain() -> Recorder {
    RECORDER.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

pub fn clear() {
    RECORDER.with(|r| *r.borrow_mut() = Recorder::default());
}

/// Run `f` with the subscriber active on this thread only and return what it
/// recorded. Anything recorded earlier on the thread is discarded first.
pub fn capture(f: impl FnOnce()) -> Recorder {
    clear();
    tracing::subscriber::with_default(DataFrameSubscriber, f);
    drain()
}
