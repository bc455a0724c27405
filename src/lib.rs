//! linefig turns an editor-built figure configuration and a tabular dataset
//! into a multi-series time-series line chart specification.
//!
//! The pieces, leaf first:
//!
//! - summary statistics ([`mean`], [`standard_deviation`], [`percentile`])
//! - the persisted configuration ([`ConfigStore`]) and the defaults merger ([`merge`])
//! - the declarative editor field tree ([`generate`], [`FigureForm`])
//! - the trace assembler ([`FigureSpec`], [`assemble`]) producing a [`TraceSet`]
//! - preview plumbing ([`PreviewSession`], [`Readiness`], [`RenderAdapter`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod compile;
pub(crate) mod config;
pub(crate) mod dataset;
pub(crate) mod figure;
pub(crate) mod render;
pub(crate) mod schema;
pub(crate) mod stats;

pub use crate::foundation::color::Color;
pub use crate::foundation::error::{FigError, FigResult};

pub use crate::stats::summary::{Summary, mean, percentile, standard_deviation};

pub use crate::config::merge::{merge, parse_defaults};
pub use crate::config::store::{ConfigMap, ConfigStore};
pub use crate::config::value::ConfigValue;

pub use crate::schema::field::{
    Block, BlockKind, Condition, Field, FieldKind, FieldSchema, FieldTree, Node, SelectOption,
};
pub use crate::schema::form::FigureForm;
pub use crate::schema::generator::{
    SchemaInputs, generate, generate_from_store, saved_line_count, saved_marker_count,
};

pub use crate::dataset::fetch::{DatasetClient, FetchOpts};
pub use crate::dataset::table::{Cell, Column, Dataset};

pub use crate::figure::spec::{
    AxisSpec, EvaluationPeriod, EventMarker, FigureSpec, LineSpec, LineStyle, MarkerAt,
    MarkerSize, MarkerSymbol, SourcedOverlay, StatSource, XAxisFormat,
};

pub use crate::compile::assembler::{AssembleOpts, assemble};
pub use crate::compile::trace::{
    Axis, AxisTitle, DerivedKind, ErrorBars, Layout, Legend, Margin, PlotConfig, Shape, ShapeLine,
    Trace, TraceLine, TraceMarker, TraceRole, TraceSet,
};

pub use crate::render::adapter::{InMemoryAdapter, RenderAdapter};
pub use crate::render::readiness::{Awaited, ReadySignal, Readiness, readiness};
pub use crate::render::session::{
    DataSource, FigureJob, PreviewContext, PreviewOpts, PreviewSession,
};
