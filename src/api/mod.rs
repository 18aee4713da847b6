mod graphs;
mod options;
mod types;

pub use graphs::{ApiRequest, Column, GraphApi, GraphKind};
pub use options::{Field, FieldSet, FieldType, Method, Options};
pub use types::{GraphDetail, GraphSummary, Paginated};
