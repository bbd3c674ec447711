pub mod audit;
pub mod decode;
pub mod encode;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod materialize;
pub mod store;
pub mod vocab;

pub use audit::AuditFinding;
pub use errors::{StoreErrKind, StoreError};
pub use graph::{GraphDocument, Literal, Term, Triple};
pub use store::{Catalog, CatalogOrigin, ItemStore, StoreConfig, StoreResult};
