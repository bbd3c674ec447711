//! Turns classified [`MenuItem`](menuseal_core_types::MenuItem) records into
//! a graph dataset that the item store can re-ingest.

pub mod artifact;
pub mod errors;
pub mod options;
pub mod seed;

pub use artifact::{materialize, seal_id_for_label, ExportArtifact};
pub use errors::ExportError;
pub use options::{ExportFormat, ExportOptions, PROVENANCE_COMPANY};
pub use seed::{read_catalog_csv, seed_from_csv, CatalogRow};
