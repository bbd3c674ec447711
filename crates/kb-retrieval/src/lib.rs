//! Looks up foods whose nutrient panel falls inside a tolerance window
//! around a reference profile, using a remote SPARQL knowledge base.
//!
//! Query text is produced by [`query`] and shipped through a
//! [`SparqlTransport`]; the client samples, labels, classifies and exports
//! the rows it gets back.

pub mod client;
pub mod config;
pub mod errors;
pub mod query;
pub mod results;
pub mod transport;

pub use client::{FetchOptions, KnowledgeBaseClient, SimilarFoods};
pub use config::KnowledgeBaseConfig;
pub use errors::RetrievalError;
pub use query::{build_filters, LabelQuery, RangeFilter, SimilarityQuery};
pub use results::{BindingValue, SparqlResults};
pub use transport::{ReqwestTransport, SparqlTransport};
