//! Output module
//!
//! Staging of NDJSON export files and their upload to object storage
//! (S3 or a local directory).

mod cloud;
mod ndjson;

pub use cloud::ObjectDestination;
pub use ndjson::{write_ndjson, ScratchFile};
