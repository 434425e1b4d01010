//! Custom request extractors.

mod params;
mod upload;
mod validated_json;

pub use params::{PathParam, QueryParam};
pub use upload::UploadForm;
pub use validated_json::{format_validation_errors, ValidatedJson};
