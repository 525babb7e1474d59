/// Filing layer: identifier resolution, XML loading, runners, standardizer.
pub mod document;
pub mod errors;
pub mod object_id;
pub mod resolve;
pub mod runner;
pub mod standardizer;

pub use document::KNOWN_SCHEDULES;
pub use errors::FilingError;
pub use object_id::validate_object_id;
pub use resolve::{ResolvedReference, resolve};
pub use runner::{Runner, XmlRunner};
pub use standardizer::{Standardizer, XpathStandardizer};
