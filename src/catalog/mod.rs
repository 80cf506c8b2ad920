pub mod domain;
pub mod import;

pub use domain::{ClassId, Course, CourseId};
pub use import::{CatalogImportError, CatalogImporter};
