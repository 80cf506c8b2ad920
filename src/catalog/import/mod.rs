mod mapping;
mod normalizer;
mod parser;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use super::domain::{Course, CourseId};
use parser::FeedRecord;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog feed: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog feed data: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a registrar feed and produces one course per subject+number.
    /// The feed republishes a row every time a course changes; the most
    /// recently effective row wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Course>, CatalogImportError> {
        let mut latest: BTreeMap<String, Course> = BTreeMap::new();

        for record in parser::parse_records(reader)? {
            let Some(course) = course_from_record(record) else {
                continue;
            };

            let key = course.subject_number();
            let newer = latest
                .get(&key)
                .map(|existing| existing.effective_from < course.effective_from)
                .unwrap_or(true);
            if newer {
                latest.insert(key, course);
            }
        }

        Ok(latest.into_values().collect())
    }
}

fn course_from_record(record: FeedRecord) -> Option<Course> {
    if record.subject.is_empty() || record.number.is_empty() {
        warn!("skipping catalog row without subject/number");
        return None;
    }

    let Some(credits) = record.credits else {
        warn!(
            subject = %record.subject,
            number = %record.number,
            "skipping catalog row with unparseable credit hours"
        );
        return None;
    };

    let mut attributes: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (attribute_type, code) in record.attributes {
        let codes = attributes.entry(attribute_type.to_string()).or_default();
        if !codes.iter().any(|existing| existing == code) {
            codes.push(code.to_string());
        }
    }

    let id = record
        .course_id
        .unwrap_or_else(|| format!("{} {}", record.subject, record.number));

    Some(Course {
        id: CourseId(id),
        subject: record.subject,
        number: record.number,
        title: record.title,
        credits,
        attributes,
        effective_from: record.effective_from,
    })
}
