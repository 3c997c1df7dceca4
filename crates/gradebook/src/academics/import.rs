use super::domain::{parse_coefficient, parse_grade, SubjectRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum GradesheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Empty,
}

impl std::fmt::Display for GradesheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradesheetImportError::Io(err) => write!(f, "failed to read gradesheet: {}", err),
            GradesheetImportError::Csv(err) => write!(f, "invalid gradesheet CSV data: {}", err),
            GradesheetImportError::Empty => write!(f, "gradesheet contains no subjects"),
        }
    }
}

impl std::error::Error for GradesheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GradesheetImportError::Io(err) => Some(err),
            GradesheetImportError::Csv(err) => Some(err),
            GradesheetImportError::Empty => None,
        }
    }
}

impl From<std::io::Error> for GradesheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for GradesheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads a `Subject,Coefficient,Grade` sheet into subject records.
///
/// Cells pass through the same clamp policy as interactive edits, so a sheet
/// never produces a record that violates the grade or coefficient bounds.
pub struct GradesheetImporter;

impl GradesheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SubjectRecord>, GradesheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SubjectRecord>, GradesheetImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut subjects = Vec::new();
        for row in csv_reader.deserialize::<GradesheetRow>() {
            subjects.push(row?.into_record());
        }

        if subjects.is_empty() {
            return Err(GradesheetImportError::Empty);
        }

        Ok(subjects)
    }
}

#[derive(Debug, Deserialize)]
struct GradesheetRow {
    #[serde(rename = "Subject")]
    name: String,
    #[serde(rename = "Coefficient", default)]
    coefficient: String,
    #[serde(rename = "Grade", default, deserialize_with = "empty_string_as_none")]
    grade: Option<String>,
}

impl GradesheetRow {
    fn into_record(self) -> SubjectRecord {
        let mut record = SubjectRecord::new(self.name, parse_coefficient(&self.coefficient));
        record.grade = self.grade.as_deref().and_then(parse_grade);
        record
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
