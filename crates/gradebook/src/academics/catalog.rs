use super::domain::SubjectRecord;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Default subject and weight for a school year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectTemplate {
    pub name: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearLevel {
    pub id: String,
    pub label: String,
    pub subjects: Vec<SubjectTemplate>,
}

impl YearLevel {
    /// Fresh, ungraded records with new ids. Each call yields an independent
    /// copy so the two terms never share records.
    pub fn instantiate(&self) -> Vec<SubjectRecord> {
        self.subjects
            .iter()
            .map(|template| SubjectRecord::new(template.name.clone(), template.coefficient))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationLevel {
    pub id: String,
    pub label: String,
    pub years: Vec<YearLevel>,
}

/// Read-only reference data consumed when a year is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub levels: Vec<EducationLevel>,
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            levels: standard_levels(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        if catalog.levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    pub fn level(&self, level_id: &str) -> Option<&EducationLevel> {
        self.levels.iter().find(|level| level.id == level_id)
    }

    pub fn year(&self, level_id: &str, year_id: &str) -> Option<&YearLevel> {
        self.level(level_id)
            .and_then(|level| level.years.iter().find(|year| year.id == year_id))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog defines no education levels")]
    Empty,
}

fn subjects(entries: &[(&str, f64)]) -> Vec<SubjectTemplate> {
    entries
        .iter()
        .map(|(name, coefficient)| SubjectTemplate {
            name: (*name).to_string(),
            coefficient: *coefficient,
        })
        .collect()
}

fn year(id: &str, label: &str, entries: &[(&str, f64)]) -> YearLevel {
    YearLevel {
        id: id.to_string(),
        label: label.to_string(),
        subjects: subjects(entries),
    }
}

const PRIMARY_LOWER: &[(&str, f64)] = &[
    ("Arabic", 1.0),
    ("French", 1.0),
    ("Mathematics", 1.0),
    ("Islamic Education", 1.0),
    ("Science Activities", 1.0),
    ("Art Education", 1.0),
    ("Physical Education", 1.0),
];

const PRIMARY_UPPER: &[(&str, f64)] = &[
    ("Arabic", 1.0),
    ("French", 1.0),
    ("Mathematics", 1.0),
    ("Islamic Education", 1.0),
    ("Science Activities", 1.0),
    ("Social Studies", 1.0),
    ("Art Education", 1.0),
    ("Physical Education", 1.0),
];

const MIDDLE_SCHOOL: &[(&str, f64)] = &[
    ("Arabic", 3.0),
    ("French", 3.0),
    ("Mathematics", 3.0),
    ("Physics & Chemistry", 1.0),
    ("Life & Earth Sciences", 1.0),
    ("Islamic Education", 2.0),
    ("History & Geography", 2.0),
    ("English", 1.0),
    ("Computer Science", 1.0),
    ("Physical Education", 1.0),
];

fn standard_levels() -> Vec<EducationLevel> {
    vec![
        EducationLevel {
            id: "primary".to_string(),
            label: "Primary School".to_string(),
            years: vec![
                year("p1", "1st Year Primary", PRIMARY_LOWER),
                year("p2", "2nd Year Primary", PRIMARY_LOWER),
                year("p3", "3rd Year Primary", PRIMARY_LOWER),
                year("p4", "4th Year Primary", PRIMARY_UPPER),
                year("p5", "5th Year Primary", PRIMARY_UPPER),
                year("p6", "6th Year Primary", PRIMARY_UPPER),
            ],
        },
        EducationLevel {
            id: "middle".to_string(),
            label: "Middle School".to_string(),
            years: vec![
                year("1ac", "1st Year Middle School", MIDDLE_SCHOOL),
                year("2ac", "2nd Year Middle School", MIDDLE_SCHOOL),
                year("3ac", "3rd Year Middle School", MIDDLE_SCHOOL),
            ],
        },
        EducationLevel {
            id: "high".to_string(),
            label: "High School".to_string(),
            years: vec![
                year(
                    "tc_sciences",
                    "Common Core Sciences",
                    &[
                        ("Mathematics", 4.0),
                        ("Physics & Chemistry", 4.0),
                        ("Life & Earth Sciences", 4.0),
                        ("French", 4.0),
                        ("Arabic", 2.0),
                        ("English", 2.0),
                        ("Islamic Education", 2.0),
                        ("History & Geography", 2.0),
                        ("Philosophy", 2.0),
                        ("Computer Science", 1.0),
                        ("Physical Education", 1.0),
                    ],
                ),
                year(
                    "1bac_sciences",
                    "1st Year Baccalaureate Experimental Sciences",
                    &[
                        ("Mathematics", 4.0),
                        ("Physics & Chemistry", 5.0),
                        ("Life & Earth Sciences", 5.0),
                        ("French", 4.0),
                        ("Arabic", 2.0),
                        ("English", 2.0),
                        ("Islamic Education", 2.0),
                        ("History & Geography", 2.0),
                        ("Philosophy", 2.0),
                        ("Physical Education", 1.0),
                    ],
                ),
                year(
                    "2bac_pc",
                    "2nd Year Baccalaureate Physical Sciences",
                    &[
                        ("Mathematics", 7.0),
                        ("Physics & Chemistry", 7.0),
                        ("Life & Earth Sciences", 5.0),
                        ("French", 4.0),
                        ("English", 2.0),
                        ("Philosophy", 2.0),
                        ("Islamic Education", 2.0),
                        ("Physical Education", 1.0),
                    ],
                ),
                year(
                    "2bac_svt",
                    "2nd Year Baccalaureate Life & Earth Sciences",
                    &[
                        ("Mathematics", 7.0),
                        ("Physics & Chemistry", 5.0),
                        ("Life & Earth Sciences", 7.0),
                        ("French", 4.0),
                        ("English", 2.0),
                        ("Philosophy", 2.0),
                        ("Islamic Education", 2.0),
                        ("Physical Education", 1.0),
                    ],
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_resolves_years() {
        let catalog = Catalog::standard();
        let year = catalog.year("middle", "3ac").expect("3ac present");
        assert!(year.subjects.iter().any(|s| s.name == "Mathematics"));
        assert!(catalog.year("middle", "2bac_pc").is_none());
        assert!(catalog.level("university").is_none());
    }

    #[test]
    fn instantiate_yields_independent_ungraded_copies() {
        let catalog = Catalog::standard();
        let year = catalog.year("high", "2bac_pc").expect("year present");
        let first = year.instantiate();
        let second = year.instantiate();

        assert_eq!(first.len(), year.subjects.len());
        assert!(first.iter().all(|subject| subject.grade.is_none()));
        assert!(first
            .iter()
            .zip(second.iter())
            .all(|(a, b)| a.id != b.id && a.name == b.name));
    }

    #[test]
    fn from_reader_rejects_empty_catalog() {
        let result = Catalog::from_reader(r#"{"levels": []}"#.as_bytes());
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn from_reader_round_trips_standard_catalog() {
        let json = serde_json::to_vec(&Catalog::standard()).expect("serializes");
        let parsed = Catalog::from_reader(json.as_slice()).expect("parses");
        assert_eq!(parsed, Catalog::standard());
    }
}
