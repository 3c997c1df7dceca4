use gradebook::academics::domain::{MAX_TARGET_AVERAGE, MIN_TARGET_AVERAGE};
use gradebook::academics::Catalog;
use gradebook::config::StorageConfig;
use gradebook::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Custom catalog when configured, otherwise the built-in one.
pub(crate) fn load_catalog(storage: &StorageConfig) -> Result<Catalog, AppError> {
    match &storage.catalog_path {
        Some(path) => {
            let catalog = Catalog::from_path(path)?;
            info!(path = %path.display(), levels = catalog.levels.len(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(Catalog::standard()),
    }
}

pub(crate) fn parse_target(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    if (MIN_TARGET_AVERAGE..=MAX_TARGET_AVERAGE).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "target average {value} must be between {MIN_TARGET_AVERAGE} and {MAX_TARGET_AVERAGE}"
        ))
    }
}

pub(crate) fn parse_term(raw: &str) -> Result<gradebook::academics::Term, String> {
    gradebook::academics::Term::parse(raw)
        .ok_or_else(|| format!("unknown term '{raw}', expected 'first' or 'second'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook::academics::Term;
    use std::path::PathBuf;

    #[test]
    fn target_must_be_selectable() {
        assert_eq!(parse_target("15"), Ok(15.0));
        assert!(parse_target("9").is_err());
        assert_eq!(parse_target("10"), Ok(MIN_TARGET_AVERAGE));
        assert_eq!(parse_target("20"), Ok(MAX_TARGET_AVERAGE));
        assert!(parse_target("20.5").is_err());
        assert!(parse_target("twelve").is_err());
    }

    #[test]
    fn term_accepts_short_names() {
        assert_eq!(parse_term("s2"), Ok(Term::Second));
        assert!(parse_term("summer").is_err());
    }

    #[test]
    fn missing_custom_catalog_is_an_error() {
        let storage = StorageConfig {
            snapshot_path: PathBuf::from("unused.json"),
            catalog_path: Some(PathBuf::from("/definitely/not/here/catalog.json")),
        };
        assert!(matches!(load_catalog(&storage), Err(AppError::Catalog(_))));
    }
}
