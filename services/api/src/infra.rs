use archetype_assessment::assessment::{
    AssessmentId, AssessmentRecord, AssessmentRepository, RepositoryError, StaticCatalog,
};
use archetype_assessment::config::CatalogConfig;
use archetype_assessment::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Insertion-ordered store; `recent` walks it backwards.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

/// Directory-backed catalog when configured, otherwise the bundled banks.
pub(crate) fn open_catalog(config: &CatalogConfig) -> Result<StaticCatalog, AppError> {
    match &config.data_dir {
        Some(dir) => Ok(StaticCatalog::from_dir(dir.clone())?),
        None => Ok(StaticCatalog::bundled()),
    }
}
