use std::sync::{Arc, Mutex, MutexGuard};

use mmt_core::{Clock, MethodRegistry, PracticeConfig, SkillRegistry, SystemClock};
use mmt_store::InMemoryProgressStore;

use crate::{ApiConfig, config::Environment, error::ApiError};

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<Mutex<InMemoryProgressStore>>,
    pub skills: Arc<SkillRegistry>,
    pub methods: Arc<MethodRegistry>,
    pub clock: Arc<dyn Clock>,
    pub practice: PracticeConfig,
    pub environment: Environment,
}

impl ApiState {
    /// State with an empty progress store, the built-in skills and methods and the
    /// system clock
    pub fn new(config: &ApiConfig) -> Self {
        let skills = SkillRegistry::with_default_skills();
        let methods = MethodRegistry::with_default_methods();

        tracing::info!(
            skills = skills.skills().len(),
            methods = methods.ids().count(),
            spaced_repetition = config.practice.spaced_repetition,
            "Practice state initialized"
        );

        Self {
            store: Arc::new(Mutex::new(InMemoryProgressStore::default())),
            skills: Arc::new(skills),
            methods: Arc::new(methods),
            clock: Arc::new(SystemClock),
            practice: config.practice.clone(),
            environment: config.env,
        }
    }

    pub fn lock_store(&self) -> Result<MutexGuard<'_, InMemoryProgressStore>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("Progress store lock poisoned".to_string()))
    }
}
