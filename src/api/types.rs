use std::sync::Arc;

use crate::pipeline::processor::AgendaProcessor;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub processor: Arc<AgendaProcessor>,
}

impl ApiContext {
    pub fn new(processor: AgendaProcessor) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }
}
