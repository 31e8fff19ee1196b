use std::sync::Arc;
use livadai_booking::EligibilityEvaluator;
use livadai_core::Clock;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub evaluator: EligibilityEvaluator,
    pub auth: AuthConfig,
}
