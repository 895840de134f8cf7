use shared::{domain::ModelId, protocol::RecommendRequest};

pub const TOP_K_MIN: u8 = 1;
pub const TOP_K_MAX: u8 = 10;
pub const DEFAULT_TOP_K: u8 = 2;
pub const THRESHOLD_MIN: f64 = 0.0;
pub const THRESHOLD_MAX: f64 = 1.0;
pub const THRESHOLD_STEP: f64 = 0.1;
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// The user's current selections and tuning parameters.
///
/// Mutators overwrite unconditionally, except that `top_k` and `threshold`
/// are kept inside the ranges their input widgets allow.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    model: ModelId,
    label: String,
    top_k: u8,
    threshold: f64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            label: String::new(),
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl RequestConfig {
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn top_k(&self) -> u8 {
        self.top_k
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = ModelId::new(model);
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_top_k(&mut self, top_k: i64) {
        self.top_k = top_k.clamp(i64::from(TOP_K_MIN), i64::from(TOP_K_MAX)) as u8;
    }

    /// Clamps into `[0, 1]` and snaps to the slider's 0.1 grid. NaN is ignored.
    pub fn set_threshold(&mut self, threshold: f64) {
        if threshold.is_nan() {
            return;
        }
        let clamped = threshold.clamp(THRESHOLD_MIN, THRESHOLD_MAX);
        self.threshold = (clamped / THRESHOLD_STEP).round() / (1.0 / THRESHOLD_STEP);
    }

    pub fn is_submittable(&self) -> bool {
        !self.model.is_empty() && !self.label.is_empty()
    }

    /// Wire payload for the current selections, if they are complete.
    pub fn to_request(&self) -> Option<RecommendRequest> {
        self.is_submittable().then(|| RecommendRequest {
            model: self.model.clone(),
            label: self.label.clone(),
            top_k: self.top_k,
            threshold: self.threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unselected_with_two_results_at_half_threshold() {
        let config = RequestConfig::default();
        assert_eq!(config.model().as_str(), "");
        assert_eq!(config.label(), "");
        assert_eq!(config.top_k(), 2);
        assert_eq!(config.threshold(), 0.5);
        assert!(!config.is_submittable());
    }

    #[test]
    fn top_k_stays_within_one_to_ten() {
        let mut config = RequestConfig::default();
        config.set_top_k(0);
        assert_eq!(config.top_k(), 1);
        config.set_top_k(-7);
        assert_eq!(config.top_k(), 1);
        config.set_top_k(11);
        assert_eq!(config.top_k(), 10);
        config.set_top_k(7);
        assert_eq!(config.top_k(), 7);
    }

    #[test]
    fn threshold_stays_within_unit_interval_on_tenth_steps() {
        let mut config = RequestConfig::default();
        config.set_threshold(-0.2);
        assert_eq!(config.threshold(), 0.0);
        config.set_threshold(1.7);
        assert_eq!(config.threshold(), 1.0);
        config.set_threshold(0.3);
        assert_eq!(config.threshold(), 0.3);
        config.set_threshold(0.74);
        assert_eq!(config.threshold(), 0.7);
        config.set_threshold(f64::NAN);
        assert_eq!(config.threshold(), 0.7);
    }

    #[test]
    fn submittable_needs_both_model_and_label() {
        let mut config = RequestConfig::default();
        config.set_model("model1");
        assert!(!config.is_submittable());
        assert!(config.to_request().is_none());

        config.set_label("Label1");
        assert!(config.is_submittable());

        config.set_model("");
        assert!(!config.is_submittable());
    }

    #[test]
    fn request_carries_all_four_fields() {
        let mut config = RequestConfig::default();
        config.set_model("model2");
        config.set_label("Label2");
        config.set_top_k(5);
        config.set_threshold(0.8);

        let request = config.to_request().expect("complete selection");
        assert_eq!(request.model.as_str(), "model2");
        assert_eq!(request.label, "Label2");
        assert_eq!(request.top_k, 5);
        assert_eq!(request.threshold, 0.8);
    }
}
