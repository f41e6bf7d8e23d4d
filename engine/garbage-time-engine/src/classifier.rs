use crate::config::DEFAULT_WIN_PROBABILITY_CUTOFF;
use crate::models::{ClassifiedEvent, PlayEvent};

/// Symmetric win-probability leverage test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarbageTimeClassifier {
    cutoff: f64,
}

impl Default for GarbageTimeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_WIN_PROBABILITY_CUTOFF)
    }
}

impl GarbageTimeClassifier {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// `wp < cutoff || wp > 1 - cutoff`. Missing or non-finite `wp` is regular time.
    pub fn is_garbage_time(&self, win_probability: Option<f64>) -> bool {
        match win_probability {
            Some(wp) if wp.is_finite() => wp < self.cutoff || wp > 1.0 - self.cutoff,
            _ => false,
        }
    }

    pub fn classify(&self, event: PlayEvent) -> ClassifiedEvent {
        let garbage_time = self.is_garbage_time(event.win_probability);
        ClassifiedEvent { event, garbage_time }
    }

    pub fn classify_all(&self, events: Vec<PlayEvent>) -> Vec<ClassifiedEvent> {
        events.into_iter().map(|event| self.classify(event)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundaries_are_regular_time() {
        let classifier = GarbageTimeClassifier::default();
        assert!(!classifier.is_garbage_time(Some(0.05)));
        assert!(!classifier.is_garbage_time(Some(0.95)));
        assert!(!classifier.is_garbage_time(Some(0.5)));
    }

    #[test]
    fn test_either_tail_is_garbage_time() {
        let classifier = GarbageTimeClassifier::default();
        assert!(classifier.is_garbage_time(Some(0.02)));
        assert!(classifier.is_garbage_time(Some(0.0)));
        assert!(classifier.is_garbage_time(Some(0.97)));
        assert!(classifier.is_garbage_time(Some(1.0)));
    }

    #[test]
    fn test_missing_win_probability_is_regular_time() {
        let classifier = GarbageTimeClassifier::default();
        assert!(!classifier.is_garbage_time(None));
        assert!(!classifier.is_garbage_time(Some(f64::NAN)));
        assert!(!classifier.is_garbage_time(Some(f64::INFINITY)));
    }

    #[test]
    fn test_classify_keeps_event() {
        let classifier = GarbageTimeClassifier::default();
        let event = PlayEvent::reception("00-1", 10.0, false, 0.02);
        let classified = classifier.classify(event.clone());
        assert!(classified.garbage_time);
        assert_eq!(classified.event, event);
    }

    #[test]
    fn test_custom_cutoff() {
        let classifier = GarbageTimeClassifier::new(0.1);
        assert!(classifier.is_garbage_time(Some(0.08)));
        assert!(classifier.is_garbage_time(Some(0.92)));
        assert!(!classifier.is_garbage_time(Some(0.1)));
    }

    proptest! {
        #[test]
        fn prop_garbage_iff_outside_band(wp in 0.0f64..=1.0f64) {
            let classifier = GarbageTimeClassifier::default();
            let expected = wp < 0.05 || wp > 0.95;
            prop_assert_eq!(classifier.is_garbage_time(Some(wp)), expected);
        }

        #[test]
        fn prop_symmetric_around_half(k in 0u32..=1000u32) {
            let classifier = GarbageTimeClassifier::new(0.25);
            let wp = k as f64 / 1000.0;
            let mirrored = (1000 - k) as f64 / 1000.0;
            prop_assert_eq!(
                classifier.is_garbage_time(Some(wp)),
                classifier.is_garbage_time(Some(mirrored))
            );
        }
    }
}
