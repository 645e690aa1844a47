use crate::rotation::{RotationEngine, circular_distance};

/// Returns the first item whose slot angle lies within `tolerance` degrees of
/// `angle`. Continuous ticking rarely lands exactly on a slot, hence the
/// tolerance instead of an equality test.
pub fn detect_active_item(angle: f64, engine: &RotationEngine, tolerance: f64) -> Option<usize> {
    (0..engine.count()).find(|&i| circular_distance(angle, engine.angle_for_index(i)) < tolerance)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<usize>,
}

impl SelectionState {
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.current == Some(index)
    }

    pub(crate) fn set(&mut self, index: usize) {
        self.current = Some(index);
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
    }

    pub fn next_index(&self, count: usize) -> Option<usize> {
        (count > 0).then(|| self.current.map_or(0, |c| (c + 1) % count))
    }

    pub fn previous_index(&self, count: usize) -> Option<usize> {
        (count > 0).then(|| self.current.map_or(0, |c| (c + count - 1) % count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_item_at_its_own_angle() {
        let engine = RotationEngine::new(5, 270.12);
        for i in 0..5 {
            let angle = engine.angle_for_index(i);
            assert_eq!(detect_active_item(angle, &engine, 5.0), Some(i));
            assert_eq!(detect_active_item(angle + 4.9, &engine, 5.0), Some(i));
            assert_eq!(detect_active_item(angle - 360.0 * 3.0, &engine, 5.0), Some(i));
        }
    }

    #[test]
    fn test_no_match_between_slots() {
        let engine = RotationEngine::new(5, 270.12);
        let between = engine.angle_for_index(1) + 36.0;
        assert_eq!(detect_active_item(between, &engine, 5.0), None);
        assert_eq!(detect_active_item(engine.angle_for_index(2) + 5.5, &engine, 5.0), None);
    }

    #[test]
    fn test_detects_across_wraparound() {
        // item 4 of 5 sits at -17.88, i.e. 342.12 once normalized
        let engine = RotationEngine::new(5, 270.12);
        assert_eq!(detect_active_item(359.0, &engine, 20.0), Some(4));
        assert_eq!(detect_active_item(0.5, &engine, 20.0), Some(4));
    }

    #[test]
    fn test_empty_wheel_detects_nothing() {
        let engine = RotationEngine::new(0, 270.12);
        assert_eq!(detect_active_item(270.12, &engine, 5.0), None);
    }

    #[test]
    fn test_navigation_is_circular() {
        let mut selection = SelectionState::default();
        selection.set(4);
        assert_eq!(selection.next_index(5), Some(0));

        selection.set(0);
        assert_eq!(selection.previous_index(5), Some(4));
        assert_eq!(selection.next_index(5), Some(1));

        assert_eq!(selection.next_index(0), None);
    }
}
