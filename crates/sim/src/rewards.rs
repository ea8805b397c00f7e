//! Completed-episode reward bookkeeping.

/// Append-only list of finished-episode reward totals.
///
/// The scheduler clears it whenever a parameter changes: totals earned
/// under different parameters are not comparable, and mixing them would
/// quietly corrupt the displayed score.
#[derive(Clone, Debug, Default)]
pub struct RewardHistory {
    totals: Vec<f32>,
}

impl RewardHistory {
    pub fn push(&mut self, total: f32) {
        self.totals.push(total);
    }

    pub fn clear(&mut self) {
        self.totals.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.totals
    }

    /// Arithmetic mean of the recorded totals; `None` until an episode has
    /// finished, so the host can show a blank score instead of NaN.
    #[must_use]
    pub fn mean(&self) -> Option<f32> {
        if self.totals.is_empty() {
            return None;
        }
        Some(self.totals.iter().sum::<f32>() / self.totals.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(RewardHistory::default().mean(), None);
    }

    #[test]
    fn mean_averages_pushed_totals() {
        let mut history = RewardHistory::default();
        history.push(-100.0);
        history.push(-50.0);
        assert_eq!(history.mean(), Some(-75.0));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn clear_discards_everything() {
        let mut history = RewardHistory::default();
        history.push(-1.0);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.mean(), None);
    }
}
