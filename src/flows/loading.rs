//! Loading indicator timing

use crate::ui::Presenter;
use std::time::Duration;

/// How long the loading indicator lingers once a request settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingPolicy {
    pub min_display: Duration,
}

impl Default for LoadingPolicy {
    fn default() -> Self {
        Self {
            min_display: Duration::from_millis(200),
        }
    }
}

impl LoadingPolicy {
    pub fn new(min_display: Duration) -> Self {
        Self { min_display }
    }

    /// No delay; the indicator is hidden as soon as the request settles
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Hide the indicator after the display delay
    pub async fn settle(&self, presenter: &dyn Presenter) {
        if !self.min_display.is_zero() {
            tokio::time::sleep(self.min_display).await;
        }
        presenter.hide_loading();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::test_support::{RecordingView, ViewEvent};

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_before_hiding() {
        let view = RecordingView::new();
        let policy = LoadingPolicy::default();

        let started = tokio::time::Instant::now();
        policy.settle(&view).await;

        assert!(started.elapsed() >= Duration::from_millis(200));
        assert_eq!(view.events(), vec![ViewEvent::HideLoading]);
    }

    #[tokio::test]
    async fn test_immediate_policy() {
        let view = RecordingView::new();
        LoadingPolicy::immediate().settle(&view).await;
        assert_eq!(view.events(), vec![ViewEvent::HideLoading]);
    }
}
