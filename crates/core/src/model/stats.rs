use serde::Serialize;

use crate::model::ids::WEEKEND_COUNT;
use crate::model::weekend::Weekend;

/// Progress figures derived from a roadmap.
///
/// Never stored; computed from the weekends on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStats {
    timeline_percentage: u8,
    weekends_done: usize,
    total_tasks: usize,
    tasks_done: usize,
    time_minutes: u64,
}

impl RoadmapStats {
    #[must_use]
    pub fn from_weekends(weekends: &[Weekend]) -> Self {
        let weekends_done = weekends.iter().filter(|w| w.is_complete()).count();
        let total_tasks = weekends.iter().map(|w| w.assignments().len()).sum();
        let tasks_done = weekends.iter().map(Weekend::completed_count).sum();
        let time_minutes = weekends.iter().map(Weekend::time_spent).sum();

        Self {
            timeline_percentage: timeline_percentage(weekends_done),
            weekends_done,
            total_tasks,
            tasks_done,
            time_minutes,
        }
    }

    /// Share of the ten weekends that are fully done, rounded, in `0..=100`.
    #[must_use]
    pub fn timeline_percentage(&self) -> u8 {
        self.timeline_percentage
    }

    #[must_use]
    pub fn weekends_done(&self) -> usize {
        self.weekends_done
    }

    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.total_tasks
    }

    #[must_use]
    pub fn tasks_done(&self) -> usize {
        self.tasks_done
    }

    #[must_use]
    pub fn time_minutes(&self) -> u64 {
        self.time_minutes
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time_hours(&self) -> f64 {
        self.time_minutes as f64 / 60.0
    }

    /// Hours with one decimal place, e.g. `"2.5"`.
    #[must_use]
    pub fn time_hours_display(&self) -> String {
        format!("{:.1}", self.time_hours())
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn timeline_percentage(weekends_done: usize) -> u8 {
    let done = weekends_done.min(usize::from(WEEKEND_COUNT));
    let ratio = done as f64 / f64::from(WEEKEND_COUNT);
    (ratio * 100.0).round() as u8
}
