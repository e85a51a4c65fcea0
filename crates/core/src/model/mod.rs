mod app_settings;
mod assignment;
mod ids;
mod roadmap;
mod stats;
mod suggestion;
mod user;
mod weekend;

pub use app_settings::{AppSettings, AppSettingsDraft, AppSettingsError};
pub use assignment::{
    Assignment, AssignmentPatch, DEFAULT_ASSIGNMENT_DESCRIPTION, DEFAULT_ASSIGNMENT_TITLE,
};
pub use ids::{AssignmentId, WEEKEND_COUNT, WeekendId, WeekendIdError};
pub use roadmap::{MutationOutcome, Roadmap, RoadmapError};
pub use stats::RoadmapStats;
pub use suggestion::{SuggestedTask, Suggestion, progress_summary};
pub use user::{UserIdentity, UserIdentityError};
pub use weekend::Weekend;
