use thiserror::Error;

use crate::model::{AppSettingsError, RoadmapError, UserIdentityError, WeekendIdError};

/// Any validation failure raised by the domain model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
    #[error(transparent)]
    WeekendId(#[from] WeekendIdError),
    #[error(transparent)]
    UserIdentity(#[from] UserIdentityError),
    #[error(transparent)]
    AppSettings(#[from] AppSettingsError),
}
