pub mod achievements;
mod news;
mod player;
mod profile;
mod ratings;

pub use achievements::{label_for, AchievementEntry, AchievementLine, Achievements, Year};
pub use news::{EventTagsRow, NewsItem, RowId};
pub use player::{Player, PlayerSummary};
pub use profile::{ImageCredit, PlayerProfile};
pub use ratings::{RatingEntry, RatingsSnapshot, TimeControl};
