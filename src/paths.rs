pub const REST_PATH: &str = "rest/v1/";

pub const NEWS_TABLE: &str = "news";
pub const PLAYERS_TABLE: &str = "players";

pub const RATINGS_FILE: &str = "live-ratings.json";
pub const PLAYER_PROFILES_DIR: &str = "players";
