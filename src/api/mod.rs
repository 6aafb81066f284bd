pub mod news;
pub mod players;
