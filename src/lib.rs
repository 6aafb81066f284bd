pub mod api;
pub mod association;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod pages;
pub mod paging;
pub mod paths;
pub mod server;
pub mod snapshot;

mod serde_utils;
#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::client::ChessStore;
    pub use crate::config::Config;
    pub use crate::server::{build_router, AppState};
    pub use crate::snapshot::Snapshots;
}
