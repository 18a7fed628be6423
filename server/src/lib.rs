//! KhollPoll: mess ratings, campus events and news for a single campus,
//! served as a JSON API over one flat JSON data file.

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
