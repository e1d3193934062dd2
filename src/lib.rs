pub mod api;
pub mod config;
pub mod device;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod server;
pub mod tracker;

pub mod simulation;
