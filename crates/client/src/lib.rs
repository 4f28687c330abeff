pub mod client;
pub mod poller;

pub use client::MetricsClient;
pub use poller::spawn_poller;
