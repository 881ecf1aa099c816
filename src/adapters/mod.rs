pub mod hyper_server;
pub mod reqwest_client;

pub use hyper_server::{serve, HyperRelayAdapter};
pub use reqwest_client::{ClientConfig, ReqwestRegistryClient};
