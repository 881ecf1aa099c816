#![cfg(test)]
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod relay_server;
pub mod stub_registry;

pub use relay_server::TestRelayServer;
pub use stub_registry::{CapturedRequest, StubRegistry};
