mod adapter;
mod server;

pub use adapter::{Body, HyperRelayAdapter};
pub use server::serve;
