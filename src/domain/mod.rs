pub mod dispatcher;
pub mod errors;
pub mod models;
pub mod request;
pub mod service;

pub use dispatcher::RegistryDispatcher;
pub use errors::*;
pub use models::*;
pub use service::RelayService;
