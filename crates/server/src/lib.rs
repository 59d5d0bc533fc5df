//! Lobby account server: a WebSocket event gateway and HTTP routes in front
//! of the registration/login service.

pub mod errors;
pub mod extract;
pub mod gateway;
pub mod observability;
pub mod protocol;
pub mod routes;
pub mod startup;

pub use routes::ServerState;
pub use startup::run;
