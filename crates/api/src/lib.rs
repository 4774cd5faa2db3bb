//! tempo-api – REST-Schnittstelle
//!
//! Alle Routen liegen unter `/api`. Ausser Registrierung und Login laeuft
//! jede Route durch das Auth-Gate ([`middleware::auth_gate`]), Routen auf
//! einzelne Ressourcen zusaetzlich durch den Ownership-Guard.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use middleware::Principal;
pub use routes::router;
pub use server::{app, ApiServer, ApiServerKonfig};
pub use state::ApiState;
