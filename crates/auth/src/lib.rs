//! tempo-auth – Authentifizierung und Besitzpruefung
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id ([`PasswortHasher`])
//! - Signierte, ablaufende Session-Token ([`TokenCodec`])
//! - Registrierung und Login ([`AuthService`])
//! - Besitzpruefung pro Ressourcenart ([`OwnershipGuard`])
//!
//! Der Token ist zustandslos: es gibt keinen Session-Store und kein
//! Widerrufen vor Ablauf.

pub mod error;
pub mod ownership;
pub mod password;
pub mod service;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use ownership::OwnershipGuard;
pub use password::PasswortHasher;
pub use service::AuthService;
pub use token::{token_ttl, TokenCodec, TokenFehler, TOKEN_TTL_STUNDEN};
