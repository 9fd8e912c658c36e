//! System-wide constants for the CrossMatch settlement core.

/// Domain separator prefixed to the canonical order signing payload.
pub const ORDER_DOMAIN_PREFIX: &[u8] = b"crossmatch:order:v1:";

/// Length of an ed25519 signature blob in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Default asset in which maker/taker fees are denominated.
pub const DEFAULT_FEE_ASSET: &str = "FEE";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "CrossMatch";
