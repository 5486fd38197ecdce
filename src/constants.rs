//! Defaults shared by configuration, the catalog builder and the server.

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_IMAGE_DIR: &str = "chains";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

/// Remote fetch mode does not sniff content; every payload is labelled PNG.
pub const REMOTE_MIME_TYPE: &str = "image/png";

/// Name prefix for entries produced from the locator list (`chain_1`, `chain_2`, ...).
pub const REMOTE_NAME_PREFIX: &str = "chain_";

/// File extensions picked up by a directory scan, compared lowercased.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub const DEFAULT_REMOTE_LINKS: &[&str] = &[
    "https://drive.google.com/uc?export=view&id=1RKvoPREyYrmgasOp_8gzxDxpuJYPNlcV",
    "https://drive.google.com/uc?export=view&id=11k0Rxu8gWa1dFbPd1oJEhKS2zR2uo3yz",
];

/// Origins allowed to call `/api/*`. A `*` stands for one or more host labels.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:8080",
    "https://*.lovable.app",
    "https://chain-fit-studio-23234.onrender.com",
    "https://gold-studio.onrender.com",
    "https://*.onrender.com",
];

// Environment variable names
pub const ENV_PORT: &str = "PORT";
pub const ENV_CONFIG: &str = "CATALOG_CONFIG";
pub const ENV_SOURCE: &str = "CATALOG_SOURCE";
pub const ENV_DIR: &str = "CATALOG_DIR";
pub const ENV_FETCH_TIMEOUT: &str = "FETCH_TIMEOUT_SECS";
