use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/roost.db, via ROOST__DATABASE__URL
    #[serde(default)]
    pub max_connections: Option<u32>,
}

// --- Upload Config ---
// Where uploaded listing images land and the URL prefix they are served under.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_public_path")]
    pub public_path: String,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_public_path() -> String {
    "/media".to_string()
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_path: default_public_path(),
            max_bytes: default_max_bytes(),
        }
    }
}

// --- Listings Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ListingsConfig {
    /// Placeholder image stored when a listing is created without one.
    #[serde(default = "default_image_url")]
    pub default_image_url: String,
    #[serde(default = "default_image_filename")]
    pub default_image_filename: String,
    /// Transformation inserted after `transform_segment` for edit-form thumbnails.
    #[serde(default = "default_thumbnail_transform")]
    pub thumbnail_transform: String,
    #[serde(default = "default_transform_segment")]
    pub transform_segment: String,
}

fn default_image_url() -> String {
    "https://images.unsplash.com/photo-1625505826533-5c80aca7d157?auto=format&fit=crop&w=800&q=60"
        .to_string()
}

fn default_image_filename() -> String {
    "listingimage".to_string()
}

fn default_thumbnail_transform() -> String {
    "h_300,w_250".to_string()
}

fn default_transform_segment() -> String {
    "/upload/".to_string()
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            default_image_url: default_image_url(),
            default_image_filename: default_image_filename(),
            thumbnail_transform: default_thumbnail_transform(),
            transform_segment: default_transform_segment(),
        }
    }
}

// --- Auth Config ---
// Authentication itself happens upstream; we only read who the user is.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_user_header")]
    pub user_header: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_user_header() -> String {
    "x-user-id".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            login_path: default_login_path(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Optional sections ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    // --- Sections with defaults ---
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub listings: ListingsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
