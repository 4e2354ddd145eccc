//! Command-line configuration.
//!
//! All settings are read once at startup and never change afterwards.

use std::time::Duration;

use clap::Parser;
use thumbnail_core::PipelineConfig;

/// Default cap on the request body size.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Parser, Debug, Clone)]
#[command(name = "thumbnail-server")]
#[command(about = "HTTP service that turns uploaded images and WebM clips into thumbnails")]
pub struct Args {
    /// HTTP service address (e.g., ':5000')
    #[arg(long, default_value = ":5000")]
    pub http: String,

    /// ffmpeg binary used to extract frames from WebM uploads
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// Seconds to wait for ffmpeg before killing it
    #[arg(long, default_value_t = 30)]
    pub ffmpeg_timeout: u64,

    /// Largest accepted request body, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

/// Resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address passed to the TCP listener.
    pub listen_addr: String,
    pub pipeline: PipelineConfig,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: listen_address(":5000"),
            pipeline: PipelineConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            listen_addr: listen_address(&args.http),
            pipeline: PipelineConfig {
                ffmpeg_path: args.ffmpeg,
                ffmpeg_timeout: Duration::from_secs(args.ffmpeg_timeout),
            },
            max_upload_bytes: args.max_upload_bytes,
        }
    }
}

/// Expand a `:port` address into one that binds every interface.
pub fn listen_address(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}
