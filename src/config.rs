use std::path::PathBuf;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The server
/// address is kept as the raw `host[:port]` string; parsing happens when
/// a [`Client`](crate::Client) is constructed from it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address as `host[:port]` (default: `127.0.0.1`).
    pub server_address: String,
    /// Directory the host stages input images in, if configured.
    pub input_dir: Option<PathBuf>,
    /// Directory the host collects results from, if configured.
    pub output_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default     |
    /// |----------------------|-------------|
    /// | `COMFYUI_SERVER`     | `127.0.0.1` |
    /// | `COMFYUI_INPUT_DIR`  | unset       |
    /// | `COMFYUI_OUTPUT_DIR` | unset       |
    pub fn from_env() -> Self {
        let server_address =
            std::env::var("COMFYUI_SERVER").unwrap_or_else(|_| "127.0.0.1".into());

        let input_dir = std::env::var("COMFYUI_INPUT_DIR").ok().map(PathBuf::from);
        let output_dir = std::env::var("COMFYUI_OUTPUT_DIR").ok().map(PathBuf::from);

        Self {
            server_address,
            input_dir,
            output_dir,
        }
    }
}
