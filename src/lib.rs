//! Blocking client for ComfyUI queue-execution servers.
//!
//! Handles server address resolution, client identity, workflow
//! submission over `POST /prompt`, history polling, and best-effort
//! interruption for hosts that offload image-processing work to a
//! ComfyUI instance. Workflow documents are opaque JSON; polling
//! cadence and give-up policy stay with the caller.
//!
//! ```no_run
//! use std::thread;
//! use std::time::Duration;
//!
//! use comfyui_client::Client;
//!
//! fn main() -> comfyui_client::Result<()> {
//!     // Port defaults to 8188 when the address has no colon.
//!     let client = Client::new("localhost")?;
//!     if !client.test_connection() {
//!         eprintln!("no ComfyUI server at {}", client.server_address());
//!         return Ok(());
//!     }
//!
//!     let workflow = serde_json::json!({
//!         "3": {"class_type": "KSampler", "inputs": {"seed": 42}},
//!     });
//!     let job = client.submit_workflow(workflow)?;
//!
//!     loop {
//!         let record = client.get_history(&job.job_id)?;
//!         if !record.is_empty() {
//!             println!("outputs: {}", record.outputs);
//!             break;
//!         }
//!         thread::sleep(Duration::from_millis(500));
//!     }
//!     Ok(())
//! }
//! ```

pub mod address;
pub mod client;
pub mod config;
pub mod error;
pub mod workflow;

mod api;
mod identity;
mod transport;

pub use address::ServerAddress;
pub use api::HistoryRecord;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use workflow::{ExecutionState, JobSubmission, Workflow, WorkflowBuilder};
