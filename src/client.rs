//! Client facade for a single ComfyUI server.
//!
//! Owns the resolved server address, the generated client identity, and
//! the host-facing directory configuration; all protocol work is
//! delegated to the endpoint layer. One `Client` is meant to live as
//! long as the host effect instance that created it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::address::ServerAddress;
use crate::api::{self, HistoryRecord};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::identity;
use crate::transport;
use crate::workflow::{JobSubmission, Workflow, WorkflowBuilder};

/// Total request timeout for the connection probe.
const CONNECT_TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking client for one ComfyUI server.
///
/// Every operation opens its own scoped connection, so a `Client` holds
/// no sockets between calls and survives server restarts untouched.
/// Distinct instances share nothing, not even their identity.
#[derive(Debug)]
pub struct Client {
    address: ServerAddress,
    client_id: String,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl Client {
    /// Create a client for the server at `server_address`
    /// (`host[:port]`, port defaulting to 8188).
    ///
    /// Generates the client identity for the lifetime of this instance.
    /// Fails only on an unparseable address; the server is not contacted.
    pub fn new(server_address: &str) -> Result<Self> {
        let address = ServerAddress::parse(server_address)?;
        let client_id = identity::generate_client_id();
        tracing::debug!(address = %address, client_id = %client_id, "ComfyUI client created");

        Ok(Self {
            address,
            client_id,
            input_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
        })
    }

    /// Create a client from a [`ClientConfig`], applying its directories.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut client = Self::new(&config.server_address)?;
        if let Some(dir) = &config.input_dir {
            client.input_dir = dir.clone();
        }
        if let Some(dir) = &config.output_dir {
            client.output_dir = dir.clone();
        }
        Ok(client)
    }

    /// Probe whether a server is listening at the configured address.
    ///
    /// `true` for HTTP 200 and also for 404: ComfyUI configurations
    /// without a root page still answer 404, which proves the server is
    /// there. Any other status or a transport failure is `false`.
    pub fn test_connection(&self) -> bool {
        match transport::get(&self.address, "/", CONNECT_TEST_TIMEOUT) {
            Ok(response) => {
                let reachable = matches!(response.status, 200 | 404);
                tracing::debug!(
                    address = %self.address,
                    status = response.status,
                    reachable,
                    "Connection test"
                );
                reachable
            }
            Err(error) => {
                tracing::debug!(address = %self.address, error = %error, "Connection test failed");
                false
            }
        }
    }

    /// Submit a workflow for execution and return the queued job.
    ///
    /// Never retried: resubmitting after an ambiguous failure would
    /// queue the job twice. The returned [`JobSubmission`] carries the
    /// server-assigned id for later history lookups.
    pub fn submit_workflow(&self, workflow: Workflow) -> Result<JobSubmission> {
        let job_id = api::submit_workflow(&self.address, &workflow, &self.client_id)?;
        tracing::info!(job_id = %job_id, address = %self.address, "Workflow submitted");

        Ok(JobSubmission {
            job_id,
            workflow,
            client_id: self.client_id.clone(),
        })
    }

    /// Build a workflow via the given builder and submit it.
    pub fn submit(&self, builder: &dyn WorkflowBuilder) -> Result<JobSubmission> {
        self.submit_workflow(builder.build_workflow())
    }

    /// Fetch the history record for a previously submitted job.
    ///
    /// An empty record ([`HistoryRecord::is_empty`]) means the server
    /// has nothing for the id yet; keep polling. See [`HistoryRecord`]
    /// for why empty must not be treated as terminal.
    pub fn get_history(&self, job_id: &str) -> Result<HistoryRecord> {
        api::get_history(&self.address, job_id)
    }

    /// Ask the server to interrupt whatever it is currently executing.
    ///
    /// Best effort: `true` iff the server acknowledged with HTTP 200.
    /// Failures are logged, never raised.
    pub fn interrupt_execution(&self) -> bool {
        api::interrupt(&self.address, &self.client_id)
    }

    /// Model files of the given type available on the server.
    ///
    /// Discovery against the server's node catalog is not wired up;
    /// the list is always empty.
    pub fn find_models(&self, _model_type: &str) -> Vec<String> {
        Vec::new()
    }

    // ---- configuration ----

    /// Point the client at a different server.
    ///
    /// The new address is parsed first; when parsing fails the previous
    /// address stays in effect.
    pub fn set_server_address(&mut self, raw: &str) -> Result<()> {
        self.address = ServerAddress::parse(raw)?;
        Ok(())
    }

    /// The server address currently in effect.
    pub fn server_address(&self) -> &ServerAddress {
        &self.address
    }

    /// Identity submitted workflows are tagged with.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Directory the host stages input images in. Stored verbatim.
    pub fn set_input_directory(&mut self, dir: impl Into<PathBuf>) {
        self.input_dir = dir.into();
    }

    /// Directory the host stages input images in.
    pub fn input_directory(&self) -> &Path {
        &self.input_dir
    }

    /// Directory the host collects results from. Stored verbatim.
    pub fn set_output_directory(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    /// Directory the host collects results from.
    pub fn output_directory(&self) -> &Path {
        &self.output_dir
    }
}
