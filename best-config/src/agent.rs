//! Execution-agent contract.
//!
//! A remote execution agent reads its connection details from the resolved
//! [`ProjectConfig`] and exposes two operations over a persistent channel:
//! resetting execution state and reporting it. Transport lives outside this
//! crate; this module defines the endpoint data and the broker seam.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::config::ProjectConfig;
use crate::error::{Error, Result};

/// Channel path used when the project does not set one.
pub const DEFAULT_AGENT_PATH: &str = "/best";

/// Where and how to reach an execution agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentEndpoint {
    /// Runner that will drive the agent.
    pub runner: String,
    /// Agent base URL.
    pub host: String,
    /// Channel path on the agent.
    pub path: String,
}

impl AgentEndpoint {
    /// Read the endpoint from a project's runner and environment options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `testEnvironmentOptions.host` is
    /// missing or `path` is not a string.
    pub fn from_project(project: &ProjectConfig) -> Result<Self> {
        let options = &project.test_environment_options;

        let host = options
            .get("host")
            .and_then(Value::as_str)
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::Validation {
                field: "testEnvironmentOptions.host".to_string(),
                message: "an agent host URL is required".to_string(),
            })?;

        let path = match options.get("path") {
            None | Some(Value::Null) => DEFAULT_AGENT_PATH,
            Some(Value::String(path)) => path.as_str(),
            Some(_) => {
                return Err(Error::Validation {
                    field: "testEnvironmentOptions.path".to_string(),
                    message: "expected a string".to_string(),
                })
            }
        };

        Ok(Self {
            runner: project.runner.clone(),
            host: host.trim_end_matches('/').to_string(),
            path: path.to_string(),
        })
    }

    /// Full channel URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use best_config::agent::AgentEndpoint;
    ///
    /// let endpoint = AgentEndpoint {
    ///     runner: "best-runner-remote".into(),
    ///     host: "http://localhost:5000".into(),
    ///     path: "/best".into(),
    /// };
    /// assert_eq!(endpoint.url(), "http://localhost:5000/best");
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.host, self.path)
    }
}

/// Snapshot of an agent's execution state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    /// Clients attached to the channel.
    pub connected_clients: usize,
    /// Benchmark jobs waiting to run.
    pub queued_jobs: usize,
    /// Job currently executing, if any.
    pub running_job: Option<String>,
}

/// Live connection state behind an agent.
pub trait Broker {
    /// Drop queued and running work.
    ///
    /// # Errors
    ///
    /// Returns an error if the broker cannot be reset.
    fn reset(&self) -> Result<()>;

    /// Report current execution state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be read.
    fn state(&self) -> Result<AgentState>;
}

/// An agent bound to one broker for the lifetime of a server.
///
/// Each server start builds its own service, so independent servers never
/// share broker state.
#[derive(Debug)]
pub struct AgentService<B> {
    endpoint: AgentEndpoint,
    broker: B,
}

impl<B: Broker> AgentService<B> {
    /// Bind `broker` to `endpoint`.
    pub fn start(endpoint: AgentEndpoint, broker: B) -> Self {
        log::info!("agent listening on {}", endpoint.url());
        Self { endpoint, broker }
    }

    /// The endpoint this service was started for.
    #[must_use]
    pub fn endpoint(&self) -> &AgentEndpoint {
        &self.endpoint
    }

    /// Reset execution state.
    ///
    /// # Errors
    ///
    /// Propagates the broker's error.
    pub fn reset(&self) -> Result<()> {
        log::debug!("resetting agent state");
        self.broker.reset()
    }

    /// Fetch execution state.
    ///
    /// # Errors
    ///
    /// Propagates the broker's error.
    pub fn state(&self) -> Result<AgentState> {
        self.broker.state()
    }
}

/// A broker that keeps its state in memory.
#[derive(Debug, Default)]
pub struct InMemoryBroker {
    state: Mutex<AgentState>,
}

impl InMemoryBroker {
    /// Create an idle broker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connected client.
    pub fn connect(&self) {
        self.lock().connected_clients += 1;
    }

    /// Queue a benchmark job.
    pub fn enqueue(&self) {
        self.lock().queued_jobs += 1;
    }

    /// Move the next queued job to running. Returns false if none is queued
    /// or a job is already running.
    pub fn start_next(&self, job: impl Into<String>) -> bool {
        let mut state = self.lock();
        if state.queued_jobs == 0 || state.running_job.is_some() {
            return false;
        }
        state.queued_jobs -= 1;
        state.running_job = Some(job.into());
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AgentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Broker for InMemoryBroker {
    fn reset(&self) -> Result<()> {
        let mut state = self.lock();
        state.queued_jobs = 0;
        state.running_job = None;
        Ok(())
    }

    fn state(&self) -> Result<AgentState> {
        Ok(self.lock().clone())
    }
}
