//! Administrative commands: toggling, rebuilding, flushing and status.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::connection::ConnectionManager;
use crate::events::EventAdapter;
use crate::loader::IndexLoader;
use crate::settings::{parse_flag, SettingsManager};

/// A request from the forum's admin surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// Turn indexing on or off. `state` is read with integer semantics.
    Toggle { state: Option<String> },
    /// Delete, recreate and repopulate the index.
    Rebuild,
    /// Delete every document.
    Flush,
    /// Report connection and index statistics.
    Status,
    /// Persist settings fields, reload and reconnect.
    SaveSettings { values: HashMap<String, String> },
}

/// HTTP-like outcome of an admin command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdminStatus {
    Ok,
    BadRequest,
    ServerError,
}

impl AdminStatus {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::ServerError => 500,
        }
    }
}

/// Connection and index statistics shown on the admin page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub connected: bool,
    pub enabled: bool,
    pub host: String,
    pub index_name: String,
    /// Documents in the index; absent when the count failed.
    pub records: Option<u64>,
    /// Documents carrying a topic title.
    pub topics: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminResponse {
    pub status: AdminStatus,
    pub message: Option<String>,
    pub report: Option<StatusReport>,
}

impl AdminResponse {
    fn ok() -> Self {
        Self {
            status: AdminStatus::Ok,
            message: None,
            report: None,
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: AdminStatus::BadRequest,
            message: Some(message.into()),
            report: None,
        }
    }

    fn server_error(message: impl Into<String>) -> Self {
        Self {
            status: AdminStatus::ServerError,
            message: Some(message.into()),
            report: None,
        }
    }
}

/// A dashboard checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub done: bool,
    pub done_text: String,
    pub not_done_text: String,
}

impl Notice {
    fn new(done: bool, done_text: &str, not_done_text: &str) -> Self {
        Self {
            done,
            done_text: done_text.to_string(),
            not_done_text: not_done_text.to_string(),
        }
    }
}

pub struct AdminHandler {
    settings: Arc<SettingsManager>,
    connection: Arc<ConnectionManager>,
    loader: Arc<IndexLoader>,
    events: Arc<EventAdapter>,
}

impl AdminHandler {
    pub fn new(
        settings: Arc<SettingsManager>,
        connection: Arc<ConnectionManager>,
        loader: Arc<IndexLoader>,
        events: Arc<EventAdapter>,
    ) -> Self {
        Self {
            settings,
            connection,
            loader,
            events,
        }
    }

    /// Run an admin command. Failures are mapped to status codes, never
    /// returned as errors.
    pub async fn handle(&self, command: AdminCommand) -> AdminResponse {
        match command {
            AdminCommand::Toggle { state } => self.toggle(state.as_deref()).await,
            AdminCommand::Rebuild => self.rebuild().await,
            AdminCommand::Flush => self.flush().await,
            AdminCommand::Status => AdminResponse {
                report: Some(self.status().await),
                ..AdminResponse::ok()
            },
            AdminCommand::SaveSettings { values } => self.save_settings(&values).await,
        }
    }

    /// The two dashboard notices: connection health and indexing state.
    pub async fn notices(&self) -> Vec<Notice> {
        let connected = self.connection.ping().await.is_ok();
        let enabled = self.settings.is_enabled().await;
        vec![
            Notice::new(
                connected,
                "Elasticsearch connection OK",
                "Could not connect to Elasticsearch server",
            ),
            Notice::new(
                enabled,
                "Elasticsearch Indexing Enabled",
                "Elasticsearch Indexing Disabled",
            ),
        ]
    }

    /// Gather statistics. Engine failures leave the affected fields empty.
    pub async fn status(&self) -> StatusReport {
        let settings = self.settings.current().await;
        let connected = self.loader.ping().await.is_ok();
        let (records, topics) = if connected {
            let (records, topics) =
                tokio::join!(self.loader.record_count(), self.loader.topic_count());
            (records.ok(), topics.ok())
        } else {
            (None, None)
        };

        StatusReport {
            connected,
            enabled: settings.enabled,
            host: settings.host,
            index_name: settings.index_name,
            records,
            topics,
        }
    }

    async fn toggle(&self, state: Option<&str>) -> AdminResponse {
        let Some(state) = state.filter(|s| !s.is_empty()) else {
            return AdminResponse::bad_request("'state' required");
        };

        match self.settings.set_enabled(parse_flag(state)).await {
            Ok(()) => AdminResponse::ok(),
            Err(e) => {
                error!(error = %e, "Could not persist indexing flag");
                AdminResponse::server_error(e.to_string())
            }
        }
    }

    async fn rebuild(&self) -> AdminResponse {
        match self.events.reindex().await {
            Ok(summary) => AdminResponse {
                message: Some(format!(
                    "Indexed {} documents from {} topics",
                    summary.documents, summary.topics
                )),
                ..AdminResponse::ok()
            },
            Err(e) => {
                error!(error = %e, "Could not rebuild search index");
                AdminResponse::server_error(e.to_string())
            }
        }
    }

    async fn flush(&self) -> AdminResponse {
        match self.loader.flush().await {
            Ok(()) => AdminResponse::ok(),
            Err(e) => {
                error!(error = %e, "Could not empty the search index");
                AdminResponse::server_error(e.to_string())
            }
        }
    }

    async fn save_settings(&self, values: &HashMap<String, String>) -> AdminResponse {
        let settings = match self.settings.save(values).await {
            Ok(settings) => settings,
            Err(e) => {
                error!(error = %e, "Could not save search settings");
                return AdminResponse::server_error(e.to_string());
            }
        };

        if let Err(e) = self.connection.connect(&settings).await {
            warn!(error = %e, "Settings saved but the engine is unreachable");
            return AdminResponse::server_error(e.to_string());
        }
        info!(host = %settings.host, "Search settings saved");
        AdminResponse::ok()
    }
}
