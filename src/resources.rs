use crate::client::CleverClient;
use crate::error::ClientError;
use crate::http::Transport;
use crate::rate::Clock;
use crate::types::RequestSpec;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Collections exposed by the Clever v3.0 API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Districts,
    Schools,
    Sections,
    Courses,
    Terms,
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Districts,
        ResourceKind::Schools,
        ResourceKind::Sections,
        ResourceKind::Courses,
        ResourceKind::Terms,
        ResourceKind::Users,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Districts => "districts",
            ResourceKind::Schools => "schools",
            ResourceKind::Sections => "sections",
            ResourceKind::Courses => "courses",
            ResourceKind::Terms => "terms",
            ResourceKind::Users => "users",
        }
    }

    pub fn path(self) -> String {
        format!("/{}", self.name())
    }

    /// Only the users collection understands the `role` filter.
    pub fn supports_role(self) -> bool {
        matches!(self, ResourceKind::Users)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub limit: u32,
    /// Opaque cursor from a previous page.
    pub starting_after: Option<String>,
    pub role: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: 1,
            starting_after: None,
            role: None,
        }
    }
}

impl ListParams {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn starting_after(mut self, cursor: impl Into<String>) -> Self {
        self.starting_after = Some(cursor.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Borrowed handle for one collection; every call goes through the client's gate.
pub struct Resource<'a, T: Transport, C: Clock> {
    client: &'a mut CleverClient<T, C>,
    kind: ResourceKind,
}

impl<'a, T: Transport, C: Clock> Resource<'a, T, C> {
    pub(crate) fn new(client: &'a mut CleverClient<T, C>, kind: ResourceKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn list_spec(&self, params: &ListParams) -> RequestSpec {
        let role = if self.kind.supports_role() {
            params.role.as_deref()
        } else {
            if params.role.is_some() {
                debug!("ignoring role filter for {}", self.kind);
            }
            None
        };
        RequestSpec::get(self.kind.path())
            .param("limit", params.limit)
            .opt_param("starting_after", params.starting_after.as_deref())
            .opt_param("role", role)
    }

    pub fn get_all(&mut self, params: &ListParams) -> Option<Value> {
        let spec = self.list_spec(params);
        self.client.execute(&spec)
    }

    /// Fails fast on an empty id without touching the network or the rate window.
    pub fn get_by_id(&mut self, id: &str) -> Result<Option<Value>, ClientError> {
        if id.is_empty() {
            return Err(ClientError::InvalidArgument(format!(
                "{} id must be provided to fetch by id",
                self.kind
            )));
        }
        let spec = RequestSpec::get(self.kind.path()).with_id(id);
        Ok(self.client.execute(&spec))
    }
}
