//! Server registry abstract Trait

use std::collections::BTreeMap;

use zone_blueprint_schema::{validate_server, Location, Server};

use crate::error::{CoreError, CoreResult};

/// Server Registry Trait
///
/// Resolves server names referenced by services. Entries are immutable once
/// the registry is built.
/// Provides a default memory implementation of `InMemoryServerRegistry`.
pub trait ServerRegistry: Send + Sync {
    /// Get a server by name
    ///
    /// # Arguments
    /// * `name` - Registry key, equal to `Server::name`
    fn get(&self, name: &str) -> Option<&Server>;

    /// List all registered server names, sorted
    fn names(&self) -> Vec<String>;
}

/// In-memory server registry
#[derive(Debug, Clone, Default)]
pub struct InMemoryServerRegistry {
    servers: BTreeMap<String, Server>,
}

impl InMemoryServerRegistry {
    /// Build from a keyed map
    ///
    /// Every key must equal its server's name, and every server must pass
    /// validation in the effective mode.
    pub fn from_map(map: BTreeMap<String, Server>) -> CoreResult<Self> {
        let mut servers = BTreeMap::new();
        for (key, server) in map {
            if key != server.name {
                return Err(CoreError::RegistryMismatch {
                    key,
                    name: server.name,
                });
            }
            let result = validate_server(&server)?;
            if !result.success {
                return Err(CoreError::ConfigError(format!(
                    "Invalid server '{key}': {}",
                    result.error_messages().join("; ")
                )));
            }
            let server = result.into_data().unwrap_or(server);
            servers.insert(key, server);
        }
        log::debug!("Server registry built with {} servers", servers.len());
        Ok(Self { servers })
    }

    /// Build from a list, keyed by name
    pub fn from_servers(list: Vec<Server>) -> CoreResult<Self> {
        let mut map = BTreeMap::new();
        for server in list {
            if map.contains_key(&server.name) {
                return Err(CoreError::DuplicateServer(server.name));
            }
            map.insert(server.name.clone(), server);
        }
        Self::from_map(map)
    }

    /// Servers at a location, in name order
    pub fn servers_in(&self, location: Location) -> Vec<&Server> {
        self.servers
            .values()
            .filter(|s| s.location == location)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Server> {
        self.servers.values()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl ServerRegistry for InMemoryServerRegistry {
    fn get(&self, name: &str) -> Option<&Server> {
        self.servers.get(name)
    }

    fn names(&self) -> Vec<String> {
        self.servers.keys().cloned().collect()
    }
}
