use chrono::{DateTime, Utc};
use log::trace;
use serde::Serialize;

use crate::{Error, Result};

/// A server in the rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Server {
    pub name: String,
    pub requests_handled: usize,
}

/// One dispatched request
#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    pub request_id: u64,
    pub server: String,
    pub timestamp: DateTime<Utc>,
}

/// Load share of one server
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerStats {
    pub name: String,
    pub requests: usize,
    /// Share of all processed requests, 0 when nothing was processed yet
    pub percentage: f64,
}

/// Round-robin dispatcher over a growable server pool
///
/// The pool is a ring stored in a `Vec`: index 0 is the head and `cursor` is the next
/// server to hand out. New servers go in at the tail, just before the head, so they are
/// reached once the cursor wraps around.
#[derive(Debug, Clone, Default)]
pub struct RoundRobin {
    servers: Vec<Server>,
    cursor: usize,
    total_requests: usize,
    history: Vec<RequestRecord>,
}

impl RoundRobin {
    pub fn new() -> Self {
        RoundRobin::default()
    }

    /// Pool of `count` servers named `server-1` to `server-{count}`
    pub fn with_servers(count: usize) -> Self {
        let mut balancer = RoundRobin::new();
        for i in 1..=count {
            balancer.add_server(format!("server-{}", i));
        }
        balancer
    }

    pub fn add_server(&mut self, name: impl Into<String>) {
        self.servers.push(Server {
            name: name.into(),
            requests_handled: 0,
        });
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Servers in rotation order, starting at the head
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn total_requests(&self) -> usize {
        self.total_requests
    }

    pub fn history(&self) -> &[RequestRecord] {
        &self.history
    }

    /// Returns the current server and advances the rotation
    pub fn next_server(&mut self) -> Option<&mut Server> {
        if self.servers.is_empty() {
            return None;
        }
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.servers.len();
        self.servers.get_mut(index)
    }

    /// Assigns a request to the next server and returns that server's name
    pub fn process_request(&mut self, request_id: u64) -> Result<&str> {
        let server = self.next_server().ok_or(Error::EmptyPool)?;
        server.requests_handled += 1;
        let name = server.name.clone();

        trace!("request {} -> {}", request_id, name);
        self.total_requests += 1;
        self.history.push(RequestRecord {
            request_id,
            server: name,
            timestamp: Utc::now(),
        });

        let last = self.history.len() - 1;
        Ok(&self.history[last].server)
    }

    pub fn statistics(&self) -> Vec<ServerStats> {
        self.servers
            .iter()
            .map(|server| {
                let percentage = if self.total_requests > 0 {
                    server.requests_handled as f64 / self.total_requests as f64 * 100.0
                } else {
                    0.0
                };
                ServerStats {
                    name: server.name.clone(),
                    requests: server.requests_handled,
                    percentage,
                }
            })
            .collect()
    }
}
