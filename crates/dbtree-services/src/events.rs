//! Events emitted towards the connection sidebar

use serde::{Deserialize, Serialize};

/// Requests the sidebar acts on after a service operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SidebarEvent {
    /// Reload the tree of the given connection
    RefreshConnections { connection_id: i64 },
}
