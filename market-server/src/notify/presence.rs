//! Presence Registry
//!
//! 在线连接表：seller_id -> 当前活跃连接。同一 seller 重复注册时新连接
//! 覆盖旧连接；断开清理必须按连接 ID 条件删除，避免旧连接的清理误删
//! 新连接的登记。

use std::sync::Arc;

use dashmap::DashMap;
use shared::Role;
use uuid::Uuid;

use crate::message::transport::Transport;

/// One registered realtime connection
#[derive(Debug, Clone)]
pub struct PresenceEntry {
    /// Connection identity, distinct from the seller identity
    pub conn_id: Uuid,
    pub role: Role,
    pub transport: Arc<dyn Transport>,
}

/// Online-connection registry, keyed by seller id
///
/// Trait seam so the in-memory table can be swapped for an external store.
pub trait PresenceRegistry: Send + Sync {
    /// Bind a seller to a connection. A later registration for the same
    /// seller replaces the earlier one.
    fn register(&self, seller_id: &str, entry: PresenceEntry);

    /// Current connection for a seller, if online
    fn get(&self, seller_id: &str) -> Option<PresenceEntry>;

    /// Remove the seller's binding only if it still points at `conn_id`.
    /// Returns true if a binding was removed.
    fn remove_if(&self, seller_id: &str, conn_id: Uuid) -> bool;

    /// Number of sellers currently online
    fn online_count(&self) -> usize;
}

/// DashMap-backed registry
#[derive(Debug, Default)]
pub struct InMemoryPresence {
    entries: DashMap<String, PresenceEntry>,
}

impl InMemoryPresence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresenceRegistry for InMemoryPresence {
    fn register(&self, seller_id: &str, entry: PresenceEntry) {
        if let Some(previous) = self.entries.insert(seller_id.to_string(), entry) {
            tracing::debug!(
                seller_id = %seller_id,
                old_conn = %previous.conn_id,
                "Presence entry replaced by newer connection"
            );
        }
    }

    fn get(&self, seller_id: &str) -> Option<PresenceEntry> {
        self.entries.get(seller_id).map(|e| e.clone())
    }

    fn remove_if(&self, seller_id: &str, conn_id: Uuid) -> bool {
        self.entries
            .remove_if(seller_id, |_, entry| entry.conn_id == conn_id)
            .is_some()
    }

    fn online_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::transport::MemoryTransport;

    fn entry(conn_id: Uuid) -> PresenceEntry {
        let (transport, _peer) = MemoryTransport::pair();
        PresenceEntry {
            conn_id,
            role: Role::Seller,
            transport: Arc::new(transport),
        }
    }

    #[test]
    fn register_overwrites_previous_connection() {
        let registry = InMemoryPresence::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        registry.register("seller:a", entry(first));
        registry.register("seller:a", entry(second));

        assert_eq!(registry.online_count(), 1);
        assert_eq!(registry.get("seller:a").map(|e| e.conn_id), Some(second));
    }

    #[test]
    fn stale_disconnect_does_not_evict_newer_connection() {
        let registry = InMemoryPresence::new();
        let old_conn = Uuid::new_v4();
        let new_conn = Uuid::new_v4();

        registry.register("seller:a", entry(old_conn));
        registry.register("seller:a", entry(new_conn));

        // The old connection's cleanup fires after the overwrite
        assert!(!registry.remove_if("seller:a", old_conn));
        assert_eq!(registry.get("seller:a").map(|e| e.conn_id), Some(new_conn));

        // The live connection's own cleanup still works
        assert!(registry.remove_if("seller:a", new_conn));
        assert!(registry.get("seller:a").is_none());
    }
}
