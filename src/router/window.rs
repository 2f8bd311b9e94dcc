use parking_lot::RwLock;
use tokio::sync::broadcast::{Receiver, Sender};
use tracing::debug;

use crate::utils::channel;

/// Fired whenever the location fragment changes; carries the new fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChange(pub String);

/// Location fragment plus its `hashchange` event stream.
#[derive(Debug)]
pub struct Window {
    hash: RwLock<String>,
    hashchange: Sender<HashChange>,
}

impl Window {
    pub fn new(initial_hash: &str) -> Self {
        Self {
            hash: RwLock::new(normalize(initial_hash)),
            hashchange: channel::run(),
        }
    }

    /// Current fragment, `""` or `#...`.
    pub fn hash(&self) -> String {
        self.hash.read().clone()
    }

    /// Set the fragment; fires `hashchange` only when it actually changed.
    pub fn set_hash(&self, hash: &str) -> bool {
        let hash = normalize(hash);
        {
            let mut current = self.hash.write();
            if *current == hash {
                return false;
            }
            *current = hash.clone();
        }
        self.fire(HashChange(hash));
        true
    }

    /// Fire `hashchange` for the current fragment without changing it.
    pub fn trigger_hashchange(&self) {
        self.fire(HashChange(self.hash()));
    }

    pub fn subscribe(&self) -> Receiver<HashChange> {
        self.hashchange.subscribe()
    }

    fn fire(&self, event: HashChange) {
        // no subscribers yet is fine
        if let Err(err) = self.hashchange.send(event) {
            debug!("hashchange without subscribers: {:?}", err.0);
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new("")
    }
}

fn normalize(hash: &str) -> String {
    match hash {
        "" | "#" => String::new(),
        h if h.starts_with('#') => h.to_owned(),
        h => format!("#{}", h),
    }
}
