use crate::roster::RosterStore;
use crate::storage::LocalStorage;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn LocalStorage>,
    pub roster: Arc<Mutex<RosterStore>>,
}

impl AppState {
    pub fn new(storage: Arc<dyn LocalStorage>, roster: RosterStore) -> Self {
        Self {
            storage,
            roster: Arc::new(Mutex::new(roster)),
        }
    }
}
