use tokio::sync::broadcast::{self, Sender};

use crate::router::window::HashChange;


const BUFFER_SIZE: usize = 50;
pub fn run() -> Sender<HashChange> {
    let (hashchange_sender, _) = broadcast::channel(BUFFER_SIZE);
    hashchange_sender
}
