use std::{collections::HashMap, future::Future};

use tokio::task::JoinHandle;

/// Keyed background tasks. Spawning under a key that is still running
/// aborts the previous task.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<&'static str, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, key: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.tasks.insert(key, tokio::spawn(task)) {
            handle.abort();
        }
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn respawning_a_key_aborts_the_previous_task() {
        let (tx, rx) = flume::unbounded();
        let mut tasks = TaskManager::new();

        let slow_tx = tx.clone();
        tasks.spawn("fetch", async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            let _ = slow_tx.send("slow");
        });
        tasks.spawn("fetch", async move {
            let _ = tx.send("fast");
        });

        assert_eq!(rx.recv_async().await.unwrap(), "fast");
        // The aborted task drops its sender without sending, closing the channel.
        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv_async())
            .await
            .unwrap();
        assert!(closed.is_err());
    }
}
