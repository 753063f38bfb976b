use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8090".to_string()
}

fn default_workers() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    64
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Number of request consumers
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Requests waiting for a consumer before senders wait
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
        }
    }
}
