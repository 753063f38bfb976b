use std::sync::Arc;

use async_trait::async_trait;
use glossa_io::Responder;
use glossa_protocol::{LexiconProtocol, Request, Response};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// A request waiting for a worker, with the way back to its connection
pub struct Job {
    pub request: Request,
    pub reply: oneshot::Sender<Response>,
}

/// Centralized channel management
pub struct ChannelSet {
    pub jobs: (AsyncSender<Job>, AsyncReceiver<Job>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            jobs: kanal::bounded_async(capacity),
        }
    }
}

/// Hands requests to the worker pool and waits for the reply.
pub struct QueueResponder {
    jobs: AsyncSender<Job>,
}

impl QueueResponder {
    pub fn new(jobs: AsyncSender<Job>) -> Self {
        Self { jobs }
    }
}

#[async_trait]
impl Responder for QueueResponder {
    async fn respond(&self, request: Request) -> Response {
        let (reply, response) = oneshot::channel();
        if let Err(e) = self.jobs.send(Job { request, reply }).await {
            tracing::error!("Request queue closed: {e}");
            return Response::error("Service unavailable");
        }

        response.await.unwrap_or_else(|_| {
            tracing::warn!("Request dropped before a response was produced");
            Response::error("Service unavailable")
        })
    }
}

/// Take one job at a time until cancelled or the queue closes
pub async fn worker(
    id: usize,
    protocol: LexiconProtocol,
    jobs: AsyncReceiver<Job>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!(worker = id, "Worker started");
    loop {
        let job = tokio::select! {
            _ = cancel.cancelled() => break,
            job = jobs.recv() => job,
        };
        let Ok(job) = job else {
            tracing::debug!(worker = id, "Request queue closed");
            break;
        };

        let response = protocol.respond(&job.request);
        if job.reply.send(response).is_err() {
            tracing::debug!(worker = id, "Requester went away");
        }
    }
    tracing::debug!(worker = id, "Worker stopped");
    Ok(())
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(state.config.server.queue_capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn responder(&self) -> Arc<dyn Responder> {
        Arc::new(QueueResponder::new(self.channels.jobs.0.clone()))
    }

    pub fn spawn_tasks(&self, listener: TcpListener) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Workers
        let workers = self.state.config.server.workers.max(1);
        for id in 0..workers {
            tasks.spawn(worker(
                id,
                self.state.protocol.clone(),
                self.channels.jobs.1.clone(),
                self.cancel_token.child_token(),
            ));
        }
        tracing::info!("Started {} workers", workers);

        // WebSocket server
        tasks.spawn(glossa_io::serve(
            listener,
            self.responder(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
