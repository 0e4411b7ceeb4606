use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use devfeed_core::{FeedId, FetchTicket, PostId, ThemeId};
use feed_logging::{feed_debug, feed_error, feed_info, feed_warn};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::render::{render_article, Converter, Html2MdConverter};
use crate::{
    DevToClient, EngineEvent, FailureKind, FetchError, FetchSettings, PageSource, ThemeStore,
};

enum EngineCommand {
    FetchPage { feed: FeedId, ticket: FetchTicket },
    Cancel { feed: FeedId },
    FetchTags,
    FetchArticle { id: PostId },
    SaveTheme { theme: ThemeId },
}

/// Owns the IO thread. Commands go in, `EngineEvent`s come out.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

struct Worker {
    source: Arc<dyn PageSource>,
    converter: Arc<dyn Converter>,
    store: ThemeStore,
    event_tx: mpsc::Sender<EngineEvent>,
    tokens: HashMap<FeedId, CancellationToken>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, store: ThemeStore) -> Result<Self, FetchError> {
        let client = DevToClient::new(settings)?;
        Ok(Self::with_source(Arc::new(client), store))
    }

    pub fn with_source(source: Arc<dyn PageSource>, store: ThemeStore) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker = Worker {
            source,
            converter: Arc::new(Html2MdConverter),
            store,
            event_tx,
            tokens: HashMap::new(),
        };

        thread::spawn(move || match Runtime::new() {
            Ok(runtime) => worker.run(&runtime, cmd_rx),
            Err(err) => {
                feed_error!("engine runtime unavailable: {}", err);
                worker.refuse_all(cmd_rx, &err.to_string());
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn fetch_page(&self, feed: FeedId, ticket: FetchTicket) {
        self.send(EngineCommand::FetchPage { feed, ticket });
    }

    /// Aborts the feed's in-flight fetches; their results are never reported.
    pub fn cancel(&self, feed: FeedId) {
        self.send(EngineCommand::Cancel { feed });
    }

    pub fn fetch_tags(&self) {
        self.send(EngineCommand::FetchTags);
    }

    pub fn fetch_article(&self, id: PostId) {
        self.send(EngineCommand::FetchArticle { id });
    }

    pub fn save_theme(&self, theme: ThemeId) {
        self.send(EngineCommand::SaveTheme { theme });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.poll_event(timeout).ok()
    }

    /// Like `recv_timeout`, but reports `Disconnected` once the engine thread is gone.
    pub fn poll_event(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        match self.event_rx.lock() {
            Ok(rx) => rx.recv_timeout(timeout),
            Err(_) => Err(mpsc::RecvTimeoutError::Disconnected),
        }
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            feed_warn!("engine thread has stopped; command dropped");
        }
    }
}

impl Worker {
    fn run(mut self, runtime: &Runtime, cmd_rx: mpsc::Receiver<EngineCommand>) {
        while let Ok(command) = cmd_rx.recv() {
            match command {
                EngineCommand::FetchPage { feed, ticket } => {
                    let token = self
                        .tokens
                        .entry(feed)
                        .or_insert_with(CancellationToken::new)
                        .clone();
                    let source = self.source.clone();
                    let event_tx = self.event_tx.clone();
                    runtime.spawn(async move {
                        let page = ticket.request.page;
                        feed_info!(
                            "fetch start feed={:?} generation={} page={}",
                            feed,
                            ticket.generation,
                            page
                        );
                        let result = tokio::select! {
                            _ = token.cancelled() => {
                                feed_debug!(
                                    "fetch cancelled feed={:?} generation={} page={}",
                                    feed,
                                    ticket.generation,
                                    page
                                );
                                return;
                            }
                            result = source.fetch_page(&ticket.request) => result,
                        };
                        if let Err(err) = &result {
                            feed_warn!("fetch failed feed={:?} page={}: {}", feed, page, err);
                        }
                        let _ = event_tx.send(EngineEvent::PageFetched {
                            feed,
                            generation: ticket.generation,
                            page,
                            result,
                        });
                    });
                }
                EngineCommand::Cancel { feed } => {
                    if let Some(token) = self.tokens.remove(&feed) {
                        feed_debug!("cancelling in-flight fetches feed={:?}", feed);
                        token.cancel();
                    }
                }
                EngineCommand::FetchTags => {
                    let source = self.source.clone();
                    let event_tx = self.event_tx.clone();
                    runtime.spawn(async move {
                        let result = source.fetch_tags().await;
                        let _ = event_tx.send(EngineEvent::TagsFetched(result));
                    });
                }
                EngineCommand::FetchArticle { id } => {
                    let source = self.source.clone();
                    let converter = self.converter.clone();
                    let event_tx = self.event_tx.clone();
                    runtime.spawn(async move {
                        let result = source
                            .fetch_article(id)
                            .await
                            .map(|detail| render_article(detail, converter.as_ref()));
                        let _ = event_tx.send(EngineEvent::ArticleFetched { id, result });
                    });
                }
                EngineCommand::SaveTheme { theme } => {
                    let result = match self.store.save(theme) {
                        Ok(path) => {
                            feed_debug!("theme {} saved to {}", theme, path.display());
                            Ok(())
                        }
                        Err(err) => {
                            feed_warn!("theme {} not saved: {}", theme, err);
                            Err(err.to_string())
                        }
                    };
                    let _ = self.event_tx.send(EngineEvent::ThemeSaved(result));
                }
            }
        }
        for token in self.tokens.values() {
            token.cancel();
        }
    }

    /// Answers every command with a failure when no runtime could be built.
    fn refuse_all(self, cmd_rx: mpsc::Receiver<EngineCommand>, reason: &str) {
        let failure =
            || FetchError::new(FailureKind::Network, format!("engine unavailable: {reason}"));
        while let Ok(command) = cmd_rx.recv() {
            let event = match command {
                EngineCommand::FetchPage { feed, ticket } => EngineEvent::PageFetched {
                    feed,
                    generation: ticket.generation,
                    page: ticket.request.page,
                    result: Err(failure()),
                },
                EngineCommand::Cancel { .. } => continue,
                EngineCommand::FetchTags => EngineEvent::TagsFetched(Err(failure())),
                EngineCommand::FetchArticle { id } => EngineEvent::ArticleFetched {
                    id,
                    result: Err(failure()),
                },
                EngineCommand::SaveTheme { .. } => {
                    EngineEvent::ThemeSaved(Err(failure().to_string()))
                }
            };
            let _ = self.event_tx.send(event);
        }
    }
}
