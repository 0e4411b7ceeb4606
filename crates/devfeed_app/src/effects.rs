use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use devfeed_core::{Effect, Msg};
use devfeed_engine::{EngineEvent, EngineHandle};
use feed_logging::{feed_debug, feed_warn};

/// Executes core effects on the engine and feeds its events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { feed, ticket } => {
                    feed_debug!(
                        "FetchPage feed={:?} generation={} page={}",
                        feed,
                        ticket.generation,
                        ticket.request.page
                    );
                    self.engine.fetch_page(feed, ticket);
                }
                Effect::CancelFetches { feed } => self.engine.cancel(feed),
                Effect::FetchTags => self.engine.fetch_tags(),
                Effect::FetchArticle { id } => self.engine.fetch_article(id),
                Effect::PersistTheme { theme } => self.engine.save_theme(theme),
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            relay_events(|| engine.poll_event(EVENT_POLL_INTERVAL), &msg_tx);
        });
    }
}

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Forwards engine events as messages until either side goes away.
fn relay_events<F>(mut next_event: F, msg_tx: &mpsc::Sender<Msg>)
where
    F: FnMut() -> Result<EngineEvent, RecvTimeoutError>,
{
    loop {
        let event = match next_event() {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                feed_warn!("engine event channel closed");
                return;
            }
        };
        let Some(msg) = event_to_msg(event) else {
            continue;
        };
        if msg_tx.send(msg).is_err() {
            return;
        }
    }
}

pub fn event_to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::PageFetched {
            feed,
            generation,
            page,
            result,
        } => Some(Msg::PageLoaded {
            feed,
            generation,
            page,
            result: result.map_err(Into::into),
        }),
        EngineEvent::TagsFetched(result) => Some(Msg::TagsLoaded(result.map_err(Into::into))),
        EngineEvent::ArticleFetched { id, result } => Some(Msg::ArticleLoaded {
            id,
            result: result.map_err(Into::into),
        }),
        EngineEvent::ThemeSaved(Ok(())) => None,
        EngineEvent::ThemeSaved(Err(err)) => {
            feed_warn!("theme preference not persisted: {}", err);
            None
        }
    }
}
