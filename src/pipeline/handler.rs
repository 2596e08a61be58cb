use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::composer::ReplyComposer;
use super::filter;
use crate::platform::{EventSource, IncomingMessage, Publisher};
use crate::translate::TranslationService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Filtered out before any translation call
    Ineligible,
    /// Already in the target language
    SameLanguage,
    Replied,
    /// An unexpected error was logged and swallowed
    Dropped,
}

/// filter -> translate -> compose -> publish, once per message
pub struct EventPipeline {
    translator: TranslationService,
    composer: ReplyComposer,
    publisher: Arc<dyn Publisher>,
    gate: Option<Arc<Semaphore>>,
}

impl EventPipeline {
    /// The skip check uses the same target language as the prompt
    pub fn new(translator: TranslationService, publisher: Arc<dyn Publisher>) -> Self {
        let composer = ReplyComposer::new(translator.target_language());
        Self {
            translator,
            composer,
            publisher,
            gate: None,
        }
    }

    pub fn with_accent_color(mut self, color: u32) -> Self {
        self.composer = self.composer.with_color(color);
        self
    }

    /// Cap the number of messages translated at once
    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(limit.max(1))));
        self
    }

    /// Handle one message. Never fails: unexpected errors are logged only,
    /// so the channel is not spammed with internal errors.
    pub async fn handle(&self, message: IncomingMessage) -> HandleOutcome {
        if let Err(reason) = filter::check(&message) {
            debug!(message_id = %message.id, ?reason, "Skipping message");
            return HandleOutcome::Ineligible;
        }

        match self.process(&message).await {
            Ok(true) => HandleOutcome::Replied,
            Ok(false) => HandleOutcome::SameLanguage,
            Err(e) => {
                error!(message_id = %message.id, "Error handling message: {:#}", e);
                HandleOutcome::Dropped
            }
        }
    }

    async fn process(&self, message: &IncomingMessage) -> anyhow::Result<bool> {
        let _permit = match &self.gate {
            Some(gate) => Some(gate.clone().acquire_owned().await?),
            None => None,
        };

        let result = self.translator.translate(&message.raw_content).await;

        let Some(artifact) = self.composer.compose(message, &result) else {
            debug!(message_id = %message.id, "Already in {}", self.translator.target_language());
            return Ok(false);
        };

        self.publisher.reply(&message.message_ref(), &artifact).await?;
        info!(message_id = %message.id, footer = %artifact.footer_text, "Reply published");
        Ok(true)
    }

    /// Consume `source` until it closes, one task per event.
    /// Completion order is not tied to arrival order.
    pub async fn run<S: EventSource>(self: Arc<Self>, mut source: S) {
        let mut tasks: JoinSet<HandleOutcome> = JoinSet::new();

        loop {
            tokio::select! {
                event = source.next_event() => match event {
                    Some(message) => {
                        let pipeline = self.clone();
                        let span = info_span!("message", id = %message.id, channel = %message.channel_id);
                        tasks.spawn(async move { pipeline.handle(message).await }.instrument(span));
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => reap(joined),
            }
        }

        info!("Event source closed, draining {} in-flight messages", tasks.len());
        while let Some(joined) = tasks.join_next().await {
            reap(joined);
        }
    }
}

fn reap(joined: Result<HandleOutcome, JoinError>) {
    match joined {
        Ok(outcome) => debug!(?outcome, "Message handled"),
        Err(e) if e.is_panic() => error!("Message handler panicked: {}", e),
        Err(e) => warn!("Message handler did not finish: {}", e),
    }
}
