//! Confirmation prompts for destructive actions

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

/// Asks the user a yes/no question.
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Returns `true` if the user accepted.
    async fn confirm(&self, text: &str) -> bool;
}

/// A pending question for the front end to answer.
#[derive(Debug)]
pub struct ConfirmPrompt {
    pub text: String,
    reply: oneshot::Sender<bool>,
}

impl ConfirmPrompt {
    pub fn accept(self) {
        let _ = self.reply.send(true);
    }

    pub fn reject(self) {
        let _ = self.reply.send(false);
    }

    pub fn answer(self, accepted: bool) {
        let _ = self.reply.send(accepted);
    }
}

/// Forwards questions to the front end over a channel.
///
/// A prompt dropped without an answer, or a closed channel, counts as "no".
#[derive(Debug, Clone)]
pub struct ChannelConfirm {
    prompts: mpsc::UnboundedSender<ConfirmPrompt>,
}

impl ChannelConfirm {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ConfirmPrompt>) {
        let (prompts, rx) = mpsc::unbounded_channel();
        (Self { prompts }, rx)
    }
}

#[async_trait]
impl Confirm for ChannelConfirm {
    async fn confirm(&self, text: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let prompt = ConfirmPrompt {
            text: text.to_string(),
            reply,
        };
        if self.prompts.send(prompt).is_err() {
            log::debug!("no confirm receiver, declining: {}", text);
            return false;
        }
        answer.await.unwrap_or(false)
    }
}

/// Gives the same answer to every question.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysConfirm(pub bool);

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _text: &str) -> bool {
        self.0
    }
}
