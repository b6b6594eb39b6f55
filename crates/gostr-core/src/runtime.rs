//! Executes [`Command`]s against the outside world.
//!
//! Every command resolves to exactly one [`Message`]. The runner never sees
//! application state; commands carry everything they need.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::app::{Command, Message, PublishOrigin};
use crate::constants::IMAGE_PREVIEW_WIDTH;
use crate::error::CoreResult;
use crate::feed::load_feed;
use crate::image::ImagePreviewer;
use crate::models::reactions::ReactionChange;
use crate::publish;
use crate::thread::load_replies;
use crate::transport::{PublishReceipt, RelayTransport};

/// System clipboard seam.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> CoreResult<()>;
}

#[derive(Clone)]
pub struct CommandRunner {
    transport: Arc<dyn RelayTransport>,
    previewer: Arc<dyn ImagePreviewer>,
    clipboard: Arc<dyn Clipboard>,
    config_path: PathBuf,
}

impl CommandRunner {
    pub fn new(
        transport: Arc<dyn RelayTransport>,
        previewer: Arc<dyn ImagePreviewer>,
        clipboard: Arc<dyn Clipboard>,
        config_path: PathBuf,
    ) -> Self {
        Self {
            transport,
            previewer,
            clipboard,
            config_path,
        }
    }

    /// Run `command` on its own task and deliver the completion on `tx`.
    pub fn spawn(&self, command: Command, tx: UnboundedSender<Message>) {
        let runner = self.clone();
        tokio::spawn(async move {
            let name = command.name();
            let message = runner.run(command).await;
            if tx.send(message).is_err() {
                debug!("dropping {} completion (dispatch loop gone)", name);
            }
        });
    }

    pub async fn run(&self, command: Command) -> Message {
        let transport = self.transport.as_ref();
        match command {
            Command::LoadFeed { request_id, query } => Message::FeedLoaded {
                request_id,
                result: load_feed(transport, &query).await,
            },
            Command::LoadReplies {
                target,
                known_names,
                idle,
            } => Message::RepliesLoaded {
                target,
                result: load_replies(transport, target, &known_names, idle).await,
            },
            Command::PublishNote {
                keys,
                content,
                reply,
            } => {
                let origin = match &reply {
                    Some(context) => PublishOrigin::Reply {
                        target: context.target.id,
                    },
                    None => PublishOrigin::Note,
                };
                let event = match &reply {
                    Some(context) => publish::reply(&keys, &context.root, &context.target, &content),
                    None => publish::text_note(&keys, &content),
                };
                Message::Published {
                    origin,
                    result: self.publish(event).await,
                }
            }
            Command::SendDirectMessage { keys, to, content } => Message::Published {
                origin: PublishOrigin::DirectMessage,
                result: self
                    .publish(publish::direct_message(&keys, &to, &content))
                    .await,
            },
            Command::Like { keys, target } => {
                let result = self.publish(publish::like(&keys, &target)).await;
                Message::ReactionDone(result.map(|receipt| ReactionChange::Liked {
                    target: target.id,
                    reaction: receipt.event.id,
                }))
            }
            Command::Unlike { keys, reaction } => {
                let result = self.publish(publish::deletion(&keys, reaction)).await;
                Message::ReactionDone(result.map(|_| ReactionChange::Unliked { reaction }))
            }
            Command::Boost { keys, target } => {
                let result = self.publish(publish::boost(&keys, &target)).await;
                Message::ReactionDone(result.map(|receipt| ReactionChange::Boosted {
                    target: target.id,
                    reaction: receipt.event.id,
                }))
            }
            Command::Unboost { keys, reaction } => {
                let result = self.publish(publish::deletion(&keys, reaction)).await;
                Message::ReactionDone(result.map(|_| ReactionChange::Unboosted { reaction }))
            }
            Command::SaveConfig(config) => {
                let result = match config.save(&self.config_path) {
                    Ok(()) => transport.sync_relays(&config.active_relays()).await,
                    Err(e) => Err(e),
                };
                Message::ConfigSaved(result)
            }
            Command::LoadImage { url } => {
                let result = self.previewer.preview(&url, IMAGE_PREVIEW_WIDTH).await;
                Message::ImageLoaded { url, result }
            }
            Command::CopyToClipboard(text) => Message::Copied(self.clipboard.copy(&text)),
        }
    }

    async fn publish(&self, event: CoreResult<nostr_sdk::Event>) -> CoreResult<PublishReceipt> {
        let event = event?;
        let receipt = self.transport.publish(event).await;
        if let Err(e) = &receipt {
            warn!("publish failed: {}", e);
        }
        receipt
    }
}
