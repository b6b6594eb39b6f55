use nostr_sdk::prelude::*;
use tracing::{debug, info, warn};

use crate::app::input::{Key, TextInput};
use crate::app::message::{Command, PublishOrigin};
use crate::app::screen::{
    ComposeMessageScreen, ComposeNoteScreen, Recipient, RecipientStage, ReplyContext, Screen,
};
use crate::app::AppState;
use crate::error::CoreError;
use crate::keys::parse_public_key;
use crate::transport::PublishReceipt;

const NO_KEY: &str = "Set key first";

pub(crate) fn open_compose_note(state: &mut AppState, reply: Option<ReplyContext>, return_to: Screen) {
    state.screen = Screen::ComposeNote(ComposeNoteScreen {
        input: TextInput::with_placeholder("Your note..."),
        reply,
        error: None,
        publishing: false,
        return_to: Box::new(return_to),
    });
}

/// Open the direct-message composer. With `to` the recipient is fixed,
/// otherwise it is picked from the follow list or typed in.
pub(crate) fn open_compose_message(state: &mut AppState, to: Option<PublicKey>, return_to: Screen) {
    let names = &state.session.names;
    let mut follows: Vec<Recipient> = state
        .session
        .following()
        .into_iter()
        .map(|pubkey| Recipient {
            label: names.display(&pubkey),
            pubkey,
        })
        .collect();
    follows.sort_by_key(|r| r.label.to_lowercase());

    let stage = match to {
        Some(pubkey) => RecipientStage::Chosen(Recipient {
            label: names.display(&pubkey),
            pubkey,
        }),
        None => RecipientStage::Picking { cursor: 0 },
    };
    state.screen = Screen::ComposeMessage(ComposeMessageScreen {
        follows,
        stage,
        input: TextInput::with_placeholder("Your message..."),
        error: None,
        publishing: false,
        return_to: Box::new(return_to),
    });
}

pub(crate) fn on_note_key(
    state: &mut AppState,
    mut compose: ComposeNoteScreen,
    key: Key,
) -> Option<Command> {
    if compose.publishing {
        state.screen = Screen::ComposeNote(compose);
        return None;
    }
    let command = match key {
        Key::Esc => {
            state.screen = *compose.return_to;
            return None;
        }
        Key::Enter => submit_note(state, &mut compose),
        key => {
            if compose.input.handle(key) {
                compose.error = None;
            }
            None
        }
    };
    state.screen = Screen::ComposeNote(compose);
    command
}

fn submit_note(state: &AppState, compose: &mut ComposeNoteScreen) -> Option<Command> {
    if compose.input.is_empty() {
        compose.error = Some("Note is empty".to_string());
        return None;
    }
    let Some(keys) = state.session.keys.clone() else {
        compose.error = Some(NO_KEY.to_string());
        return None;
    };
    compose.publishing = true;
    compose.error = None;
    Some(Command::PublishNote {
        keys,
        content: compose.input.value().to_string(),
        reply: compose.reply.clone(),
    })
}

pub(crate) fn on_message_key(
    state: &mut AppState,
    mut compose: ComposeMessageScreen,
    key: Key,
) -> Option<Command> {
    if compose.publishing {
        state.screen = Screen::ComposeMessage(compose);
        return None;
    }
    let stage = std::mem::replace(&mut compose.stage, RecipientStage::Picking { cursor: 0 });
    let mut command = None;
    let next = match stage {
        RecipientStage::Picking { cursor } => {
            // One slot past the follows is manual entry.
            let last = compose.follows.len();
            match key {
                Key::Esc => {
                    state.screen = *compose.return_to;
                    return None;
                }
                k if k.is_up() => RecipientStage::Picking {
                    cursor: cursor.saturating_sub(1),
                },
                k if k.is_down() => RecipientStage::Picking {
                    cursor: (cursor + 1).min(last),
                },
                Key::Enter => match compose.follows.get(cursor) {
                    Some(recipient) => RecipientStage::Chosen(recipient.clone()),
                    None => RecipientStage::Typing(TextInput::with_placeholder("npub or hex...")),
                },
                _ => RecipientStage::Picking { cursor },
            }
        }
        RecipientStage::Typing(mut input) => match key {
            Key::Esc => {
                compose.error = None;
                RecipientStage::Picking {
                    cursor: compose.follows.len(),
                }
            }
            Key::Enter => match parse_public_key(input.value()) {
                Some(pubkey) => {
                    compose.error = None;
                    RecipientStage::Chosen(Recipient {
                        label: state.session.names.display(&pubkey),
                        pubkey,
                    })
                }
                None => {
                    compose.error = Some("Invalid pubkey".to_string());
                    RecipientStage::Typing(input)
                }
            },
            key => {
                if input.handle(key) {
                    compose.error = None;
                }
                RecipientStage::Typing(input)
            }
        },
        RecipientStage::Chosen(recipient) => match key {
            Key::Esc => {
                state.screen = *compose.return_to;
                return None;
            }
            Key::Enter => {
                command = submit_message(state, &mut compose, &recipient);
                RecipientStage::Chosen(recipient)
            }
            key => {
                if compose.input.handle(key) {
                    compose.error = None;
                }
                RecipientStage::Chosen(recipient)
            }
        },
    };
    compose.stage = next;
    state.screen = Screen::ComposeMessage(compose);
    command
}

fn submit_message(
    state: &AppState,
    compose: &mut ComposeMessageScreen,
    recipient: &Recipient,
) -> Option<Command> {
    if compose.input.is_empty() {
        compose.error = Some("Message is empty".to_string());
        return None;
    }
    let Some(keys) = state.session.keys.clone() else {
        compose.error = Some(NO_KEY.to_string());
        return None;
    };
    compose.publishing = true;
    compose.error = None;
    Some(Command::SendDirectMessage {
        keys,
        to: recipient.pubkey,
        content: compose.input.value().to_string(),
    })
}

/// Route a publish result. Success leaves the composer; failure keeps the
/// text so it can be sent again.
pub(crate) fn on_published(
    state: &mut AppState,
    origin: PublishOrigin,
    result: Result<PublishReceipt, CoreError>,
) -> Option<Command> {
    let screen = std::mem::take(&mut state.screen);
    match (screen, result) {
        (Screen::ComposeNote(compose), Ok(receipt)) if origin != PublishOrigin::DirectMessage => {
            info!(
                "published {} to {} relay(s)",
                receipt.event.id,
                receipt.accepted_count()
            );
            match origin {
                PublishOrigin::Reply { target } => {
                    state.screen = *compose.return_to;
                    let reload = state
                        .screen
                        .thread_mut()
                        .is_some_and(|thread| thread.stack.reload(&target));
                    reload.then(|| state.session.load_replies(target))
                }
                _ => {
                    state.screen = Screen::default();
                    None
                }
            }
        }
        (Screen::ComposeMessage(compose), Ok(receipt)) if origin == PublishOrigin::DirectMessage => {
            info!(
                "sent direct message {} to {} relay(s)",
                receipt.event.id,
                receipt.accepted_count()
            );
            state.screen = *compose.return_to;
            None
        }
        (Screen::ComposeNote(mut compose), Err(e)) => {
            warn!("publishing failed: {}", e);
            compose.publishing = false;
            compose.error = Some(format!("Publish failed: {}", e));
            state.screen = Screen::ComposeNote(compose);
            None
        }
        (Screen::ComposeMessage(mut compose), Err(e)) => {
            warn!("sending direct message failed: {}", e);
            compose.publishing = false;
            compose.error = Some(format!("Send failed: {}", e));
            state.screen = Screen::ComposeMessage(compose);
            None
        }
        (screen, _) => {
            debug!("discarding publish result on {}", screen.name());
            state.screen = screen;
            None
        }
    }
}
