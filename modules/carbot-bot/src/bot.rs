use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use carbot_core::{handler, BotDeps, Reply};
use telegram::{TelegramClient, Update};

const WELCOME_TEXT: &str = "Welcome! Use /car [amount] to find a car around that price.";

/// Long-poll window for getUpdates.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Cap on concurrently handled commands; a burst of updates must not
/// overwhelm either upstream service.
const MAX_IN_FLIGHT: usize = 8;

/// Pause before re-polling after a transport error.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

pub async fn run(tg: TelegramClient, deps: BotDeps) -> Result<()> {
    let tg = Arc::new(tg);
    let limiter = Arc::new(Semaphore::new(MAX_IN_FLIGHT));

    // Drop whatever accumulated while the bot was down; stale commands
    // should not be answered minutes later.
    let mut offset = drop_pending_updates(&tg).await?;
    info!("Carbot polling for updates");

    loop {
        let updates = match tg.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let permit = limiter.clone().acquire_owned().await?;
            let tg = tg.clone();
            let deps = deps.clone();
            tokio::spawn(async move {
                let _permit = permit;
                handle_update(&tg, &deps, update).await;
            });
        }
    }
}

/// Fast-forward past the pending backlog; returns the offset to poll from.
async fn drop_pending_updates(tg: &TelegramClient) -> Result<Option<i64>> {
    let pending = tg.get_updates(Some(-1), 0).await?;
    Ok(pending.last().map(|u| u.update_id + 1))
}

async fn handle_update(tg: &TelegramClient, deps: &BotDeps, update: Update) {
    let Some(message) = update.message else { return };
    let Some(text) = message.text else { return };
    let Some((command, args)) = parse_command(&text) else {
        return;
    };

    let reply = match command {
        "/start" => Reply::Text(WELCOME_TEXT.to_string()),
        "/car" => handler::handle(deps, &args).await,
        _ => return,
    };

    if let Err(e) = send_reply(tg, message.chat.id, &reply).await {
        error!(chat_id = message.chat.id, error = %e, "failed to send reply");
    }
}

/// Split a message into a command and its arguments. Returns `None` for
/// non-command text. A `/car@BotName` mention resolves to `/car`.
fn parse_command(text: &str) -> Option<(&str, Vec<String>)> {
    let mut parts = text.split_whitespace();
    let first = parts.next()?;
    if !first.starts_with('/') {
        return None;
    }
    let command = first.split('@').next().unwrap_or(first);
    Some((command, parts.map(str::to_string).collect()))
}

async fn send_reply(tg: &TelegramClient, chat_id: i64, reply: &Reply) -> telegram::Result<()> {
    match reply {
        Reply::Text(text) => {
            tg.send_message(chat_id, text).await?;
        }
        Reply::Photo { url, caption } => {
            tg.send_photo_url(chat_id, url, caption.as_deref()).await?;
        }
        Reply::PhotoFile { path } => {
            tg.send_photo_file(chat_id, path).await?;
        }
    }
    Ok(())
}
