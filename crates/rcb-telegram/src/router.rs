use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::BotCommand};

use rcb_core::{
    config::Config, messaging::port::MessagingPort, replies::COMMANDS, router::CommandRouter,
    scheduler::DailyScheduler,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<CommandRouter>,
    pub messenger: Arc<dyn MessagingPort>,
    /// Our `@username`, without the `@`. Commands naming another bot are ignored.
    pub bot_username: String,
}

/// Command list shown by Telegram clients in the `/` menu.
pub fn bot_commands() -> Vec<BotCommand> {
    COMMANDS
        .iter()
        .map(|(name, desc)| BotCommand::new(*name, *desc))
        .collect()
}

/// Connect to Telegram and process updates until the process is stopped.
///
/// Fails only during startup (e.g. an invalid token); per-update delivery
/// errors are logged and do not stop the loop.
pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    let me = bot.get_me().await?;

    if let Err(e) = bot.set_my_commands(bot_commands()).await {
        tracing::warn!(error = %e, "failed to register bot commands");
    }

    let router = Arc::new(CommandRouter::new(cfg.clone()));
    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let scheduler = DailyScheduler::new(cfg.daily_report_time, router.clone(), messenger.clone());
    scheduler.start().await;

    let state = Arc::new(AppState {
        router,
        messenger,
        bot_username: me.username().to_string(),
    });

    tracing::info!(
        bot = %me.username(),
        authorized_chat = %cfg.authorized_chat_id,
        "✅ bot is running"
    );

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    scheduler.stop().await;
    tracing::info!("bot stopped");

    Ok(())
}
