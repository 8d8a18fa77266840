//! Reply copy. Formatted bodies use the `*bold*` Markdown subset.
//!
//! The "PC listener" referenced here is a separate program the bot never
//! talks to; these texts only tell the user what to check on their side.

use chrono::NaiveDate;

/// Commands the bot answers, in help order: `(name, description)`.
pub const COMMANDS: [(&str, &str); 3] = [
    ("start", "Show main menu"),
    ("status", "Check bot status"),
    ("help", "Show this help"),
];

/// Date format used in the daily report title, e.g. `17 Oct 2026`.
pub const REPORT_DATE_FORMAT: &str = "%d %b %Y";

pub fn welcome() -> &'static str {
    "👋 Welcome to your Instagram Automation Bot!\n\n\
     Bot is running 24/7 ✅\n\n\
     What do you want to do?"
}

pub fn status() -> &'static str {
    "✅ *Bot Status*\n\n\
     🟢 Telegram Bot: ONLINE\n\
     🖥️ PC Script: Check your PC\n\n\
     Bot is running 24/7!"
}

pub fn help() -> String {
    let commands = COMMANDS
        .iter()
        .map(|(name, desc)| format!("/{name} - {desc}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "📖 *Available Commands:*\n\n{commands}\n\n\
         🖥️ *PC Listener Commands:*\n\
         Make sure listener.py is running on your PC for full functionality!"
    )
}

pub fn run_dms_ack() -> &'static str {
    "📡 Command sent to your PC!\n\n\
     Make sure listener.py is running on your PC.\n\
     DM script will start shortly ⏳"
}

pub fn run_dms_confirmation() -> &'static str {
    "✅ DM trigger command sent!\n\n\
     Your PC listener will start instagram_dm_v6.py now."
}

pub fn dm_report() -> &'static str {
    "📊 *DM Report*\n\n\
     To see your DM log, make sure listener.py is running on your PC.\n\
     Type /report to request latest log from PC."
}

pub fn view_log() -> &'static str {
    "📋 Log file is stored on your PC.\n\n\
     Make sure listener.py is running on your PC to receive log files."
}

pub fn daily_report(today: NaiveDate) -> String {
    format!(
        "📊 *Daily Report - {}*\n\n\
         🤖 Bot is running 24/7 ✅\n\
         Check your PC listener for DM stats!\n\n\
         Keep growing! 🚀",
        today.format(REPORT_DATE_FORMAT)
    )
}
