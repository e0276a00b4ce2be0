//! Demo trading-bot menu.
//!
//! A small menu tree built only from the dialog primitives: a main menu with
//! balance, order management, bot control and analytics branches. Account
//! state lives in the conversation, so a restart opens a fresh account.

use std::fmt;

use futures::FutureExt;
use parley_app::Script;
use parley_core::{Dialog, Flow, MenuOption, Notice, ScriptFuture};

/// Main menu prompt.
pub const MAIN_MENU: &str = "➡ Main menu:";

/// Demo script for the console binary.
#[derive(Debug, Clone, Copy)]
pub struct TradingMenu {
    /// USDT available when a conversation starts.
    pub starting_balance: u64,
}

impl Default for TradingMenu {
    fn default() -> Self {
        Self { starting_balance: 1_000 }
    }
}

impl Script for TradingMenu {
    fn root(&self, dialog: Dialog) -> ScriptFuture {
        run(dialog, Account::new(self.starting_balance)).boxed_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Order {
    side: Side,
    usdt: u64,
}

/// Per-conversation account. Position is tracked at cost, in USDT.
#[derive(Debug)]
struct Account {
    usdt: u64,
    position: u64,
    orders: Vec<Order>,
    bot_running: bool,
}

impl Account {
    fn new(usdt: u64) -> Self {
        Self { usdt, position: 0, orders: Vec::new(), bot_running: false }
    }

    fn available(&self, side: Side) -> u64 {
        match side {
            Side::Buy => self.usdt,
            Side::Sell => self.position,
        }
    }

    fn execute(&mut self, order: Order) {
        match order.side {
            Side::Buy => {
                self.usdt -= order.usdt;
                self.position += order.usdt;
            },
            Side::Sell => {
                self.position -= order.usdt;
                self.usdt += order.usdt;
            },
        }
        self.orders.push(order);
    }
}

async fn run(dialog: Dialog, mut account: Account) -> Flow<()> {
    loop {
        main_menu(&dialog, &mut account).await?;
    }
}

async fn main_menu(dialog: &Dialog, account: &mut Account) -> Flow<()> {
    let choice = dialog
        .select_option(
            MAIN_MENU,
            [
                vec![
                    MenuOption::keyed("💵 Show balance", "bal"),
                    MenuOption::keyed("📔 Manage orders", "orders"),
                ],
                vec![
                    MenuOption::keyed("🤖 Bot trading", "bot"),
                    MenuOption::keyed("📈 Analytics", "analytics"),
                ],
            ],
            false,
        )
        .await?;

    match choice.as_named() {
        Some("bal") => dialog.notify(format!(
            "💵 Balance: {} USDT free, {} USDT in BTC",
            account.usdt, account.position
        )),
        Some("orders") => manage_orders(dialog, account).await?,
        Some("bot") => bot_trading(dialog, account).await?,
        Some("analytics") => analytics(dialog, account),
        _ => tracing::warn!(%choice, "main menu option without handler"),
    }
    Ok(())
}

async fn manage_orders(dialog: &Dialog, account: &mut Account) -> Flow<()> {
    loop {
        let choice = dialog
            .select_option(
                "📔 Orders:",
                [
                    vec![
                        MenuOption::keyed("🟢 Buy BTC", "buy"),
                        MenuOption::keyed("🔴 Sell BTC", "sell"),
                    ],
                    vec![
                        MenuOption::keyed("📜 History", "history"),
                        MenuOption::keyed("⬅ Back", "back"),
                    ],
                ],
                true,
            )
            .await?;

        match choice.as_named() {
            Some("buy") => place_order(dialog, account, Side::Buy).await?,
            Some("sell") => place_order(dialog, account, Side::Sell).await?,
            Some("history") => dialog.notify(history(&account.orders)),
            _ => return Ok(()),
        }
    }
}

async fn place_order(dialog: &Dialog, account: &mut Account, side: Side) -> Flow<()> {
    let available = account.available(side);
    if available == 0 {
        dialog.notify(format!("🤷 Nothing to {side}."));
        return Ok(());
    }

    dialog.notify(
        Notice::new(format!("{side} for how many USDT? (1-{available})")).hide_keyboard().flush(),
    );
    let usdt = dialog
        .ask_until_valid(
            |text| text.parse::<u64>().ok().filter(|amount| (1..=available).contains(amount)),
            &format!("😡 Send a whole number between 1 and {available}."),
        )
        .await?;

    if dialog.confirm(&format!("{side} {usdt} USDT of BTC")).await? {
        account.execute(Order { side, usdt });
        dialog.notify(format!("✅ {side} order filled: {usdt} USDT"));
    } else {
        dialog.notify("🚫 Order cancelled");
    }
    Ok(())
}

async fn bot_trading(dialog: &Dialog, account: &mut Account) -> Flow<()> {
    let (prompt, yes, no) = if account.bot_running {
        ("Stop the trading bot?", "Stop it", "Keep running")
    } else {
        ("Start the trading bot?", "Start it", "Keep it off")
    };

    if dialog.confirm_with(prompt, yes, no).await? {
        account.bot_running = !account.bot_running;
    }

    let status = if account.bot_running { "running" } else { "stopped" };
    dialog.notify(format!("🤖 Bot is {status}."));
    Ok(())
}

fn analytics(dialog: &Dialog, account: &Account) {
    let total = |side: Side| -> u64 {
        account.orders.iter().filter(|order| order.side == side).map(|order| order.usdt).sum()
    };
    let (bought, sold) = (total(Side::Buy), total(Side::Sell));

    dialog.notify(format!(
        "📈 {} orders, {bought} USDT bought, {sold} USDT sold",
        account.orders.len()
    ));
}

fn history(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "📜 No orders yet.".to_owned();
    }

    let lines: Vec<_> = orders
        .iter()
        .enumerate()
        .map(|(index, order)| format!("{}. {} {} USDT", index + 1, order.side, order.usdt))
        .collect();
    format!("📜 Orders:\n{}", lines.join("\n"))
}
