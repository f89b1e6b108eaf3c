//! Interactive seller quick dashboard.
//!
//! Reads one command per line from stdin and re-renders the session after
//! each one. Counters live only in this process.

use std::io::Write as _;
use std::process::Stdio;

use retail_client::{fetch_seller_bundle, BackendClient};
use retail_core::{SellerSession, SellerView, StockSignal, Store, StoreType};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;

/// Clipboard programs tried in order; the first one that accepts the text wins.
const CLIPBOARD_COMMANDS: [&[&str]; 3] = [
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SellerCommand {
    Next,
    Sold,
    Copy,
    Store(String),
    Stores,
    Help,
    Quit,
}

impl SellerCommand {
    /// Parses one input line. Blank lines advance, like pressing "next".
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("n" | "next") => Self::Next,
            Some("s" | "sold") => Self::Sold,
            Some("c" | "copy") => Self::Copy,
            Some("store") => Self::Store(words.next()?.to_string()),
            Some("stores" | "ls") => Self::Stores,
            Some("h" | "help" | "?") => Self::Help,
            Some("q" | "quit" | "exit") => Self::Quit,
            Some(_) => return None,
        };
        Some(command)
    }
}

/// Run the interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read. Backend failures degrade the
/// view and are logged, never returned.
pub(crate) async fn run_seller(
    client: &BackendClient,
    store: Option<&str>,
    store_type: StoreType,
) -> anyhow::Result<()> {
    let mut session = SellerSession::new();
    match client.fetch_store_list().await {
        Ok(list) => {
            session.set_stores(list.stores);
        }
        Err(e) => tracing::warn!(error = %e, "store list unavailable"),
    }

    let Some(store_id) = store
        .map(str::to_string)
        .or_else(|| session.selected_store_id().map(str::to_string))
    else {
        println!("no stores available; pass --store <STORE_ID>");
        return Ok(());
    };

    load_store(client, &mut session, &store_id, store_type).await;
    println!("{}", render(&session.view()));
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        match SellerCommand::parse(&line) {
            Some(SellerCommand::Next) => session.next_recommendation(),
            Some(SellerCommand::Sold) => session.record_sale(),
            Some(SellerCommand::Copy) => {
                if let Some(message) = session.marketing_message() {
                    if copy_to_clipboard(&message.text).await {
                        println!("copied");
                    }
                }
            }
            Some(SellerCommand::Store(id)) => {
                load_store(client, &mut session, &id, store_type).await;
            }
            Some(SellerCommand::Stores) => {
                print!("{}", render_stores(session.stores(), session.selected_store_id()));
            }
            Some(SellerCommand::Help) => print_help(),
            Some(SellerCommand::Quit) => break,
            None => println!("unknown command; type `help`"),
        }
        println!("{}", render(&session.view()));
        prompt();
    }

    Ok(())
}

async fn load_store(
    client: &BackendClient,
    session: &mut SellerSession,
    store_id: &str,
    store_type: StoreType,
) {
    let ticket = session.select_store(store_id);
    let bundle = fetch_seller_bundle(client, store_id, store_type).await;
    session.apply_bundle(&ticket, bundle);
}

pub(crate) fn render(view: &SellerView) -> String {
    let mut out = String::new();
    let store_id = view.store_id.as_deref().unwrap_or("-");
    let store_name = view.store_name.as_deref().unwrap_or(store_id);
    out.push_str(&format!("\nStore: {store_name} ({store_id})\n"));

    let Some(item) = &view.current else {
        out.push_str("No recommendations for this store.\n");
        return out;
    };

    out.push_str(&format!(
        "[{}/{}] {}{}\n",
        view.cursor + 1,
        view.total,
        item.product_name,
        if view.fallback_used { " (fallback)" } else { "" }
    ));
    let stock = match view.signal {
        Some(StockSignal::Red) => "LOW",
        Some(StockSignal::Green) => "OK",
        None => "unknown",
    };
    out.push_str(&format!("Stock: {stock}\n"));
    match view.contribution_pct {
        Some(pct) => out.push_str(&format!(
            "Expected score: {} ({pct}%)\n",
            view.expected_score
        )),
        None => out.push_str(&format!("Expected score: {}\n", view.expected_score)),
    }
    out.push_str(&format!("Sold this session: {}\n", view.sold_count));
    if let Some(message) = &view.message {
        out.push_str(&format!("{}: {}\n", message.tag.label(), message.text));
    }
    out
}

pub(crate) fn render_stores(stores: &[Store], selected: Option<&str>) -> String {
    if stores.is_empty() {
        return "no stores loaded\n".to_string();
    }
    stores
        .iter()
        .map(|store| {
            let marker = if selected == Some(store.store_id.as_str()) { '*' } else { ' ' };
            format!("{marker} {:<12}{}\n", store.store_id, store.display_name())
        })
        .collect()
}

fn print_help() {
    println!(
        "commands: next (n, enter), sold (s), copy (c), store <ID>, stores, help, quit (q)"
    );
}

fn prompt() {
    print!("> ");
    std::io::stdout().flush().ok();
}

/// Best effort: returns whether some clipboard program accepted the text.
async fn copy_to_clipboard(text: &str) -> bool {
    for argv in CLIPBOARD_COMMANDS {
        match pipe_to(argv, text).await {
            Ok(()) => return true,
            Err(e) => tracing::debug!(argv = ?argv, error = %e, "clipboard command unavailable"),
        }
    }
    false
}

pub(crate) async fn pipe_to(argv: &[&str], text: &str) -> std::io::Result<()> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| std::io::Error::other("empty clipboard command"))?;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
    }
    let status = child.wait().await?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("exited with {status}")))
    }
}
