//! pagemark interactive CLI
//!
//! Opens a page, prints it as line-oriented markdown, and accepts read /
//! click / fill / select commands against the numbered elements. Useful for
//! trying out the page representation without an agent attached.

use anyhow::Context;
use clap::Parser;
use pagemark::{LaunchOptions, PageSession};
use serde_json::json;
use std::io::{BufRead, Write as _};

#[derive(Parser)]
#[command(name = "pagemark")]
#[command(version)]
#[command(about = "Browse a page as line-oriented markdown", long_about = None)]
struct Cli {
    /// URL to open on startup
    url: Option<String>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<String>,

    /// Cap on lines rendered per page (0 = no cap)
    #[arg(long, default_value = "0")]
    max_lines: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = LaunchOptions::new().headless(!cli.headed);
    if let Some(path) = &cli.executable_path {
        options = options.chrome_path(path);
    }

    let session = PageSession::launch(options).context("launching browser")?;

    if let Some(url) = &cli.url {
        run_tool(&session, "navigate", json!({ "url": url, "max_lines": cli.max_lines }));
    }

    println!("Commands: open <url> | read [from [to]] | refresh | click <id> [double] | fill <id> <text> | submit <id> <text> | select <id> <option> | quit");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut parts = line.trim().splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();

        match command {
            "" => {}
            "quit" | "exit" => break,
            "open" => run_tool(&session, "navigate", json!({ "url": rest, "max_lines": cli.max_lines })),
            "refresh" => {
                run_tool(&session, "read_page", json!({ "refresh": true }));
            }
            "read" => {
                let mut bounds = rest.split_whitespace();
                let from: usize = bounds.next().and_then(|v| v.parse().ok()).unwrap_or(0);
                let to: usize = bounds.next().and_then(|v| v.parse().ok()).unwrap_or(0);
                run_tool(&session, "read_page", json!({ "from_line": from, "to_line": to }));
            }
            "click" => {
                let mut args = rest.split_whitespace();
                match args.next().and_then(|v| v.parse::<usize>().ok()) {
                    Some(id) => {
                        let double = args.next() == Some("double");
                        run_tool(&session, "click", json!({ "id": id, "double": double }));
                    }
                    None => println!("usage: click <id> [double]"),
                }
            }
            "fill" | "submit" => {
                let mut args = rest.splitn(2, ' ');
                let id = args.next().and_then(|v| v.parse::<usize>().ok());
                match (id, args.next()) {
                    (Some(id), Some(text)) => run_tool(
                        &session,
                        "fill",
                        json!({ "id": id, "value": text, "press_enter": command == "submit" }),
                    ),
                    _ => println!("usage: {} <id> <text>", command),
                }
            }
            "select" => {
                let mut args = rest.splitn(2, ' ');
                let id = args.next().and_then(|v| v.parse::<usize>().ok());
                match (id, args.next()) {
                    (Some(id), Some(option)) => {
                        run_tool(&session, "select", json!({ "id": id, "option_text": option }))
                    }
                    _ => println!("usage: select <id> <option text>"),
                }
            }
            other => println!("unknown command: {}", other),
        }
    }

    session.close().ok();
    Ok(())
}

/// Execute a tool and print whatever the agent would see
fn run_tool(session: &PageSession, name: &str, params: serde_json::Value) {
    match session.execute_tool(name, params) {
        Ok(result) => {
            let page = result
                .data
                .as_ref()
                .and_then(|d| d.get("page").and_then(|p| p.as_str()))
                .map(str::to_string);
            println!("{}", page.unwrap_or_else(|| result.message()));
        }
        Err(e) => println!("{}", e),
    }
}
