// Meetbook - meeting, calendar, participant and attachment records
// Main entry point for the console front-end

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use meetbook::config::{ClientConfig, API_URL_VAR, DEFAULT_API_URL};
use meetbook::gateway::Gateway;
use meetbook::utils::{logging, split_ids};
use meetbook::{
    ui, App, AppResult, DraftField, HttpGateway, LinkAction, Message, RecordKind, Relation,
};

#[derive(Parser, Debug)]
#[command(name = "meetbook", about = "Manage meetings, calendars, participants and attachments")]
struct Args {
    /// Base URL of the records API
    #[arg(long, env = API_URL_VAR, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Tab to open first
    #[arg(long, default_value = "meetings")]
    tab: RecordKind,
}

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq)]
enum ConsoleCommand {
    Tab(RecordKind),
    Set(DraftField, String),
    Edit(String),
    Submit,
    Delete(String),
    Reset,
    Refresh,
    Get(String),
    Link {
        action: LinkAction,
        relation: Relation,
        owner_id: String,
        ids: Vec<String>,
    },
    Show,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  tab <meetings|calendars|participants|attachments>
  set <field> <value>      set a draft field (value may be empty)
  edit <id>                load a record into the draft
  submit                   create, or save changes when editing
  delete <id>
  reset                    clear the draft
  refresh                  reload the active tab
  get <id>                 fetch one record of the active tab
  link add|remove participants|attachments <meeting-id> <id,id,...>
  link add|remove meetings <calendar-id> <id,id,...>
  show | help | quit";

fn usage(command: &str) -> String {
    format!("Usage: {} (type 'help' for all commands)", command)
}

fn parse_line(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let require = |value: &str, form: &str| -> Result<String, String> {
        if value.is_empty() {
            Err(usage(form))
        } else {
            Ok(value.to_string())
        }
    };

    match head.to_lowercase().as_str() {
        "tab" => Ok(ConsoleCommand::Tab(rest.parse()?)),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                return Err(usage("set <field> <value>"));
            }
            Ok(ConsoleCommand::Set(field.parse()?, value.trim().to_string()))
        }
        "edit" => Ok(ConsoleCommand::Edit(require(rest, "edit <id>")?)),
        "delete" => Ok(ConsoleCommand::Delete(require(rest, "delete <id>")?)),
        "get" => Ok(ConsoleCommand::Get(require(rest, "get <id>")?)),
        "submit" => Ok(ConsoleCommand::Submit),
        "reset" => Ok(ConsoleCommand::Reset),
        "refresh" => Ok(ConsoleCommand::Refresh),
        "link" => {
            let form = "link add|remove participants|attachments|meetings <owner-id> <ids>";
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let [action, relation, owner_id, ids @ ..] = parts.as_slice() else {
                return Err(usage(form));
            };
            let action = match action.to_lowercase().as_str() {
                "add" => LinkAction::Add,
                "remove" => LinkAction::Remove,
                _ => return Err(usage(form)),
            };
            let relation: Relation = relation.parse()?;
            let ids = split_ids(&ids.join(","));
            if ids.is_empty() {
                return Err(usage(form));
            }
            Ok(ConsoleCommand::Link {
                action,
                relation,
                owner_id: owner_id.to_string(),
                ids,
            })
        }
        "show" | "" => Ok(ConsoleCommand::Show),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
    }
}

async fn run_link(
    app: &mut App<HttpGateway>,
    action: LinkAction,
    relation: Relation,
    owner_id: &str,
    ids: Vec<String>,
) -> AppResult<String> {
    app.link(action, relation, owner_id, ids).await?;
    let store = app.store();
    Ok(match store.find(relation.owner(), owner_id) {
        Some(owner) => format!("{}\n{}", ui::view_record(owner).join("\n"), ui::view_status(store)),
        None => ui::view_status(store),
    })
}

/// Apply one command. Returns false when the user asked to quit.
async fn execute(app: &mut App<HttpGateway>, command: ConsoleCommand) -> bool {
    let result: AppResult<Option<String>> = match command {
        ConsoleCommand::Quit => return false,
        ConsoleCommand::Help => Ok(Some(HELP.to_string())),
        ConsoleCommand::Show => Ok(Some(ui::render(app.store()))),
        ConsoleCommand::Tab(kind) => app.select_tab(kind).await.map(|_| Some(ui::render(app.store()))),
        ConsoleCommand::Set(field, value) => {
            app.update_draft_field(field, value);
            Ok(Some(ui::view_form(app.store())))
        }
        ConsoleCommand::Edit(id) => {
            if app.begin_edit(&id) {
                Ok(Some(ui::view_form(app.store())))
            } else {
                Ok(Some(format!("No {} record with id {}", app.store().active_tab().label(), id)))
            }
        }
        ConsoleCommand::Submit => app
            .dispatch(Message::SubmitDraft)
            .await
            .map(|_| Some(ui::render(app.store()))),
        ConsoleCommand::Delete(id) => app
            .delete_record(&id)
            .await
            .map(|_| Some(ui::render(app.store()))),
        ConsoleCommand::Reset => {
            app.reset_draft();
            Ok(Some(ui::view_form(app.store())))
        }
        ConsoleCommand::Refresh => app.refresh().await.map(|_| Some(ui::view_list(app.store()))),
        ConsoleCommand::Get(id) => {
            let kind = app.store().active_tab();
            app.gateway()
                .fetch(kind, &id)
                .await
                .map(|record| Some(ui::view_record(&record).join("\n")))
        }
        ConsoleCommand::Link {
            action,
            relation,
            owner_id,
            ids,
        } => run_link(app, action, relation, &owner_id, ids).await.map(Some),
    };

    match result {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(e) => {
            warn!("Command failed: {}", e);
            println!("Error: {}", e.to_safe_string());
        }
    }
    true
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging().context("Failed to initialize logging")?;

    let args = Args::parse();
    let config = ClientConfig::parse(&args.api_url)?;
    info!("Using records API at {}", config.api_url);

    let gateway = HttpGateway::new(config.api_url).context("Failed to build HTTP client")?;
    let mut app = App::new(gateway);

    if let Err(e) = app.select_tab(args.tab).await {
        println!("Error: {}", e.to_safe_string());
    }
    println!("{}", ui::render(app.store()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(command) => {
                if !execute(&mut app, command).await {
                    break;
                }
            }
            Err(message) => println!("{}", message),
        }
    }

    info!("Goodbye");
    Ok(())
}
