use std::io::Read;
use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::http_store::HttpStore;
use crate::io::remote::RemoteStore;
use crate::model::config::ClientConfig;
use crate::model::item::{ActionItem, Priority};
use crate::model::query::{FilterOptions, SortOptions};
use crate::ops::controller::{ListController, Outcome};
use crate::ops::{stats, validate, view};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Load the config named on the command line (or the default one)
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig, config_io::ConfigError> {
    config_io::load_config(cli.config.as_deref().map(Path::new), cli.api_url.as_deref())
}

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let config = resolve_config(&cli)?;

    let Some(cmd) = cli.command else {
        return Err("no command given (try `ib --help`)".into());
    };

    match cmd {
        // Commands that never touch the item list
        Commands::Config => cmd_config(&config, json),
        Commands::Health => cmd_health(&HttpStore::from_config(&config.server), json),

        // Analysis needs no existing list; the controller reloads after it
        Commands::Analyze(args) => {
            let mut controller = ListController::new(HttpStore::from_config(&config.server));
            cmd_analyze(&mut controller, args, json)
        }

        cmd => {
            let mut controller = ListController::new(HttpStore::from_config(&config.server));
            controller
                .load_all()
                .map_err(|e| format!("could not load action items: {}", e))?;
            match cmd {
                // Read commands
                Commands::List(args) => cmd_list(&controller, args, json),
                Commands::Show(args) => cmd_show(&controller, args, json),
                Commands::Stats => cmd_stats(&controller, json),

                // Write commands
                Commands::Toggle(args) => cmd_toggle(&mut controller, args),
                Commands::Priority(args) => cmd_priority(&mut controller, args),
                Commands::Delete(args) => cmd_delete(&mut controller, args),

                Commands::Config | Commands::Health | Commands::Analyze(_) => {
                    unreachable!("handled above")
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find the item an id argument refers to. An exact id wins; otherwise the
/// argument must be a prefix of exactly one id.
pub fn resolve_id<'a>(items: &'a [ActionItem], arg: &str) -> Result<&'a ActionItem, String> {
    if let Some(item) = items.iter().find(|i| i.id == arg) {
        return Ok(item);
    }
    if arg.is_empty() {
        return Err("empty action item id".to_string());
    }
    let matches: Vec<&ActionItem> = items.iter().filter(|i| i.id.starts_with(arg)).collect();
    match matches.as_slice() {
        [] => Err(format!("action item not found: {}", arg)),
        [only] => Ok(only),
        many => Err(format!(
            "ambiguous id '{}' matches {} action items: {}",
            arg,
            many.len(),
            many.iter()
                .map(|i| short_id(&i.id))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

/// Turn a failed mutation into the controller's error message
fn check_outcome<S: RemoteStore>(controller: &ListController<S>, outcome: Outcome) -> CmdResult {
    match outcome {
        Outcome::Applied { .. } => Ok(()),
        Outcome::Skipped => Err("action item no longer exists".into()),
        Outcome::Failed => Err(controller.error().unwrap_or("request failed").into()),
    }
}

fn read_transcript(file: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    match file {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path, e).into()),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list<S: RemoteStore>(controller: &ListController<S>, args: ListArgs, json: bool) -> CmdResult {
    let filter = FilterOptions {
        status: args.status.map(Into::into),
        priority: args.priority.map(Into::into),
        search: args.search.clone(),
    };
    let sort = SortOptions::new(args.sort.into(), args.direction());
    let items = controller.items();
    let visible = view::derive_view(items, &filter, sort);

    if json {
        let output = ListJson {
            total: items.len(),
            shown: visible.len(),
            filter: &filter,
            sort,
            items: visible,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No action items yet. Analyze a transcript with `ib analyze`.");
        return Ok(());
    }
    if visible.is_empty() {
        println!("{}", format_list_summary(0, items.len(), &filter));
        println!("No action items match the current filters.");
        return Ok(());
    }
    for item in &visible {
        println!("{}", format_item_line(item));
    }
    println!();
    println!(
        "{}  sorted by {}",
        format_list_summary(visible.len(), items.len(), &filter),
        sort.label()
    );
    Ok(())
}

fn cmd_show<S: RemoteStore>(controller: &ListController<S>, args: IdArg, json: bool) -> CmdResult {
    let item = resolve_id(controller.items(), &args.id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        for line in format_item_detail(item) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats<S: RemoteStore>(controller: &ListController<S>, json: bool) -> CmdResult {
    let progress = stats::progress(controller.items());
    let priorities = stats::priority_counts(controller.items());
    if json {
        let output = StatsJson {
            progress,
            priorities,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in format_stats(&progress, &priorities) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_health(store: &HttpStore, json: bool) -> CmdResult {
    let health = store
        .health()
        .map_err(|e| format!("{} is not reachable: {}", store.base_url(), e))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        println!("url: {}", store.base_url());
        for line in format_health(&health) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_config(config: &ClientConfig, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_analyze<S: RemoteStore>(
    controller: &mut ListController<S>,
    args: AnalyzeArgs,
    json: bool,
) -> CmdResult {
    let text = read_transcript(args.file.as_deref())?;
    let transcript = validate::validate_transcript(&text)?;

    let outcome = controller.submit_transcript(transcript);
    check_outcome(controller, outcome)?;
    let created = match outcome {
        Outcome::Applied { affected } => affected,
        _ => 0,
    };

    if json {
        let output = AnalyzeJson {
            created,
            total: controller.items().len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "Created {} action item{}",
            created,
            if created == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn cmd_toggle<S: RemoteStore>(controller: &mut ListController<S>, args: IdArg) -> CmdResult {
    let (id, new_status) = {
        let item = resolve_id(controller.items(), &args.id)?;
        (item.id.clone(), item.status.flipped())
    };
    let outcome = controller.toggle_complete(&id);
    check_outcome(controller, outcome)?;
    println!("{} \u{2192} {}", short_id(&id), new_status.as_str());
    Ok(())
}

fn cmd_priority<S: RemoteStore>(controller: &mut ListController<S>, args: PriorityArgs) -> CmdResult {
    let id = resolve_id(controller.items(), &args.id)?.id.clone();
    let priority: Priority = args.priority.into();
    let outcome = controller.set_priority(&id, priority);
    check_outcome(controller, outcome)?;
    println!("{} \u{2192} {}", short_id(&id), priority.as_str());
    Ok(())
}

fn cmd_delete<S: RemoteStore>(controller: &mut ListController<S>, args: IdArg) -> CmdResult {
    let id = resolve_id(controller.items(), &args.id)?.id.clone();
    let outcome = controller.delete_item(&id);
    check_outcome(controller, outcome)?;
    println!("Deleted {}", short_id(&id));
    Ok(())
}
