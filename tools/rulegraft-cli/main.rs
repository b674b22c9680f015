use clap::{Parser, ValueEnum};
use rulegraft::prelude::*;
use std::fs;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;

/// The structural edits the CLI can apply.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActionCli {
    Remove,
    MoveDown,
    InsertBefore,
    Wrap,
    Replace,
}

/// Applies one structural edit to a rule's response chain
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the response chain JSON (`{ name, behaviorId, params }`)
    responses_path: String,
    /// Path to the behavior table JSON (`[{ name, behaviorId, initialParams? }]`)
    registry_path: String,

    /// The edit to apply
    #[arg(short, long, value_enum)]
    action: ActionCli,

    /// Position of the step to edit along the top-level chain
    #[arg(long, default_value_t = 0)]
    at: usize,

    /// Path to a response JSON used by `insert-before` and `replace`
    #[arg(long = "with", conflicts_with = "behavior")]
    with_path: Option<String>,

    /// Registered behavior to create for `insert-before` and `replace`
    #[arg(long)]
    behavior: Option<String>,

    /// Optional editor config JSON
    #[arg(short, long)]
    config: Option<String>,

    /// Print the edited chain as a tree before the JSON
    #[arg(short, long)]
    tree: bool,

    /// Log edit details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli);
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn run(cli: Cli) {
    // --- 1. Loading ---
    let config = match &cli.config {
        Some(path) => EditorConfig::from_json(&read_file(path))
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid config '{}': {}", path, e))),
        None => EditorConfig::default(),
    };
    let registry = BehaviorTable::from_json(&read_file(&cli.registry_path)).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Invalid behavior table '{}': {}",
            cli.registry_path, e
        ))
    });
    let head = document::from_str(&read_file(&cli.responses_path), &config)
        .unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Invalid responses '{}': {}",
                cli.responses_path, e
            ))
        })
        .unwrap_or_else(|| exit_with_error("The response chain is empty; there is nothing to edit."));

    let editor = Editor::new(Arc::new(registry))
        .with_config(config)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    // --- 2. Locate the step ---
    let target = std::iter::successors(Some(&head), |n| n.next())
        .take(editor.config().max_chain_len)
        .nth(cli.at)
        .cloned()
        .unwrap_or_else(|| {
            exit_with_error(&format!("There is no step at position {}.", cli.at))
        });
    tracing::debug!(at = cli.at, step = %target.name, action = ?cli.action, "applying edit");

    // --- 3. Apply the edit ---
    let mut replacement = None;
    let mut actions = make_response_actions(&editor, target, |change| replacement = change);
    let outcome = match cli.action {
        ActionCli::Remove => actions.remove(),
        ActionCli::MoveDown => match actions.move_down() {
            Some(move_down) => {
                move_down.run();
                Ok(())
            }
            None => exit_with_error(&format!(
                "The step at position {} is already the last one.",
                cli.at
            )),
        },
        ActionCli::InsertBefore => {
            let new_response = load_new_response(&cli, &editor);
            actions.insert_before(&new_response);
            Ok(())
        }
        ActionCli::Wrap => actions.wrap_in_condition(),
        ActionCli::Replace => {
            let new_response = load_new_response(&cli, &editor);
            actions.replace(new_response.shared());
            Ok(())
        }
    };
    drop(actions);
    outcome.unwrap_or_else(|e| exit_with_error(&format!("Edit failed: {}", e)));

    // --- 4. Splice and print ---
    let edited = splice_at(&head, cli.at, replacement);
    if let Some(edited) = &edited {
        editor
            .validate(edited)
            .unwrap_or_else(|e| exit_with_error(&format!("The edited rule is invalid: {}", e)));
    }
    if cli.tree {
        let display = DisplayResponse::optional(edited.as_deref()).with_limits(editor.config());
        println!("{}", display);
    }
    let json = document::to_string_pretty(edited.as_deref())
        .unwrap_or_else(|e| exit_with_error(&format!("Could not encode result: {}", e)));
    println!("{}", json);
}

/// Builds the response handed to `insert-before` or `replace`.
fn load_new_response(cli: &Cli, editor: &Editor) -> Response {
    if let Some(path) = &cli.with_path {
        let node = document::from_str(&read_file(path), editor.config())
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid response '{}': {}", path, e)))
            .unwrap_or_else(|| exit_with_error(&format!("Response '{}' is empty.", path)));
        return node.as_ref().clone();
    }
    if let Some(name) = &cli.behavior {
        let entry = editor
            .registry()
            .entry(name)
            .unwrap_or_else(|| exit_with_error(&format!("Behavior '{}' is not registered.", name)));
        return Response::from_entry(entry);
    }
    exit_with_error("This action needs --with <path> or --behavior <name>.")
}

/// Puts `replacement` at position `index` of the top-level chain.
fn splice_at(
    head: &Arc<Response>,
    index: usize,
    replacement: Option<Arc<Response>>,
) -> Option<Arc<Response>> {
    let prefix: Vec<&Arc<Response>> = std::iter::successors(Some(head), |n| n.next())
        .take(index)
        .collect();
    prefix
        .iter()
        .rev()
        .fold(replacement, |next, node| Some(node.relinked(next).shared()))
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
