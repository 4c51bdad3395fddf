//! Simple CLI for exercising the B-tree.
//!
//! Reads one command per line from stdin against an in-memory tree.
//!
//! Usage:
//!   btree_cli [order]
//!
//! Commands:
//!   put <key> <value>   get <key>   remove <key>
//!   keys   values   size   height   min   max
//!   floor <key>   ceiling <key>
//!   dump   tree   json   load <json>   clear   check

use btree_map::{BTree, DEFAULT_ORDER};
use std::env;
use std::io::{self, BufRead, Write};
use std::process::exit;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn install_tracing_subscriber() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("btree_map=info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_order(raw: &str) -> usize {
    match raw.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("ERROR: Invalid order: {}", raw);
            exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: btree_cli [order]");
    eprintln!("Commands (one per line on stdin):");
    eprintln!("  put <key> <value>   - Insert or update a key-value pair");
    eprintln!("  get <key>           - Get value for a key");
    eprintln!("  remove <key>        - Remove a key");
    eprintln!("  keys | values       - List keys or values in order");
    eprintln!("  size | height       - Show entry count or tree height");
    eprintln!("  min | max           - Show the smallest or largest entry");
    eprintln!("  floor <key>         - Largest entry at or below key");
    eprintln!("  ceiling <key>       - Smallest entry at or above key");
    eprintln!("  dump                - Print keys indented by depth");
    eprintln!("  tree                - Print the node structure as JSON");
    eprintln!("  json                - Encode the tree as JSON");
    eprintln!("  load <json>         - Replace contents from a JSON object");
    eprintln!("  clear               - Remove every entry");
    eprintln!("  check               - Verify structural invariants");
}

fn print_entry(out: &mut impl Write, entry: Option<(&String, &String)>) -> io::Result<()> {
    match entry {
        Some((key, value)) => writeln!(out, "{} -> {}", key, value),
        None => writeln!(out, "NOT_FOUND"),
    }
}

/// Run a single command line against the tree
fn execute(tree: &mut BTree<String, String>, line: &str, out: &mut impl Write) -> io::Result<()> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match command {
        "" => Ok(()),

        "put" => {
            if args.len() != 2 {
                return writeln!(out, "ERROR: Usage: put <key> <value>");
            }
            tree.put(args[0].to_string(), args[1].to_string());
            writeln!(out, "OK")
        }

        "get" => {
            if args.len() != 1 {
                return writeln!(out, "ERROR: Usage: get <key>");
            }
            match tree.get(&args[0].to_string()) {
                Some(value) => writeln!(out, "{}", value),
                None => writeln!(out, "NOT_FOUND"),
            }
        }

        "remove" | "delete" => {
            if args.len() != 1 {
                return writeln!(out, "ERROR: Usage: remove <key>");
            }
            match tree.remove(&args[0].to_string()) {
                Some(_) => writeln!(out, "DELETED"),
                None => writeln!(out, "NOT_FOUND"),
            }
        }

        "keys" => {
            let keys: Vec<&str> = tree.keys().into_iter().map(String::as_str).collect();
            writeln!(out, "{}", keys.join(" "))
        }

        "values" => {
            let values: Vec<&str> = tree.values().into_iter().map(String::as_str).collect();
            writeln!(out, "{}", values.join(" "))
        }

        "size" => writeln!(out, "{}", tree.len()),

        "height" => writeln!(out, "{}", tree.height()),

        "min" => print_entry(out, tree.min()),

        "max" => print_entry(out, tree.max()),

        "floor" | "ceiling" => {
            if args.len() != 1 {
                return writeln!(out, "ERROR: Usage: {} <key>", command);
            }
            let key = args[0].to_string();
            let entry = if command == "floor" {
                tree.floor(&key)
            } else {
                tree.ceiling(&key)
            };
            print_entry(out, entry)
        }

        "dump" => write!(out, "{}", tree),

        "tree" => match tree.export() {
            Some(root) => match serde_json::to_string_pretty(&root) {
                Ok(json) => writeln!(out, "{}", json),
                Err(e) => writeln!(out, "ERROR: {}", e),
            },
            None => writeln!(out, "null"),
        },

        "json" => match tree.to_json() {
            Ok(bytes) => writeln!(out, "{}", String::from_utf8_lossy(&bytes)),
            Err(e) => writeln!(out, "ERROR: {}", e),
        },

        "load" => match tree.from_json(rest.as_bytes()) {
            Ok(()) => writeln!(out, "OK"),
            Err(e) => writeln!(out, "ERROR: {}", e),
        },

        "clear" => {
            tree.clear();
            writeln!(out, "OK")
        }

        "check" => match tree.check_invariants() {
            Ok(()) => writeln!(out, "OK"),
            Err(e) => writeln!(out, "ERROR: {}", e),
        },

        _ => writeln!(out, "ERROR: Unknown command: {}", command),
    }
}

fn main() {
    install_tracing_subscriber();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print_usage();
        return;
    }

    let order = match (args.get(1), env::var("BTREE_ORDER")) {
        (Some(raw), _) => parse_order(raw),
        (None, Ok(raw)) => parse_order(&raw),
        (None, Err(_)) => DEFAULT_ORDER,
    };

    let mut tree = match BTree::new(order) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit(1);
        }
    };
    info!(order, "btree_cli.start");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let result = line.and_then(|line| execute(&mut tree, &line, &mut out));
        if let Err(e) = result {
            eprintln!("ERROR: {}", e);
            exit(1);
        }
    }

    if let Err(e) = out.flush() {
        eprintln!("Warning: Failed to flush: {}", e);
    }
    info!(entries = tree.len(), "btree_cli.done");
}
