// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the TUI starts. Subcommands run headless:
// - list [--json]: Print the navigation outline
// - show <id>: Print one section's markdown
// - config --show | --path | --reset: Manage the config file

use crate::config::{Config, VERSION};
use crate::content::ContentRegistry;
use crate::nav::NavigationGroup;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};

/// Terminal browser for the built-in REST API documentation
#[derive(Parser, Debug)]
#[command(name = "apidocs")]
#[command(version = VERSION)]
#[command(about = "Terminal browser for REST API documentation", long_about = None)]
pub struct Cli {
    /// Section to open at startup (overrides config)
    #[arg(long, short)]
    pub section: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Print the navigation outline
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a section's title and markdown body
    Show {
        /// Section id, e.g. "users"
        id: String,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Run a headless subcommand
pub fn run_command(command: Commands, config: &Config) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let registry = ContentRegistry::builtin();

    match command {
        Commands::List { json } => print_outline(&mut out, crate::nav::NAVIGATION, registry, json),
        Commands::Show { id } => print_section(&mut out, registry, &id),
        Commands::Config { show, path, reset } => {
            if path {
                writeln!(out, "{}", Config::config_path().display())?;
            } else if show {
                print_config(&mut out, config)?;
            } else if reset {
                handle_config_reset(&mut out)?;
            } else {
                // No flag provided, show help
                writeln!(out, "Usage: apidocs config [--show|--path|--reset]")?;
                writeln!(out)?;
                writeln!(out, "Options:")?;
                writeln!(out, "  --show    Display effective configuration")?;
                writeln!(out, "  --path    Show config file path")?;
                writeln!(out, "  --reset   Reset config file to defaults")?;
            }
            Ok(())
        }
    }
}

/// Print groups and their entries; entries without a page are marked
pub fn print_outline(
    out: &mut impl Write,
    groups: &[NavigationGroup],
    registry: &ContentRegistry,
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, groups).context("Failed to encode outline")?;
        writeln!(out)?;
        return Ok(());
    }

    for group in groups {
        writeln!(out, "{} {}", group.icon, group.title)?;
        for entry in group.entries {
            if registry.contains(entry.id) {
                writeln!(out, "  {:<16} {}", entry.id, entry.title)?;
            } else {
                writeln!(
                    out,
                    "  {:<16} {}  (shows {})",
                    entry.id,
                    entry.title,
                    registry.default_id()
                )?;
            }
        }
    }
    Ok(())
}

/// Print a section as markdown; unknown ids fall back to the default section
pub fn print_section(out: &mut impl Write, registry: &ContentRegistry, id: &str) -> Result<()> {
    if !registry.contains(id) {
        eprintln!(
            "Unknown section '{}', showing '{}'",
            id,
            registry.default_id()
        );
    }
    let descriptor = registry.lookup(id);
    writeln!(out, "# {}", descriptor.title)?;
    writeln!(out)?;
    writeln!(out, "{}", descriptor.body.trim_end())?;
    Ok(())
}

fn print_config(out: &mut impl Write, config: &Config) -> Result<()> {
    writeln!(out, "# Effective configuration (env > file > defaults)")?;
    writeln!(out)?;
    write!(out, "{}", config.to_toml())?;
    writeln!(out)?;
    writeln!(out, "# Config dir: {}", config.config_dir.display())?;

    let path = Config::config_path();
    if path.exists() {
        writeln!(out, "# Source: {}", path.display())?;
    } else {
        writeln!(out, "# Source: defaults (no config file)")?;
    }
    Ok(())
}

fn handle_config_reset(out: &mut impl Write) -> Result<()> {
    let path = Config::config_path();

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            writeln!(out, "Aborted.")?;
            return Ok(());
        }
    }

    let path = Config::reset()?;
    writeln!(out, "Config reset to defaults: {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NAVIGATION;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::parse_from(["apidocs", "show", "users"]);
        assert_eq!(
            cli.command,
            Some(Commands::Show {
                id: "users".to_string()
            })
        );

        let cli = Cli::parse_from(["apidocs", "--section", "errors"]);
        assert_eq!(cli.section.as_deref(), Some("errors"));
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["apidocs", "list", "--json"]);
        assert_eq!(cli.command, Some(Commands::List { json: true }));
    }

    #[test]
    fn outline_marks_entries_without_pages() {
        let registry = ContentRegistry::builtin();
        let text = render(|out| print_outline(out, NAVIGATION, registry, false));
        let users = text.lines().find(|l| l.contains("users")).unwrap();
        assert!(!users.contains("(shows"));
        let posts = text.lines().find(|l| l.contains("posts")).unwrap();
        assert!(posts.contains("(shows introduction)"));
    }

    #[test]
    fn outline_json_lists_every_group() {
        let registry = ContentRegistry::builtin();
        let text = render(|out| print_outline(out, NAVIGATION, registry, true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let groups = value.as_array().unwrap();
        assert_eq!(groups.len(), NAVIGATION.len());
        assert_eq!(groups[0]["title"], "Getting Started");
        assert_eq!(groups[0]["entries"][0]["id"], "introduction");
    }

    #[test]
    fn show_falls_back_to_introduction() {
        let registry = ContentRegistry::builtin();
        let text = render(|out| print_section(out, registry, "nope"));
        let intro = registry.lookup("introduction");
        assert!(text.starts_with(&format!("# {}", intro.title)));
    }
}
