use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libviet::host::{KeyboardHook, RawKey, SimulatedField};
use libviet::{keycodes, Engine, InputScheme, VietConfig, WIRE_RESULT_SIZE};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "libviet")]
#[command(about = "Vietnamese Telex/VNI input engine driven from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input scheme, overriding the configuration file
    #[arg(long, global = true)]
    scheme: Option<InputScheme>,

    /// Configuration file (record or .toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keystrokes to compose when no subcommand is given
    input: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose keystrokes and print the resulting text
    Type {
        /// Keystrokes; `<` presses backspace
        text: String,
        /// Print one JSON result per key
        #[arg(long)]
        json: bool,
    },
    /// Compose line by line from stdin
    Repl,
    /// Inspect or create the configuration record
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the result record layout
    Layout,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the user's directory
    Init,
}

const BACKSPACE_MARKER: char = '<';

fn load_config(cli: &Cli) -> Result<VietConfig> {
    let mut config = match &cli.config {
        Some(path) => VietConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => VietConfig::load_user(),
    };
    if let Some(scheme) = cli.scheme {
        config.scheme = scheme;
    }
    Ok(config)
}

fn type_keys(config: VietConfig, keys: &str, json: bool) -> Result<()> {
    let mut field = SimulatedField::new(Engine::with_config(config));
    let mut stdout = io::stdout().lock();

    for ch in keys.chars() {
        let key = if ch == BACKSPACE_MARKER {
            RawKey::backspace()
        } else {
            RawKey::from_char(ch)
        };
        let result = field.feed_key(key);
        field.apply_result(&key, &result);
        if json {
            let line = serde_json::json!({
                "key": ch.to_string(),
                "action": result.action(),
                "backspace": result.backspace,
                "text": result.text(),
                "consumed": result.key_consumed(),
            });
            writeln!(stdout, "{}", serde_json::to_string(&line)?)?;
        }
    }

    if !json {
        writeln!(stdout, "{}", field.text())?;
    }
    Ok(())
}

fn run_repl(config: VietConfig) -> Result<()> {
    let scheme = config.scheme;
    let mut field = SimulatedField::new(Engine::with_config(config));

    println!("libviet {} REPL: type keystrokes and press Enter", scheme);
    println!("`{}` presses backspace. Ctrl-D to exit.", BACKSPACE_MARKER);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("error reading stdin")?;
        let keys = line.trim_end();
        if keys.is_empty() {
            continue;
        }
        field.reset();
        field.type_keys(keys, Some(BACKSPACE_MARKER));
        println!("{}", field.text());
    }
    Ok(())
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => VietConfig::default_path().context("no configuration directory available"),
    }
}

fn handle_config_command(cli: &Cli, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", config_path(cli)?.display());
        }
        ConfigAction::Show => {
            let config = load_config(cli)?;
            println!("record: {}", config.to_record());
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Init => {
            let config = load_config(cli)?;
            let path = config_path(cli)?;
            save_to(&config, &path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn save_to(config: &VietConfig, path: &Path) -> Result<()> {
    let saved = if path.extension().is_some_and(|ext| ext == "toml") {
        config.save_toml(path)
    } else {
        config.save(path)
    };
    saved.with_context(|| format!("failed to write {}", path.display()))
}

fn print_layout() -> Result<()> {
    let size = libviet::ffi::libviet_result_size();
    if size != WIRE_RESULT_SIZE {
        bail!("result record is {} bytes, expected {}", size, WIRE_RESULT_SIZE);
    }
    println!("WireResult: {} bytes, native endian", size);
    println!("  chars      u32[256]  offset 0");
    println!("  count      u8        offset 1024");
    println!("  action     u8        offset 1025  (0 none, 1 insert, 2 replace)");
    println!("  backspace  u8        offset 1026");
    println!("  flags      u8        offset 1027  (bit 0 key consumed)");
    println!("backspace key code: {:#04x}", keycodes::DELETE);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Type { text, json }) => type_keys(load_config(&cli)?, text, *json),
        Some(Commands::Repl) => run_repl(load_config(&cli)?),
        Some(Commands::Config { action }) => handle_config_command(&cli, action),
        Some(Commands::Layout) => print_layout(),
        None => match &cli.input {
            Some(input) => type_keys(load_config(&cli)?, input, false),
            None => run_repl(load_config(&cli)?),
        },
    }
}
