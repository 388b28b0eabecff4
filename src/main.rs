use std::io::{self, Read};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossbeam_channel::Sender;
use pam5_scope::config::ControllerConfig;
use pam5_scope::controller::{Controller, InputEvent};
use pam5_scope::line_coding::LineCodingKind;
use pam5_scope::ui::{RenderKind, print_banner};
use pam5_scope::utils::consts::*;
use pam5_scope::utils::logging::init_logging;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LineCodeArg {
    Pam5,
    Ami,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RenderArg {
    Text,
    Json,
    None,
}

#[derive(Parser)]
#[command(author, version, about = "Scrolling PAM5 / AMI line-code trace", long_about = None)]
struct Cli {
    #[arg(short, long, value_enum, default_value_t = LineCodeArg::Pam5)]
    line_code: LineCodeArg,
    /// Waveform samples kept in the window (even)
    #[arg(short, long, default_value_t = CACHE_SIZE)]
    capacity: usize,
    #[arg(long, default_value_t = TICK_PERIOD_MS)]
    tick_ms: u64,
    /// Start with timer auto-fill enabled
    #[arg(short, long)]
    auto: bool,
    /// Random symbols on timer ticks
    #[arg(short, long)]
    random: bool,
    #[arg(long, default_value_t = IDLE_ONE_IN)]
    idle_one_in: u32,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    max_ticks: Option<u64>,
    #[arg(long, value_enum, default_value_t = RenderArg::Text)]
    render: RenderArg,
}

impl Cli {
    fn to_config(&self) -> ControllerConfig {
        ControllerConfig {
            line_coding: match self.line_code {
                LineCodeArg::Pam5 => LineCodingKind::Pam5,
                LineCodeArg::Ami => LineCodingKind::Ami,
            },
            capacity: self.capacity,
            tick_period: Duration::from_millis(self.tick_ms),
            auto_fill: self.auto,
            randomize: self.random,
            idle_one_in: self.idle_one_in,
            seed: self.seed,
            max_ticks: self.max_ticks,
        }
    }

    fn render_kind(&self) -> RenderKind {
        match self.render {
            RenderArg::Text => RenderKind::Text,
            RenderArg::Json => RenderKind::Json,
            RenderArg::None => RenderKind::None,
        }
    }
}

/// Turns raw stdin reads into keys, holding back a multi-byte character
/// split across two reads until the rest of it arrives.
#[derive(Default)]
struct KeyDecoder {
    tail: Vec<u8>,
}

impl KeyDecoder {
    fn push(&mut self, bytes: &[u8]) -> Vec<char> {
        self.tail.extend_from_slice(bytes);
        let mut keys = Vec::new();
        loop {
            match std::str::from_utf8(&self.tail) {
                Ok(text) => {
                    keys.extend(text.chars());
                    self.tail.clear();
                    return keys;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    keys.extend(String::from_utf8_lossy(&self.tail[..valid]).chars());
                    match e.error_len() {
                        // incomplete sequence at the end; wait for the next read
                        None => {
                            self.tail.drain(..valid);
                            return keys;
                        }
                        Some(bad) => {
                            tracing::debug!("Dropping {} invalid input bytes", bad);
                            self.tail.drain(..valid + bad);
                        }
                    }
                }
            }
        }
    }
}

/// Forward stdin characters as key events until EOF.
fn spawn_key_reader(tx: Sender<InputEvent>) {
    std::thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut chunk = [0u8; 256];
        let mut decoder = KeyDecoder::default();
        loop {
            match stdin.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    for key in decoder.push(&chunk[..n]) {
                        if tx.send(InputEvent::Key(key)).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("stdin read failed: {}", e);
                    break;
                }
            }
        }
        tracing::debug!("stdin closed");
        let _ = tx.send(InputEvent::EndOfInput);
    });
}

fn main() {
    let cli = Cli::parse();
    init_logging();
    print_banner();

    let config = cli.to_config();
    let mut controller = match Controller::new(config, cli.render_kind().create()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let (tx, rx) = crossbeam_channel::unbounded();

    let quit_tx = tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = quit_tx.send(InputEvent::Quit);
    }) {
        tracing::warn!("Failed to install Ctrl-C handler: {}", e);
    }

    spawn_key_reader(tx);

    if let Err(e) = controller.run(rx) {
        tracing::error!("Session ended: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Exiting gracefully...");
}
