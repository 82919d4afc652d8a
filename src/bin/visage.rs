use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use visage::{
    Animator, EmoteSelector, ExpressionSelector, EyeSelector, FrameSink, JsonLinesSink, Millis,
    MouthSelector, SessionConfig, Timestamp,
};

#[derive(Parser, Debug)]
#[command(name = "visage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a session and print one JSON line per distinct frame.
    Play(PlayArgs),
    /// List every selector with its label.
    List,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Session config JSON. Flags below override its selections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Jitter seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Eye animation (none, blink, leftTwitch).
    #[arg(long)]
    eye: Option<String>,

    /// Mouth animation (none, happyTalk, sadTalk, normalTalk).
    #[arg(long)]
    mouth: Option<String>,

    /// Expression, optionally suffixed with `Talk`.
    #[arg(long)]
    expression: Option<String>,

    /// Emote (none, sleep, surprise, question).
    #[arg(long)]
    emote: Option<String>,

    /// Session length in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    duration_ms: u64,

    /// Sleep between emissions instead of running in virtual time.
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Output path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::List => cmd_list(),
    }
}

fn session_config(args: &PlayArgs) -> anyhow::Result<SessionConfig> {
    let mut cfg = match &args.config {
        Some(path) => SessionConfig::from_path(path)
            .with_context(|| format!("load session config '{}'", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(eye) = &args.eye {
        cfg.eye = EyeSelector::parse(eye)?;
    }
    if let Some(mouth) = &args.mouth {
        cfg.mouth = MouthSelector::parse(mouth)?;
    }
    if let Some(expression) = &args.expression {
        cfg.expression = ExpressionSelector::parse(expression)?;
    }
    if let Some(emote) = &args.emote {
        cfg.emote = EmoteSelector::parse(emote)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = session_config(&args)?;
    let mut animator = Animator::from_config(&cfg)?;

    let out: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("create output '{}'", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut sink = JsonLinesSink::new(BufWriter::new(out));
    sink.begin(animator.static_avatar())?;

    let end = Timestamp(args.duration_ms);
    if args.realtime {
        loop {
            animator.flush(&mut sink)?;
            sink.flush()?;
            let target = animator.next_due().map_or(end, |due| due.min(end));
            std::thread::sleep(target.since(animator.now()).into());
            animator.advance_to(target)?;
            if target == end {
                break;
            }
        }
    } else {
        animator.advance_to(end)?;
    }
    animator.flush(&mut sink)?;
    sink.end()?;

    tracing::info!(
        frames = sink.lines(),
        duration = %Millis(args.duration_ms),
        "session finished"
    );
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "eye:")?;
    for s in EyeSelector::ALL {
        writeln!(out, "  {:<22} {}", s.as_str(), s.label())?;
    }
    writeln!(out, "mouth:")?;
    for s in MouthSelector::ALL {
        writeln!(out, "  {:<22} {}", s.as_str(), s.label())?;
    }
    writeln!(out, "expression:")?;
    for s in ExpressionSelector::menu() {
        let name = s.to_string();
        writeln!(out, "  {name:<22} {}", s.label())?;
    }
    writeln!(out, "emote:")?;
    for s in EmoteSelector::ALL {
        writeln!(out, "  {:<22} {}", s.as_str(), s.label())?;
    }
    Ok(())
}
