use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;
use thymia_affect::{
    AffectSnapshot, CharacterManager, DecayFunction, Eec, EmotionMaintenanceEvent,
    ExponentialDecay, LinearDecay, MoodObserver,
};
use thymia_core::{EmotionType, Mood, PadEmotion, ThymiaConfig};
use tokio::sync::broadcast;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "thymia.toml")]
    config: String,

    /// Override the character name from the config
    #[arg(short = 'n', long)]
    character: Option<String>,

    /// Decay strategy: "linear" or "exponential"
    #[arg(short, long, default_value = "linear")]
    decay: String,

    /// Print every mood snapshot as it is pushed
    #[arg(long)]
    watch: bool,
}

/// Prints pushed snapshots as single log lines.
struct StatusPrinter;

impl MoodObserver for StatusPrinter {
    fn on_mood_changed(&self, snapshot: &AffectSnapshot) {
        info!(
            character = %snapshot.character,
            mood = %snapshot.current_mood.describe(),
            "P={:+.2} A={:+.2} D={:+.2}",
            snapshot.current_mood.pleasure,
            snapshot.current_mood.arousal,
            snapshot.current_mood.dominance,
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
    let args = Args::parse();

    let mut config = ThymiaConfig::load_or_default(&args.config);
    if let Some(name) = args.character {
        config.character.name = name;
    }
    let name = config.character.name.clone();
    info!("Starting affect computation for {name}...");

    let decay: Box<dyn DecayFunction> = match args.decay.as_str() {
        "exponential" => Box::new(ExponentialDecay::new()),
        _ => Box::new(LinearDecay::new()),
    };

    let manager = Arc::new(CharacterManager::new(
        &name,
        config.character.personality,
        config.affect,
        false,
        decay,
        EmotionType::all().to_vec(),
    ));

    if args.watch {
        manager
            .set_mood_observer(Some(Arc::new(StatusPrinter) as Arc<dyn MoodObserver>))
            .await;
    }

    // Maintenance events arrive over a broadcast channel; each manager
    // filters for its own character.
    let (maintenance_tx, mut maintenance_rx) = broadcast::channel::<EmotionMaintenanceEvent>(16);
    {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move {
            while let Ok(event) = maintenance_rx.recv().await {
                manager.maintain_emotion(&event).await;
            }
        });
    }

    println!("Affect engine online for '{name}'. Commands:");
    println!("  elicit <type> <strength> [cause..]   queue and appraise an EEC");
    println!("  bio <p> <a> <d> <intensity>          infuse a PAD biosignal sample");
    println!("  maintain <type> <intensity>          broadcast a maintenance event");
    println!("  step | pause | resume | status | quit");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let parts: Vec<&str> = input.trim().split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["pause"] => {
                manager.pause_affect_computation();
                println!("paused");
            }
            ["resume"] => {
                if manager.resume_affect_computation().await {
                    println!("resumed");
                } else {
                    println!("not paused");
                }
            }
            ["step"] => {
                if manager.stepwise_affect_computation().await {
                    println!("stepped");
                } else {
                    println!("step requires a paused computation");
                }
            }
            ["status"] => {
                let snapshot = manager.snapshot().await;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            ["elicit", kind, strength, cause @ ..] => {
                match (kind.parse::<EmotionType>(), strength.parse::<f32>()) {
                    (Ok(kind), Ok(strength)) => {
                        let cause = if cause.is_empty() {
                            "cli elicitation".to_string()
                        } else {
                            cause.join(" ")
                        };
                        manager.add_eec(Eec::new(kind, strength, cause)).await;
                        let appraised = manager.infer_emotions().await;
                        for e in appraised.active() {
                            println!("  {} -> {:.2}", e.kind, e.intensity);
                        }
                        manager.log_active_emotions().await;
                    }
                    _ => println!("usage: elicit <type> <strength> [cause..]"),
                }
            }
            ["bio", p, a, d, intensity] => {
                match (
                    p.parse::<f32>(),
                    a.parse::<f32>(),
                    d.parse::<f32>(),
                    intensity.parse::<f32>(),
                ) {
                    (Ok(p), Ok(a), Ok(d), Ok(intensity)) => {
                        let sample =
                            PadEmotion::new(Mood::new(p, a, d), intensity, "cli bio sample");
                        let result = manager.infuse_bio_signal_emotions(sample).await;
                        if manager.is_affect_computation_paused() {
                            println!("paused: state unchanged");
                        } else if let Some(e) = result.get(EmotionType::Physical) {
                            println!("  physical -> {:.2}", e.intensity);
                        }
                    }
                    _ => println!("usage: bio <p> <a> <d> <intensity>"),
                }
            }
            ["maintain", kind, intensity] => {
                match (kind.parse::<EmotionType>(), intensity.parse::<f32>()) {
                    (Ok(kind), Ok(intensity)) => {
                        let event = EmotionMaintenanceEvent::new(kind, name.as_str(), intensity);
                        if maintenance_tx.send(event).is_err() {
                            println!("maintenance channel closed");
                        }
                    }
                    _ => println!("usage: maintain <type> <intensity>"),
                }
            }
            _ => println!("unknown command"),
        }
    }

    manager.stop_all();
    info!("Affect computation stopped.");
    Ok(())
}
