use clap::Subcommand;
use exhale_core::{InterventionTimer, Store, TimerState, DEFAULT_INTERVENTION_SECS};

const ENGINE_KEY: &str = "intervention_timer";

#[derive(Subcommand)]
pub enum InterveneAction {
    /// Start a new intervention episode
    Start {
        /// Episode length in seconds
        #[arg(long, default_value_t = DEFAULT_INTERVENTION_SECS)]
        duration: u32,
    },
    /// Print current timer state as JSON
    Status,
    /// Advance the countdown by N seconds
    Tick {
        #[arg(default_value = "1")]
        seconds: u32,
    },
    /// Resolve the episode: the urge was resisted
    Resist,
    /// Resolve the episode: gave in
    GiveIn,
    /// Discard the episode without recording anything
    Cancel,
    /// Run the countdown live with one tick per second
    Run,
}

fn load_engine(store: &Store) -> Option<InterventionTimer> {
    let json = store.get(ENGINE_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn save_engine(store: &Store, timer: &InterventionTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    store.set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: InterveneAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut core = super::open_core()?;

    match action {
        InterveneAction::Start { duration } => {
            let (timer, event) = core.begin_intervention(duration);
            save_engine(core.log().store(), &timer)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        InterveneAction::Status => {
            let timer =
                load_engine(core.log().store()).ok_or("no intervention in progress")?;
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
        InterveneAction::Tick { seconds } => {
            let mut timer =
                load_engine(core.log().store()).ok_or("no intervention in progress")?;
            let mut completion = None;
            for _ in 0..seconds {
                if let Some(event) = timer.tick() {
                    completion = Some(event);
                }
            }
            save_engine(core.log().store(), &timer)?;
            match completion {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{}", serde_json::to_string_pretty(&timer.snapshot())?),
            }
        }
        InterveneAction::Resist => {
            let mut timer =
                load_engine(core.log().store()).ok_or("no intervention in progress")?;
            timer
                .resolve_resisted()
                .ok_or("episode already resolved")?;
            let event = core.resolve_intervention(&timer)?;
            core.log().store().delete(ENGINE_KEY)?;
            if let Some(event) = event {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        InterveneAction::GiveIn => {
            let mut timer =
                load_engine(core.log().store()).ok_or("no intervention in progress")?;
            let event = timer.give_in().ok_or("episode already resolved")?;
            core.resolve_intervention(&timer)?;
            core.log().store().delete(ENGINE_KEY)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        InterveneAction::Cancel => {
            core.log().store().delete(ENGINE_KEY)?;
            println!("{{\"type\": \"intervention_cancelled\"}}");
        }
        InterveneAction::Run => {
            let mut timer =
                load_engine(core.log().store()).ok_or("no intervention in progress")?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let mut interval =
                    tokio::time::interval(std::time::Duration::from_secs(1));
                // First tick of a fresh interval fires immediately; consume it.
                interval.tick().await;
                while timer.state() == TimerState::Running {
                    interval.tick().await;
                    if let Some(event) = timer.tick() {
                        if let Ok(json) = serde_json::to_string_pretty(&event) {
                            println!("{json}");
                        }
                    } else if timer.remaining_secs() % 60 == 0 {
                        eprintln!(
                            "{:>3}s remaining - {}",
                            timer.remaining_secs(),
                            timer.guidance()
                        );
                    }
                }
            });
            save_engine(core.log().store(), &timer)?;
        }
    }
    Ok(())
}
