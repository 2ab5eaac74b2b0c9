/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{info, LevelFilter};
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::thread::{Builder, JoinHandle};

/* Custom libraries */
use config::CarConfig;
use elevator::clock::Clock;
use elevator::{CarController, Scheduler, VirtualClock, WallClock};
use messages::{Bridge, Intent, Notification};

/* Modules */
mod config;
mod elevator;
mod messages;
mod shared;

/* Main */
fn main() {
    let matches = Command::new("car-dispatch")
        .about("Dispatches a single elevator car from JSON intents on stdin")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("virtual-time")
                .long("virtual-time")
                .help("Skip real travel and idle delays"),
        )
        .get_matches();

    // Load the configuration, the logger needs its level before anything can be reported
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let config = config::load_config(Path::new(config_path));
    let level = match &config {
        Ok(config) => LevelFilter::from_str(&config.logging.level),
        Err(_) => Ok(LevelFilter::Info),
    };

    env_logger::Builder::new()
        .filter_level(*level.as_ref().unwrap_or(&LevelFilter::Info))
        .parse_default_env()
        .init();

    let config = crate::unwrap_or_exit!(config);
    crate::unwrap_or_exit!(level);

    // Initialize channels
    let (intent_tx, intent_rx) = cbc::unbounded::<Intent>();
    let (notification_tx, notification_rx) = cbc::unbounded::<Notification>();

    // Start the car controller
    let controller_thread = if matches.is_present("virtual-time") {
        spawn_controller(&config.car, VirtualClock::new(), intent_rx, notification_tx)
    } else {
        spawn_controller(&config.car, WallClock::new(), intent_rx, notification_tx)
    };
    let controller_thread = crate::unwrap_or_exit!(controller_thread);

    // Start the message bridge
    let bridge = crate::unwrap_or_exit!(Bridge::new(
        io::BufReader::new(io::stdin()),
        io::stdout(),
        intent_tx,
        notification_rx,
    ));

    if controller_thread.join().is_err() {
        log::error!("Car controller thread panicked");
        std::process::exit(1);
    }
    bridge.join();

    info!("Simulation finished");
}

fn spawn_controller<C: Clock + Send + 'static>(
    config: &CarConfig,
    clock: C,
    intent_rx: cbc::Receiver<Intent>,
    notification_tx: cbc::Sender<Notification>,
) -> io::Result<JoinHandle<()>> {
    let controller = CarController::new(
        config,
        Scheduler::new(config),
        clock,
        intent_rx,
        notification_tx,
    );

    Builder::new()
        .name("car_controller".into())
        .spawn(move || controller.run())
}
