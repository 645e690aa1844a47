use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use wheelkit::Wheel;
use wheelkit::items::{ButtonLabel, Description, ItemRegistry, ItemSpec, Title};
use wheelkit::panel::truncate_description;
use wheelkit::settings::{AUTO_ROTATE_SPEED, PROXIMITY_TOLERANCE, TARGET_POSITION, WheelSettings};

#[derive(Parser, Debug)]
#[command(name = "wheelkit", version, about = "Inspect and tune a rotating wheel layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the wheel angle that brings each item into the active slot.
    Angles {
        #[arg(short = 'n', long)]
        count: usize,

        #[arg(short = 't', long, default_value_t = TARGET_POSITION)]
        target: f64,
    },
    /// Run auto-rotation headlessly and report every automatic selection.
    Simulate {
        #[arg(short = 'n', long)]
        count: usize,

        /// Number of ticks to run (defaults to one full turn)
        #[arg(long)]
        ticks: Option<u64>,

        #[arg(short = 's', long, default_value_t = AUTO_ROTATE_SPEED)]
        speed: f64,

        #[arg(long, default_value_t = PROXIMITY_TOLERANCE)]
        tolerance: f64,
    },
    /// Print a description the way the info panel renders it at a given width.
    Truncate {
        #[arg(short = 'w', long)]
        width: u32,

        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Angles { count, target } => print_angles(count, target),
        Commands::Simulate {
            count,
            ticks,
            speed,
            tolerance,
        } => simulate(count, ticks, speed, tolerance),
        Commands::Truncate { width, text } => {
            println!(
                "{}",
                truncate_description(&text, width, &WheelSettings::default())
            );
            Ok(())
        }
    }
}

fn placeholder_registry(count: usize) -> ItemRegistry {
    let specs: Vec<ItemSpec> = (0..count)
        .map(|i| ItemSpec {
            position: Some(i as u32 + 1),
            title: Some(Title::new(format!("Item {}", i))),
            description: Some(Description::new(String::new())),
            button: Some(ButtonLabel::new(String::new())),
        })
        .collect();
    ItemRegistry::load(&specs)
}

fn print_angles(count: usize, target: f64) -> anyhow::Result<()> {
    if count == 0 {
        anyhow::bail!("A wheel needs at least one item");
    }

    let settings = WheelSettings {
        target_position: target,
        ..Default::default()
    };
    let wheel = Wheel::new(placeholder_registry(count), settings, u32::MAX);

    println!("{:>5}  {:>12}  {:>10}", "index", "angle", "normalized");
    for i in 0..count {
        let angle = wheel.angle_for_index(i);
        println!(
            "{:>5}  {:>12.4}  {:>10.4}",
            i,
            angle,
            wheelkit::rotation::normalize(angle)
        );
    }
    Ok(())
}

fn simulate(count: usize, ticks: Option<u64>, speed: f64, tolerance: f64) -> anyhow::Result<()> {
    if count == 0 {
        anyhow::bail!("A wheel needs at least one item");
    }
    if speed <= 0.0 {
        anyhow::bail!("Speed must be positive, got {}", speed);
    }

    let settings = WheelSettings {
        speed,
        tolerance,
        ..Default::default()
    };
    settings.validate()?;
    let ticks = ticks.unwrap_or_else(|| (360.0 / speed).ceil() as u64);
    let period = settings.tick_period;

    let mut wheel = Wheel::new(placeholder_registry(count), settings, u32::MAX);
    wheel.start();

    let mut seen = BTreeSet::from([0usize]);
    let mut last = wheel.current_index();
    for tick in 1..=ticks {
        wheel.on_tick();
        let current = wheel.current_index();
        if current != last
            && let Some(index) = current
        {
            println!(
                "tick {:>7} ({:>8.1}s)  angle {:>9.3}  -> item {}",
                tick,
                period.mul_f64(tick as f64).as_secs_f64(),
                wheel.angle(),
                index
            );
            seen.insert(index);
            last = current;
        }
    }

    let missed: Vec<usize> = (0..count).filter(|i| !seen.contains(i)).collect();
    if missed.is_empty() {
        println!("All {} items reached the active slot", count);
    } else {
        println!("Never selected: {:?}", missed);
    }
    Ok(())
}
