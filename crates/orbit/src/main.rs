use clap::Parser;
use orbit::config;
use orbit::gui::app::{AppModel, DEFAULT_WIDTH};
use orbit::sys::runtime;
use relm4::prelude::*;
use wheelkit::Wheel;

#[derive(Parser, Debug)]
#[command(version, about = "A rotating wheel carousel", long_about = None)]
struct Args {
    /// Write the default config file (if none exists) and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let wheel = Wheel::new(config.registry(), config.wheel, DEFAULT_WIDTH as u32);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // clap already consumed the arguments
    let app = RelmApp::new("org.orbit.Orbit").with_args(Vec::new());

    app.run::<AppModel>((wheel, rx));
    Ok(())
}
