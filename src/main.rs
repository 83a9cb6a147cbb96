use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use efflux::assets::{load_sprites, BuiltinResources, DirectoryResources, ResourceLoader};
use efflux::cli::Cli;
use efflux::simulator::{self, SnapshotOptions};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.face_config()?;

    let loader: Box<dyn ResourceLoader> = match &cli.assets {
        Some(dir) => Box::new(DirectoryResources::new(dir)),
        None => Box::new(BuiltinResources::new(&config)),
    };
    let sprites = load_sprites(loader.as_ref(), config.variant).context("failed to load face sprites")?;

    match &cli.snapshot {
        Some(path) => {
            let options = SnapshotOptions {
                width: cli.width,
                height: cli.height,
                time: cli.time,
                ambient: cli.ambient,
                ..Default::default()
            };
            let frame = simulator::render_snapshot(sprites, &config, &options);

            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            frame.encode_png(BufWriter::new(file))?;
            info!("wrote {}x{} snapshot to {}", cli.width, cli.height, path.display());
        }
        None => {
            println!("Efflux - Controls: A ambient, L low-bit, B burn-in, Escape to quit");
            simulator::run(sprites, &config, cli.width, cli.height)?;
        }
    }

    Ok(())
}
