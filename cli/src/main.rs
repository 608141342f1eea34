mod cli;
mod config_file;

use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

use clap::Parser;

use cli::{Arguments, Commands};
use galaxy_bh::io::{read_initial_state, write_initial_state, ArtifactSink};
use galaxy_bh::{build_integrator, generate_initial_state, Error};

fn main() -> ExitCode {
    let args = Arguments::parse();

    let level = if args.quiet {
        log::LevelFilter::Error
    } else {
        match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new().filter_level(level).init();

    if let Err(e) = run(args.command) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Init { params, output } => {
            let config = config_file::read_config(&params)?;
            let bodies = generate_initial_state(&config)?;
            let mut writer = BufWriter::new(File::create(&output)?);
            write_initial_state(&mut writer, &bodies)?;
            log::info!("wrote {} bodies to {}", bodies.len(), output.display());
            Ok(())
        }
        Commands::Evolve { params, input, output } => {
            let config = config_file::read_config(&params)?;
            let mut bodies = match input {
                Some(path) => {
                    let mut reader = std::io::BufReader::new(File::open(&path)?);
                    read_initial_state(&mut reader, config.n)?
                }
                None => generate_initial_state(&config)?,
            };

            let integrator = build_integrator(&config)?;
            let writer = BufWriter::new(File::create(&output)?);
            let mut sink = ArtifactSink::new(writer);
            integrator.run(&mut bodies, config.n_steps, config.save_every, &mut sink)?;
            sink.into_result()?;

            log::info!(
                "evolved {} bodies for {} steps, saved every {} steps to {}",
                config.n,
                config.n_steps,
                config.save_every,
                output.display()
            );
            Ok(())
        }
    }
}
