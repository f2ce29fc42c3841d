use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use sapper_core::{Controller, Field, FrameInput, GameConfig, PressQueue, RandomMineGenerator};

mod canvas;
mod command;

use canvas::TextCanvas;
use command::Command;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

const HELP: &str = "r <col> <row> reveal, f <col> <row> flag, p <x> <y> [l|r|m] press a pixel, q quit";

fn draw(controller: &Controller, out: &mut impl Write) -> io::Result<()> {
    let mut canvas = TextCanvas::around(controller.field().boundary());
    controller.compose_frame(&mut canvas);
    write!(out, "{canvas}")?;
    out.flush()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let field = Field::generate(GameConfig::standard(), RandomMineGenerator::new(seed))
        .context("Could not generate the minefield")?;
    let mut controller = Controller::new(field);
    let mut pointer = PressQueue::new();

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}")?;
    draw(&controller, &mut stdout)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command.press(controller.field(), &mut pointer),
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        }

        let input = controller.update(&mut pointer)?;
        log::debug!("frame input: {:?}", input);
        if input == FrameInput::Ignored {
            writeln!(stdout, "Nothing to do there")?;
        }
        draw(&controller, &mut stdout)?;

        if controller.field().is_finished() {
            break;
        }
    }

    let field = controller.field();
    log::info!(
        "Finished with {}/{} safe tiles revealed",
        field.revealed_safe_count(),
        field.safe_tile_count()
    );
    Ok(())
}
