//! Example: Print a single frame of a shape without entering raw mode
//!
//! Usage: cargo run --example snapshot -- [cube|pyramid|sphere] [x y z]

use std::env;
use std::io;
use wire3d_core::{Axis, ManualScheduler, RenderSession, ShapeName};
use wire3d_terminal::AsciiSurface;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let shape = match args.get(1) {
        Some(name) => name
            .parse::<ShapeName>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        None => {
            eprintln!("Usage: {} <shape> [x y z]", args[0]);
            eprintln!("\nNo shape provided, using default cube...");
            ShapeName::Cube
        }
    };

    let mut session = RenderSession::new(shape, ManualScheduler::new());
    for (axis, value) in [Axis::X, Axis::Y, Axis::Z].into_iter().zip(args.iter().skip(2)) {
        let radians = value
            .parse::<f32>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("bad angle {}: {}", value, e)))?;
        session.set_rotation(axis, radians);
    }

    let mut surface = AsciiSurface::new(600, 400, 72, 24);
    session.render_frame(&mut surface);
    for line in surface.lines() {
        println!("{}", line.trim_end());
    }
    Ok(())
}
