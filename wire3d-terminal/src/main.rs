//! Wire3D Terminal Demo - Rotating wireframe solids
//!
//! Controls:
//!   - 1/2/3: Cube, pyramid, sphere
//!   - WASD / Arrow Keys: Rotate around X and Y
//!   - E/R: Rotate around Z
//!   - Space: Toggle animation
//!   - 0 / Backspace: Reset rotation
//!   - Q/ESC: Quit

use clap::Parser;
use std::io;
use wire3d_core::{RenderConfig, ShapeName};
use wire3d_terminal::{TerminalApp, ViewerOptions};

#[derive(Parser, Debug)]
#[command(name = "wire3d-terminal", about = "Spin wireframe solids in the terminal")]
struct Args {
    /// Solid to show first (cube, pyramid or sphere)
    #[arg(long, default_value = "cube")]
    shape: ShapeName,

    /// Start with the animation running
    #[arg(long)]
    animate: bool,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Logical canvas width in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    canvas_width: u32,

    /// Logical canvas height in pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    canvas_height: u32,

    /// Latitude and longitude segments of the sphere
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..))]
    sphere_segments: u16,
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let options = ViewerOptions {
        shape: args.shape,
        animate: args.animate,
        fps: args.fps,
        canvas_width: args.canvas_width,
        canvas_height: args.canvas_height,
        config: RenderConfig::default().with_sphere_segments(args.sphere_segments as usize),
    };
    log::info!("starting viewer with {:?}", options);

    let mut app = TerminalApp::new(options)?;
    app.run()?;

    println!("Thank you for using Wire3D Terminal!");
    Ok(())
}
