use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use sdfield::{
    Circle, Object, Operation, Plane, RasterSettings, Scene, Vec2, load_from_file,
    rasterize_object, store_to_file,
};

#[derive(Parser, Debug)]
#[command(name = "sdfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize a scene object to a PNG.
    Render(RenderArgs),
    /// Print a binary scene as JSON.
    Dump(DumpArgs),
    /// Write the built-in demo scene as a binary scene file.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene file; omit to render the built-in demo scene.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Object index within the scene.
    #[arg(long, default_value_t = 0)]
    object: usize,

    /// Output width in pixels.
    #[arg(long, default_value_t = 64)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 64)]
    height: u32,

    /// Sample per horizontal subpixel for RGB stripe displays.
    #[arg(long, default_value_t = false)]
    lcd: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input scene file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output scene path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Dump(args) => cmd_dump(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = match &args.in_path {
        Some(path) => {
            load_from_file(path).with_context(|| format!("load scene '{}'", path.display()))?
        }
        None => demo_scene(),
    };

    let frame = rasterize_object(
        &scene,
        args.object,
        RasterSettings {
            width: args.width,
            height: args.height,
            lcd: args.lcd,
        },
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let scene = load_from_file(&args.in_path)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;
    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    store_to_file(&demo_scene(), &args.out)
        .with_context(|| format!("store scene '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// A 64x64 square with a circle carved out of its middle.
fn demo_scene() -> Scene {
    let mut object = Object::default();

    // Square sides as outward-facing planes.
    let left = object.push_primitive(Plane::from_point_and_normal(
        Vec2::new(16.0, 16.0),
        Vec2::new(-1.0, 0.0),
    ));
    let top = object.push_primitive(Plane::from_point_and_normal(
        Vec2::new(16.0, 16.0),
        Vec2::new(0.0, -1.0),
    ));
    let right = object.push_primitive(Plane::from_point_and_normal(
        Vec2::new(48.0, 48.0),
        Vec2::new(1.0, 0.0),
    ));
    let bottom = object.push_primitive(Plane::from_point_and_normal(
        Vec2::new(48.0, 48.0),
        Vec2::new(0.0, 1.0),
    ));

    let hole = object.push_primitive(Circle {
        center: Vec2::new(32.0, 32.0),
        radius: 12.0,
    });

    let lt = object.push_operation(Operation::max(left, top));
    let rb = object.push_operation(Operation::max(right, bottom));
    let square = object.push_operation(Operation::max(lt, rb));
    let carve = object.push_operation(Operation::neg(hole));
    object.push_operation(Operation::max(square, carve));

    Scene {
        objects: vec![object],
        ..Scene::default()
    }
}
