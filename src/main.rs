//! Discgen CLI - procedural flat-disc world generator.
//!
//! Generate the disc, rim, and underside geometry, export OBJ meshes and
//! preview maps, or query the map projection from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use discgen::export::{
    export_ornament_field_png, export_projection_graticule_png, export_underside_depth_png,
    export_wall_relief_png, export_world_obj,
};
use discgen::projection::{project, southern_cutoff_deg, unproject, GeoCoord, MapUv};
use discgen::rng::DEFAULT_SEED;
use discgen::world::{DiscWorld, WallStyle, WorldConfig};

/// Procedural flat-disc world generator.
#[derive(Parser)]
#[command(name = "discgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the world geometry and export it.
    Generate {
        /// Random seed. Defaults to the fixed world seed; pass another value
        /// to explore variants. Never derived from the clock.
        #[arg(short, long)]
        seed: Option<u32>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "disc")]
        name: String,

        /// Rim treatment: continuous cliff or discrete peaks.
        #[arg(short, long, default_value = "cliff")]
        wall_style: WallStyleArg,

        /// Disc grid segments per side.
        #[arg(long, default_value = "128")]
        disc_segments: u32,

        /// Wall segments around the circumference (cliff style).
        #[arg(long, default_value = "384")]
        radial_segments: u32,

        /// Wall segments along the height (cliff style).
        #[arg(long, default_value = "24")]
        height_segments: u32,

        /// Also export PNG preview maps of the procedural fields.
        #[arg(long)]
        previews: bool,
    },

    /// Display vertex/triangle/memory figures for a configuration.
    Info {
        #[arg(long, default_value = "128")]
        disc_segments: u32,

        #[arg(short, long, default_value = "cliff")]
        wall_style: WallStyleArg,
    },

    /// Project a latitude/longitude onto the disc texture square.
    Project {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
    },

    /// Recover latitude/longitude from a disc texture coordinate.
    Unproject {
        #[arg(short, long)]
        u: f64,
        #[arg(short, long)]
        v: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum WallStyleArg {
    /// Continuous displaced cliff band.
    Cliff,
    /// Field of discrete peak ornaments.
    Peaks,
}

impl From<WallStyleArg> for WallStyle {
    fn from(arg: WallStyleArg) -> Self {
        match arg {
            WallStyleArg::Cliff => WallStyle::Cliff,
            WallStyleArg::Peaks => WallStyle::Peaks,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            seed,
            output,
            name,
            wall_style,
            disc_segments,
            radial_segments,
            height_segments,
            previews,
        } => run_generate(
            seed,
            output,
            name,
            wall_style,
            disc_segments,
            radial_segments,
            height_segments,
            previews,
        ),
        Commands::Info { disc_segments, wall_style } => run_info(disc_segments, wall_style),
        Commands::Project { lat, lon } => run_project(lat, lon),
        Commands::Unproject { u, v } => run_unproject(u, v),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    seed: Option<u32>,
    output: PathBuf,
    name: String,
    wall_style: WallStyleArg,
    disc_segments: u32,
    radial_segments: u32,
    height_segments: u32,
    previews: bool,
) {
    if !(2..=2048).contains(&disc_segments) {
        eprintln!("Error: disc segments must be between 2 and 2048");
        std::process::exit(1);
    }
    if !(16..=4096).contains(&radial_segments) {
        eprintln!("Error: radial segments must be between 16 and 4096");
        std::process::exit(1);
    }
    if !(2..=512).contains(&height_segments) {
        eprintln!("Error: height segments must be between 2 and 512");
        std::process::exit(1);
    }

    let seed = seed.unwrap_or(DEFAULT_SEED);

    let mut config = WorldConfig {
        seed,
        disc_segments,
        wall_style: wall_style.into(),
        ..Default::default()
    };
    config.wall.radial_segments = radial_segments;
    config.wall.height_segments = height_segments;

    println!("Discgen - Flat-Disc World Generator");
    println!("===================================");
    println!("Seed: {}", seed);
    println!("Output: {}", output.display());

    let start = Instant::now();

    println!("\nGenerating world geometry...");
    let world = DiscWorld::generate(&config).unwrap_or_else(|e| {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    });

    let gen_time = start.elapsed();
    println!("Generation completed in {:.2?}", gen_time);
    println!(
        "  {} vertices, {} triangles ({:.2} MB)",
        world.vertex_count(),
        world.triangle_count(),
        world.byte_size() as f64 / 1024.0 / 1024.0
    );

    println!("\nExporting meshes...");
    let export_start = Instant::now();

    export_world_obj(&world, &output, &name).unwrap_or_else(|e| {
        eprintln!("Error exporting OBJ: {}", e);
        std::process::exit(1);
    });
    println!("  Exported OBJ files: {}_*.obj", name);

    if previews {
        for (i, which) in ["shelf", "crevice"].iter().enumerate() {
            let path = output.join(format!("{}_underside_{}.png", name, which));
            export_underside_depth_png(&config.underside, i, &path, 512).unwrap_or_else(|e| {
                eprintln!("Error exporting underside preview: {}", e);
                std::process::exit(1);
            });
        }
        println!("  Exported underside previews: {}_underside_*.png", name);

        match &world.ornaments {
            Some(field) => {
                let path = output.join(format!("{}_peaks.png", name));
                let extent = config
                    .ornaments
                    .rings
                    .iter()
                    .map(|r| r.ring_radius + r.radial_jitter)
                    .fold(config.disc_radius, f32::max)
                    * 1.1;
                export_ornament_field_png(field, extent, &path, 512).unwrap_or_else(|e| {
                    eprintln!("Error exporting peak field preview: {}", e);
                    std::process::exit(1);
                });
                println!("  Exported peak field preview: {}_peaks.png", name);
            }
            None => {
                let path = output.join(format!("{}_wall.png", name));
                export_wall_relief_png(&config.wall, &path, 1024, 128).unwrap_or_else(|e| {
                    eprintln!("Error exporting wall preview: {}", e);
                    std::process::exit(1);
                });
                println!("  Exported wall relief preview: {}_wall.png", name);
            }
        }

        let path = output.join(format!("{}_graticule.png", name));
        export_projection_graticule_png(&path, 512).unwrap_or_else(|e| {
            eprintln!("Error exporting graticule: {}", e);
            std::process::exit(1);
        });
        println!("  Exported projection graticule: {}_graticule.png", name);
    }

    let export_time = export_start.elapsed();
    println!("Export completed in {:.2?}", export_time);
    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
}

fn run_info(disc_segments: u32, wall_style: WallStyleArg) {
    let config = WorldConfig {
        disc_segments,
        wall_style: wall_style.into(),
        ..Default::default()
    };

    let disc_vertices = ((disc_segments + 1) as u64).pow(2);
    let wall_vertices = ((config.wall.radial_segments + 1) as u64)
        * ((config.wall.height_segments + 1) as u64);
    let cap_vertices =
        1 + (config.underside.rings as u64) * ((config.underside.radial_segments + 1) as u64);
    let peak_count: u64 = config.ornaments.rings.iter().map(|r| r.count as u64).sum();
    // A peak cone carries at most 7 vertices (hexagonal base plus apex).
    let peak_vertices = peak_count * 7;

    println!("Discgen - World Configuration Info");
    println!("==================================");
    println!();
    println!("Disc grid: {}x{} segments", disc_segments, disc_segments);
    println!();
    println!("Vertex counts:");
    println!("  Disc:          {:>10}", disc_vertices);
    match config.wall_style {
        WallStyle::Cliff => println!("  Rim wall:      {:>10}", wall_vertices),
        WallStyle::Peaks => {
            println!("  Peak field:    {:>10} ({} instances, upper bound)", peak_vertices, peak_count)
        }
    }
    println!("  Underside:     {:>10} (per layer)", cap_vertices);
    println!();

    let rim = match config.wall_style {
        WallStyle::Cliff => wall_vertices,
        WallStyle::Peaks => peak_vertices,
    };
    let total = disc_vertices + rim + cap_vertices * 2;
    // Position + normal + uv + radius ratio, f32 each.
    let bytes = total * (12 + 12 + 8 + 4);
    println!("Estimated vertex data: {} vertices, {:.2} MB", total, bytes as f64 / 1024.0 / 1024.0);
    println!();
    println!("Map projection:");
    println!("  Southern cutoff: {:.2} deg latitude", southern_cutoff_deg());
}

fn run_project(lat: f64, lon: f64) {
    if !(-90.0..=90.0).contains(&lat) {
        eprintln!("Error: latitude must be between -90 and 90");
        std::process::exit(1);
    }
    if !(-180.0..=180.0).contains(&lon) {
        eprintln!("Error: longitude must be between -180 and 180");
        std::process::exit(1);
    }

    let uv = project(GeoCoord::new(lat, lon));
    println!("({:.4}, {:.4}) -> u = {:.6}, v = {:.6}", lat, lon, uv.u, uv.v);

    let r = ((uv.u - 0.5).powi(2) + (uv.v - 0.5).powi(2)).sqrt();
    if r > 0.5 {
        println!("note: this point lies outside the visible disc (uv radius {:.3})", r);
    }
}

fn run_unproject(u: f64, v: f64) {
    let geo = unproject(MapUv::new(u, v));
    println!("({:.4}, {:.4}) -> lat = {:.6}, lon = {:.6}", u, v, geo.lat_deg, geo.lon_deg);

    if geo.lat_deg < southern_cutoff_deg() {
        println!("note: below the southern cutoff - off the mapped world");
    }
}
