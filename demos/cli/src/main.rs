use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};

use strokemesh::{
    mesh::{CloudSettings, Mesh, TubeSettings},
    simplify::{LineSimplifier, SimplifierSettings},
};

/// Builds meshes from point files
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,

    /// Input file, with one point per line
    #[clap(short, long)]
    input: PathBuf,

    /// Name of a `.stl` or `.obj` file to write
    #[clap(short, long)]
    out: Option<PathBuf>,

    /// Number of times to build the mesh (for benchmarking)
    #[clap(short = 'N', default_value_t = 1)]
    n: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Sweeps a tube along the points, treating them as a drawn stroke
    Tube {
        #[clap(flatten)]
        settings: TubeArgs,
    },

    /// Draws a small cube at every point of a point cloud
    Cloud {
        #[clap(flatten)]
        settings: CloudArgs,
    },
}

#[derive(Parser)]
struct TubeArgs {
    /// Tube radius
    #[clap(short, long, default_value_t = 0.005)]
    radius: f32,

    /// Number of sides around the tube
    #[clap(long, default_value_t = strokemesh::mesh::NUMBER_OF_SIDES)]
    sides: usize,

    /// Mesh the points as given, without simplification
    #[clap(long)]
    raw: bool,

    /// Points closer than this to their predecessor are dropped
    #[clap(long, default_value_t = 0.001)]
    min_distance: f32,

    /// Maximum deviation allowed when simplifying
    #[clap(long, default_value_t = 0.005)]
    tolerance: f32,
}

#[derive(Parser)]
struct CloudArgs {
    /// Half the edge length of each cube
    #[clap(long, default_value_t = 0.0025)]
    half_extent: f32,

    /// Number of threads to use
    #[clap(short, long, default_value_t = NonZeroUsize::new(1).unwrap())]
    threads: NonZeroUsize,
}

////////////////////////////////////////////////////////////////////////////////

fn run_tube(
    points: &[nalgebra::Vector3<f32>],
    settings: &TubeArgs,
    n: usize,
) -> Result<Option<Mesh<()>>> {
    if settings.sides < 3 {
        bail!("a tube needs at least 3 sides, not {}", settings.sides);
    }
    let tube = TubeSettings {
        radius: settings.radius,
        sides: settings.sides,
    };
    let mut mesh = None;
    for _ in 0..n {
        mesh = if settings.raw {
            tube.build(points, ())
        } else {
            let mut line = LineSimplifier::with_settings(SimplifierSettings {
                min_distance: settings.min_distance,
                tolerance: settings.tolerance,
                ..Default::default()
            });
            for p in points {
                line.append(*p);
            }
            line.finish();
            info!(
                "simplified {} points to {}",
                points.len(),
                line.points().len()
            );
            tube.build(line.points(), ())
        };
    }
    Ok(mesh)
}

fn run_cloud(
    buffer: &[f32],
    settings: &CloudArgs,
    n: usize,
) -> Option<Mesh<()>> {
    #[cfg(feature = "rayon")]
    let threads = settings.threads.into();
    #[cfg(not(feature = "rayon"))]
    let threads = {
        if settings.threads.get() > 1 {
            warn!("built without `rayon`; meshing on one thread");
        }
        strokemesh::mesh::ThreadCount::One
    };
    let cfg = CloudSettings {
        half_extent: settings.half_extent,
        threads,
    };
    let mut mesh = None;
    for _ in 0..n {
        mesh = cfg.build(buffer, ());
    }
    mesh
}

fn write_mesh(mesh: &Mesh<()>, out: &Path) -> Result<()> {
    let mut file = std::fs::File::create(out)?;
    match out.extension().and_then(|e| e.to_str()) {
        Some("obj") => {
            info!("Writing OBJ to {out:?}");
            mesh.write_obj(&mut file)?;
        }
        _ => {
            info!("Writing STL to {out:?}");
            mesh.write_stl(&mut file)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let now = Instant::now();
    let args = Args::parse();
    let file = std::io::BufReader::new(std::fs::File::open(&args.input)?);

    let mesh = match &args.cmd {
        Command::Tube { settings } => {
            let points = strokemesh::points::read_points(file)?;
            info!("Loaded {} points in {:?}", points.len(), now.elapsed());
            let start = Instant::now();
            let mesh = run_tube(&points, settings, args.n)?;
            info!(
                "Meshed {}x at {:?} ms/iter",
                args.n,
                start.elapsed().as_micros() as f64 / 1000.0 / (args.n as f64)
            );
            mesh
        }
        Command::Cloud { settings } => {
            let buffer = strokemesh::points::read_cloud(file)?;
            let samples = buffer.len() / 4;
            info!("Loaded {samples} samples in {:?}", now.elapsed());
            let start = Instant::now();
            let mesh = run_cloud(&buffer, settings, args.n);
            info!(
                "Meshed {}x at {:?} ms/iter",
                args.n,
                start.elapsed().as_micros() as f64 / 1000.0 / (args.n as f64)
            );
            mesh
        }
    };

    let Some(mesh) = mesh else {
        warn!("not enough points to build a mesh");
        return Ok(());
    };
    info!(
        "Built mesh with {} vertices and {} triangles",
        mesh.vertices.len(),
        mesh.triangles.len()
    );
    if let Some(out) = &args.out {
        write_mesh(&mesh, out)?;
    }

    Ok(())
}
