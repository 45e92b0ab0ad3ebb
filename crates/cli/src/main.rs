mod svg;

use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use gridcast::{
    timed, Mesh, MeshProjector, Region, SceneConfig, ScreenPoint, StaticScene,
    Tile,
};
use log::{info, LevelFilter};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for replaying a single captured frame through the gridcast kit.
/// Projects a model and/or queries a region, then prints what it found.
#[derive(Debug, StructOpt)]
#[structopt(name = "gridcast")]
struct Opt {
    /// Path to a config file that defines the scene: camera, screen layout,
    /// ground height and anchor pose. Supported formats: JSON, TOML
    #[structopt(short, long)]
    scene: PathBuf,

    /// Path to a JSON mesh dump, with the fields xs, ys, zs, face_a, face_b
    /// and face_c. Add num_vertices and num_faces for padded buffers.
    #[structopt(short, long)]
    mesh: Option<PathBuf>,

    /// Path to a JSON list of tiles, e.g. [{"x": 1, "y": 2, "plane": 0}, ...],
    /// that form the vertices of a region polygon
    #[structopt(short, long)]
    region: Option<PathBuf>,

    /// If given, the visible wireframe of the mesh is written to this file as
    /// an SVG. Requires --mesh
    #[structopt(long)]
    svg: Option<PathBuf>,

    /// Seed for the random queries. If not given, a random seed is used (and
    /// logged)
    #[structopt(long)]
    seed: Option<u64>,

    /// How to print the results. Supported formats:
    ///
    /// text - One line per result
    ///
    /// json - A single JSON object
    #[structopt(short = "f", long, default_value = "text")]
    output_format: OutputFormat,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different ways of printing results.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    Text,
    Json,
}

/// Everything we learned about the mesh
#[derive(Debug, Serialize)]
struct MeshReport {
    mesh: String,
    visible_triangles: usize,
    center_point: Option<ScreenPoint>,
    next_triangle: Option<usize>,
    next_point: Option<ScreenPoint>,
}

/// Everything we learned about the region
#[derive(Debug, Serialize)]
struct RegionReport {
    tiles: usize,
    central_tile: Option<Tile>,
    random_tile: Option<Tile>,
    closest_to_anchor: Option<Tile>,
}

#[derive(Debug, Default, Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    mesh: Option<MeshReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<RegionReport>,
}

fn path_str(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("invalid character in path {:?}", path))
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("error reading file {:?}", path))
}

fn load_scene(scene_path: &Path) -> anyhow::Result<StaticScene> {
    let mut settings = Config::new();
    settings
        .merge(File::with_name(path_str(scene_path)?))
        .context("error reading scene file")?;
    let config: SceneConfig =
        settings.try_into().context("error reading scene config")?;
    StaticScene::new(config)
}

fn load_region(region_path: &Path) -> anyhow::Result<Region> {
    let tiles: Vec<Tile> = serde_json::from_str(&read_file(region_path)?)
        .context("error deserializing region tiles")?;
    Region::new(&tiles)
}

/// Run every mesh query against the scene, and write out the wireframe if
/// asked to
fn inspect_mesh(
    mesh: Mesh,
    scene: &StaticScene,
    rng: &mut Pcg64,
    svg_path: Option<&Path>,
) -> anyhow::Result<MeshReport> {
    let mut projector = MeshProjector::new(mesh, scene.anchor());
    let report = timed!("Mesh queries", log::Level::Info, {
        MeshReport {
            mesh: projector.to_string(),
            visible_triangles: projector.triangles(scene).len(),
            center_point: projector.center_point(scene),
            next_triangle: projector.next_triangle(scene, rng),
            next_point: projector.next_point(scene, rng),
        }
    });

    if let Some(svg_path) = svg_path {
        let document = svg::draw_wireframe(&mut projector, scene);
        ::svg::save(svg_path, &document)
            .with_context(|| format!("error writing SVG to {:?}", svg_path))?;
        info!("Wrote wireframe to {:?}", svg_path);
    }

    Ok(report)
}

fn inspect_region(
    region: &Region,
    scene: &StaticScene,
    rng: &mut Pcg64,
) -> RegionReport {
    // Static scenes give the anchor pose in tile coordinates
    let pose = scene.config().anchor;
    let anchor_tile = Tile::new(pose.x, pose.y, pose.plane);
    timed!("Region queries", log::Level::Info, {
        RegionReport {
            tiles: region.len(),
            central_tile: region.central_tile(),
            random_tile: region.random_tile(rng),
            closest_to_anchor: region.closest_to(Some(&anchor_tile)),
        }
    })
}

fn print_report(report: &Report, output_format: OutputFormat) {
    fn show<T: ToString>(value: &Option<T>) -> String {
        value.as_ref().map_or_else(|| "none".into(), T::to_string)
    }

    match output_format {
        OutputFormat::Text => {
            if let Some(mesh) = &report.mesh {
                println!("Mesh: {}", mesh.mesh);
                println!("  Visible triangles: {}", mesh.visible_triangles);
                println!("  Center point: {}", show(&mesh.center_point));
                println!("  Next triangle: {}", show(&mesh.next_triangle));
                println!("  Next point: {}", show(&mesh.next_point));
            }
            if let Some(region) = &report.region {
                println!("Region: {} tiles", region.tiles);
                println!("  Central tile: {}", show(&region.central_tile));
                println!("  Random tile: {}", show(&region.random_tile));
                println!(
                    "  Closest to anchor: {}",
                    show(&region.closest_to_anchor)
                );
            }
        }
        OutputFormat::Json => {
            // Panics only if the report isn't serializable (a bug)
            println!(
                "{}",
                serde_json::to_string_pretty(report)
                    .expect("error serializing report")
            );
        }
    }
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    if opt.mesh.is_none() && opt.region.is_none() {
        bail!("nothing to do, pass at least one of --mesh or --region");
    }
    if opt.svg.is_some() && opt.mesh.is_none() {
        bail!("--svg was given, but there's no --mesh to draw");
    }

    let scene = load_scene(&opt.scene)?;
    info!("Loaded scene from {:?}", &opt.scene);

    let seed = opt.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);
    let mut rng = Pcg64::seed_from_u64(seed);

    let mut report = Report::default();
    if let Some(mesh_path) = &opt.mesh {
        let mesh = Mesh::from_json(&read_file(mesh_path)?)?;
        info!("Loaded mesh {} from {:?}", mesh, mesh_path);
        report.mesh = Some(inspect_mesh(
            mesh,
            &scene,
            &mut rng,
            opt.svg.as_deref(),
        )?);
    }
    if let Some(region_path) = &opt.region {
        let region = load_region(region_path)?;
        info!("Loaded region from {:?}", region_path);
        report.region = Some(inspect_region(&region, &scene, &mut rng));
    }

    print_report(&report, opt.output_format);
    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
