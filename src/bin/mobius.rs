#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("mobius error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use mobius_engine::geom::{GeomMesh, GeomMeshDiagnostics, GeomMetrics, StripParams};
    use mobius_engine::strip::{MobiusStrip, StripReport};
    use serde::Serialize;

    #[derive(Parser)]
    #[command(name = "mobius", about = "Surface area and edge length of a Möbius strip")]
    struct Cli {
        /// JSON file with `radius`, `width` and/or `resolution`
        #[arg(long)]
        config: Option<PathBuf>,
        /// Centerline radius (overrides the config file)
        #[arg(long)]
        radius: Option<f64>,
        /// Full strip width (overrides the config file)
        #[arg(long)]
        width: Option<f64>,
        /// Samples per parameter axis (overrides the config file)
        #[arg(long)]
        resolution: Option<usize>,
        /// Write report, X/Y/Z grids and mesh as JSON
        #[arg(long)]
        export: Option<PathBuf>,
        /// Write the strip mesh as Wavefront OBJ
        #[arg(long)]
        obj: Option<PathBuf>,
        /// Replace existing export files
        #[arg(long)]
        overwrite: bool,
    }

    #[derive(Serialize)]
    struct StripExport<'a> {
        report: &'a StripReport,
        x: Vec<Vec<f64>>,
        y: Vec<Vec<f64>>,
        z: Vec<Vec<f64>>,
        mesh: &'a GeomMesh,
        mesh_diagnostics: &'a GeomMeshDiagnostics,
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let cli = Cli::parse();
        let params = resolve_params(&cli)?;
        log::info!(
            "building strip: R = {}, w = {}, n = {}",
            params.radius,
            params.width,
            params.resolution
        );

        let mut metrics = GeomMetrics::default();
        let strip = MobiusStrip::build_with_metrics(params, &mut metrics)
            .context("invalid strip constants")?;
        let report = strip.report();

        println!("{report}");
        if let Some(timings) = report.timings.as_ref() {
            log::info!("pipeline took {:.3} ms", timings.total_ms());
        }

        if cli.export.is_none() && cli.obj.is_none() {
            return Ok(());
        }

        let (mesh, diagnostics) = strip.mesh();
        log::info!("mesh: {diagnostics}");
        for warning in &diagnostics.warnings {
            log::warn!("mesh: {warning}");
        }

        if let Some(path) = cli.export.as_deref() {
            let export = StripExport {
                report: &report,
                x: strip.x().to_rows(),
                y: strip.y().to_rows(),
                z: strip.z().to_rows(),
                mesh: &mesh,
                mesh_diagnostics: &diagnostics,
            };
            write_json_file(path, &export, cli.overwrite)?;
            log::info!("wrote {}", path.display());
        }

        if let Some(path) = cli.obj.as_deref() {
            write_obj_file(path, &mesh, "mobius_strip", cli.overwrite)?;
            log::info!("wrote {}", path.display());
        }

        Ok(())
    }

    /// Defaults, then the config file, then individual flags.
    fn resolve_params(cli: &Cli) -> Result<StripParams> {
        let mut params = match cli.config.as_deref() {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("read config {}", path.display()))?;
                serde_json::from_str::<StripParams>(&text)
                    .with_context(|| format!("parse config {}", path.display()))?
            }
            None => StripParams::default(),
        };

        if let Some(radius) = cli.radius {
            params.radius = radius;
        }
        if let Some(width) = cli.width {
            params.width = width;
        }
        if let Some(resolution) = cli.resolution {
            params.resolution = resolution;
        }
        Ok(params)
    }

    fn create_output(path: &Path, overwrite: bool) -> Result<BufWriter<File>> {
        if path.exists() && !overwrite {
            bail!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            );
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        Ok(BufWriter::new(file))
    }

    fn write_json_file<T: Serialize>(path: &Path, value: &T, overwrite: bool) -> Result<()> {
        let mut w = create_output(path, overwrite)?;
        serde_json::to_writer(&mut w, value).context("write json")?;
        w.flush().context("write json")?;
        Ok(())
    }

    fn write_obj_file(path: &Path, mesh: &GeomMesh, name: &str, overwrite: bool) -> Result<()> {
        if let Err(message) = mesh.validate() {
            bail!("mesh validation failed: {message}");
        }

        let mut w = create_output(path, overwrite)?;
        write_obj(&mut w, mesh, name)?;
        w.flush().context("write obj")?;
        Ok(())
    }

    fn write_obj<W: Write>(w: &mut W, mesh: &GeomMesh, name: &str) -> Result<()> {
        writeln!(w, "# mobius-engine")?;
        writeln!(w, "o {name}")?;

        for p in &mesh.positions {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2])?;
        }
        if let Some(uvs) = mesh.uvs.as_ref() {
            for uv in uvs {
                writeln!(w, "vt {} {}", uv[0], uv[1])?;
            }
        }
        if let Some(normals) = mesh.normals.as_ref() {
            for n in normals {
                writeln!(w, "vn {} {} {}", n[0], n[1], n[2])?;
            }
        }

        let has_uvs = mesh.uvs.is_some();
        let has_normals = mesh.normals.is_some();

        for tri in mesh.indices.chunks_exact(3) {
            let a = tri[0] + 1;
            let b = tri[1] + 1;
            let c = tri[2] + 1;

            match (has_uvs, has_normals) {
                (true, true) => writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?,
                (true, false) => writeln!(w, "f {a}/{a} {b}/{b} {c}/{c}")?,
                (false, true) => writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}")?,
                (false, false) => writeln!(w, "f {a} {b} {c}")?,
            }
        }
        Ok(())
    }

}
