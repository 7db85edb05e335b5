use curves_engine::geom::{
    BezierPath, CatmullRomSpline, GeomMesh, Point3, RibbonDiagnostics, build_ribbon,
    compute_smooth_normals,
};

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const SNAPSHOT_QUANTIZE: f64 = 1e-6;
const SNAPSHOT_DECIMALS: usize = 6;

const USAGE: &str = r#"mesh_cli (curves-engine)

USAGE:
  mesh_cli list
  mesh_cli run <scenario|all> [options]

SCENARIOS:
  straight_ribbon
  bezier_arch_ribbon
  bezier_s_ribbon
  catmull_ribbon

OPTIONS (run):
  --out-dir <dir>    Write <scenario>.obj and/or <scenario>.snap to this dir (required for `all`)
  --obj <path>       Write OBJ (single scenario only)
  --snap <path>      Write golden-style snapshot (single scenario only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

fn main() {
    if let Err(err) = run() {
        eprintln!("mesh_cli error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut args = Args::new(args);

    let Some(command) = args.next() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "list" => {
            print_scenarios();
            Ok(())
        }
        "run" => cmd_run(&mut args),
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
    }
}

fn print_usage() {
    println!("{USAGE}");
}

fn print_scenarios() {
    for scenario in Scenario::ALL {
        println!("{}", scenario.name());
    }
}

fn cmd_run(args: &mut Args) -> Result<(), String> {
    let scenario_name = args.next().ok_or("missing scenario name")?;

    let mut out_dir: Option<PathBuf> = None;
    let mut obj_path: Option<PathBuf> = None;
    let mut snap_path: Option<PathBuf> = None;
    let mut overwrite = false;
    let mut write_obj = true;
    let mut write_snap = true;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
            "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
            "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
            "--overwrite" => overwrite = true,
            "--no-obj" => write_obj = false,
            "--no-snap" => write_snap = false,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
        }
    }

    if let Some(dir) = out_dir.as_ref() {
        if obj_path.is_some() || snap_path.is_some() {
            return Err("use either --out-dir or --obj/--snap (not both)".to_string());
        }
        if !write_obj && !write_snap {
            return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
        }

        fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

        if scenario_name == "all" {
            for scenario in Scenario::ALL {
                run_one_scenario_to_dir(*scenario, dir, write_obj, write_snap, overwrite)?;
            }
            return Ok(());
        }

        let scenario = Scenario::from_str(scenario_name.as_str())
            .ok_or_else(|| unknown_scenario(&scenario_name))?;
        return run_one_scenario_to_dir(scenario, dir, write_obj, write_snap, overwrite);
    }

    if scenario_name == "all" {
        return Err("`run all` requires --out-dir".to_string());
    }

    let scenario = Scenario::from_str(scenario_name.as_str())
        .ok_or_else(|| unknown_scenario(&scenario_name))?;
    let output = run_scenario(scenario)?;

    if let Some(path) = snap_path.as_deref() {
        write_text_file(path, &output.snapshot, overwrite)?;
        eprintln!("wrote {}", path.display());
    } else {
        print!("{}", output.snapshot);
    }

    if let Some(path) = obj_path.as_deref() {
        write_obj_file(path, &output.mesh, output.name, overwrite)?;
        eprintln!("wrote {}", path.display());
    }

    report(&output);
    Ok(())
}

fn run_one_scenario_to_dir(
    scenario: Scenario,
    dir: &Path,
    write_obj: bool,
    write_snap: bool,
    overwrite: bool,
) -> Result<(), String> {
    let output = run_scenario(scenario)?;

    if write_snap {
        let path = dir.join(format!("{}.snap", output.name));
        write_text_file(&path, &output.snapshot, overwrite)?;
        eprintln!("wrote {}", path.display());
    }

    if write_obj {
        let path = dir.join(format!("{}.obj", output.name));
        write_obj_file(&path, &output.mesh, output.name, overwrite)?;
        eprintln!("wrote {}", path.display());
    }

    report(&output);
    Ok(())
}

fn report(output: &ScenarioOutput) {
    eprintln!(
        "{}: rail points={} vertices={} triangles={}",
        output.name,
        output.diagnostics.rail_point_count,
        output.mesh.vertex_count(),
        output.mesh.triangle_count()
    );
}

fn unknown_scenario(name: &str) -> String {
    let mut msg = String::new();
    msg.push_str(&format!("unknown scenario `{name}`\n\navailable scenarios:\n"));
    for scenario in Scenario::ALL {
        msg.push_str(&format!("  {}\n", scenario.name()));
    }
    msg
}

fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
    if path.exists() && !overwrite {
        return Err(format!(
            "refusing to overwrite existing file {} (use --overwrite)",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
    }
    fs::write(path, normalize_snapshot_text(text))
        .map_err(|e| format!("write {}: {e}", path.display()))
}

fn write_obj_file(path: &Path, mesh: &GeomMesh, name: &str, overwrite: bool) -> Result<(), String> {
    mesh.validate()
        .map_err(|e| format!("mesh validation failed: {e}"))?;

    if path.exists() && !overwrite {
        return Err(format!(
            "refusing to overwrite existing file {} (use --overwrite)",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
    }

    let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "# curves-engine mesh_cli").map_err(|e| format!("write obj: {e}"))?;
    writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

    for p in mesh.positions.iter().copied() {
        writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
    }

    if let Some(normals) = mesh.normals.as_ref() {
        for n in normals.iter().copied() {
            writeln!(w, "vn {} {} {}", n[0], n[1], n[2]).map_err(|e| format!("write obj: {e}"))?;
        }
    }

    let has_normals = mesh.normals.is_some();
    for tri in mesh.indices.chunks_exact(3) {
        let a = tri[0] + 1;
        let b = tri[1] + 1;
        let c = tri[2] + 1;

        if has_normals {
            writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}")
        } else {
            writeln!(w, "f {a} {b} {c}")
        }
        .map_err(|e| format!("write obj: {e}"))?;
    }

    w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
}

fn normalize_snapshot_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    if normalized.ends_with('\n') {
        normalized
    } else {
        format!("{normalized}\n")
    }
}

fn quantize_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let value = if value == -0.0 { 0.0 } else { value };
    let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
    if q == -0.0 { 0.0 } else { q }
}

fn write_f64(out: &mut String, value: f64) {
    let value = quantize_f64(value);
    let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
}

fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
    let _ = write!(out, "{prefix} ");
    write_f64(out, v[0]);
    out.push(' ');
    write_f64(out, v[1]);
    out.push(' ');
    write_f64(out, v[2]);
    out.push('\n');
}

fn write_ribbon_diagnostics(out: &mut String, diag: &RibbonDiagnostics) {
    let _ = writeln!(out, "ribbon_diag.rail_point_count {}", diag.rail_point_count);
    let _ = writeln!(out, "ribbon_diag.vertex_count {}", diag.vertex_count);
    let _ = writeln!(out, "ribbon_diag.triangle_count {}", diag.triangle_count);
}

fn write_mesh(out: &mut String, mesh: &GeomMesh) {
    mesh.validate().expect("mesh should be internally consistent");

    let _ = writeln!(out, "mesh.vertex_count {}", mesh.positions.len());
    let _ = writeln!(out, "mesh.triangle_count {}", mesh.indices.len() / 3);
    let _ = writeln!(out, "mesh.has_normals {}", mesh.normals.is_some());

    let _ = writeln!(out, "mesh.positions {}", mesh.positions.len());
    for p in mesh.positions.iter().copied() {
        write_vec3_line(out, "p", p);
    }

    let _ = writeln!(out, "mesh.indices {}", mesh.indices.len());
    for tri in mesh.indices.chunks_exact(3) {
        let _ = writeln!(out, "i {} {} {}", tri[0], tri[1], tri[2]);
    }

    if let Some(normals) = mesh.normals.as_ref() {
        let _ = writeln!(out, "mesh.normals {}", normals.len());
        for n in normals.iter().copied() {
            write_vec3_line(out, "n", n);
        }
    } else {
        let _ = writeln!(out, "mesh.normals none");
    }
}

fn snapshot(op: &str, sections: impl FnOnce(&mut String)) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# curves-engine golden v1");
    let _ = writeln!(out, "op {op}");
    let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
    sections(&mut out);
    normalize_snapshot_text(&out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    StraightRibbon,
    BezierArchRibbon,
    BezierSRibbon,
    CatmullRibbon,
}

impl Scenario {
    const ALL: &'static [Scenario] = &[
        Scenario::StraightRibbon,
        Scenario::BezierArchRibbon,
        Scenario::BezierSRibbon,
        Scenario::CatmullRibbon,
    ];

    fn name(self) -> &'static str {
        match self {
            Scenario::StraightRibbon => "straight_ribbon",
            Scenario::BezierArchRibbon => "bezier_arch_ribbon",
            Scenario::BezierSRibbon => "bezier_s_ribbon",
            Scenario::CatmullRibbon => "catmull_ribbon",
        }
    }

    fn from_str(name: &str) -> Option<Self> {
        match name {
            "straight_ribbon" => Some(Scenario::StraightRibbon),
            "bezier_arch_ribbon" => Some(Scenario::BezierArchRibbon),
            "bezier_s_ribbon" => Some(Scenario::BezierSRibbon),
            "catmull_ribbon" => Some(Scenario::CatmullRibbon),
            _ => None,
        }
    }
}

struct ScenarioOutput {
    name: &'static str,
    mesh: GeomMesh,
    diagnostics: RibbonDiagnostics,
    snapshot: String,
}

fn run_scenario(scenario: Scenario) -> Result<ScenarioOutput, String> {
    match scenario {
        Scenario::StraightRibbon => scenario_straight_ribbon(),
        Scenario::BezierArchRibbon => scenario_bezier_arch_ribbon(),
        Scenario::BezierSRibbon => scenario_bezier_s_ribbon(),
        Scenario::CatmullRibbon => scenario_catmull_ribbon(),
    }
}

fn ribbon_output(
    name: &'static str,
    left: &[Point3],
    right: &[Point3],
    cross_resolution: usize,
    with_normals: bool,
) -> Result<ScenarioOutput, String> {
    let (mut mesh, diagnostics) =
        build_ribbon(left, right, cross_resolution).map_err(|e| e.to_string())?;

    if with_normals {
        mesh.normals = Some(compute_smooth_normals(&mesh));
    }

    let snap = snapshot(name, |out| {
        write_ribbon_diagnostics(out, &diagnostics);
        write_mesh(out, &mesh);
    });

    Ok(ScenarioOutput {
        name,
        mesh,
        diagnostics,
        snapshot: snap,
    })
}

fn scenario_straight_ribbon() -> Result<ScenarioOutput, String> {
    let left: Vec<Point3> = (0..5).map(|i| Point3::new(0.0, 0.0, f64::from(i))).collect();
    let right: Vec<Point3> = (0..5).map(|i| Point3::new(1.0, 0.0, f64::from(i))).collect();
    ribbon_output("straight_ribbon", &left, &right, 1, false)
}

fn scenario_bezier_arch_ribbon() -> Result<ScenarioOutput, String> {
    let path = BezierPath::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 3.0, 3.0),
        Point3::new(0.0, 3.0, 7.0),
        Point3::new(0.0, 0.0, 10.0),
    ])
    .map_err(|e| e.to_string())?;

    let (left, right) = path.sample_rails(12, 0.75, 90.0).map_err(|e| e.to_string())?;
    ribbon_output("bezier_arch_ribbon", &left, &right, 2, true)
}

fn scenario_bezier_s_ribbon() -> Result<ScenarioOutput, String> {
    let path = BezierPath::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(-2.5, 0.0, 2.5),
        Point3::new(2.5, 0.0, 7.5),
        Point3::new(0.0, 0.0, 10.0),
        Point3::new(-2.5, 0.0, 12.5),
        Point3::new(2.5, 0.0, 17.5),
        Point3::new(0.0, 0.0, 20.0),
    ])
    .map_err(|e| e.to_string())?;

    let (left, right) = path.sample_rails(10, 0.5, 90.0).map_err(|e| e.to_string())?;
    ribbon_output("bezier_s_ribbon", &left, &right, 1, false)
}

fn scenario_catmull_ribbon() -> Result<ScenarioOutput, String> {
    let spline = CatmullRomSpline::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.5, 0.5, 3.0),
        Point3::new(-1.0, 1.0, 6.0),
        Point3::new(0.5, 0.0, 9.0),
    ])
    .map_err(|e| e.to_string())?;

    let (left, right) = spline.sample_rails(8, 1.0).map_err(|e| e.to_string())?;
    ribbon_output("catmull_ribbon", &left, &right, 2, true)
}

struct Args {
    args: Vec<String>,
    pos: usize,
}

impl Args {
    fn new(args: Vec<String>) -> Self {
        Self { args, pos: 0 }
    }

    fn next(&mut self) -> Option<String> {
        let arg = self.args.get(self.pos)?.clone();
        self.pos += 1;
        Some(arg)
    }

    fn value(&mut self, flag: &str) -> Result<String, String> {
        self.next()
            .ok_or_else(|| format!("missing value for {flag}"))
    }
}
