use std::env;
use std::fs;
use std::process;
use sysmap::ir::Diagram;
use sysmap::layout::LayoutEngine;
use sysmap::svg::SvgRenderer;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.json> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>   Output file (default: stdout)");
        eprintln!("  --report              Print the spatial report instead of SVG");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut report_only = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "--report" => report_only = true,
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let diagram = match Diagram::from_path(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to load {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let layout = LayoutEngine::for_diagram(&diagram).layout(&diagram);

    let output = if report_only {
        format!("{}\n", layout.report)
    } else {
        SvgRenderer::default().render(&diagram, &layout)
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}
