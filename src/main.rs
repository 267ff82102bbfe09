use quire::{InteractiveOptions, PrintPipelineBuilder, QuireError, parse_document, render_preview_html};
use std::env;
use std::fs;

/// Renders a document instruction file to PDF, and optionally to an HTML
/// preview page.
fn main() -> Result<(), QuireError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!("Renders a quire document instruction file.");
        eprintln!();
        eprintln!("Usage: {} <document.json> <output.pdf> [preview.html]", args[0]);
        eprintln!();
        eprintln!("To run the demos:");
        eprintln!("  cargo run --example report");
        eprintln!("  cargo run --example preview");
        std::process::exit(1);
    }

    println!("Loading document from {}", args[1]);
    let source = fs::read_to_string(&args[1])?;
    let doc = parse_document(&source)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let pipeline = PrintPipelineBuilder::new().build()?;
    let bytes = runtime.block_on(pipeline.generate(&doc))?;
    fs::write(&args[2], bytes)?;
    println!("Wrote {}", args[2]);

    if let Some(preview) = args.get(3) {
        fs::write(preview, render_preview_html(&doc, &InteractiveOptions::default()))?;
        println!("Wrote {}", preview);
    }
    Ok(())
}
