#![forbid(unsafe_code)]

//! Walkthrough binary: runs the fit pass over a set of sample slides and
//! prints what the pass decided for each one.
//!
//! # Running
//!
//! ```sh
//! cargo run -p tcard-demo
//! cargo run -p tcard-demo -- --json
//! cargo run -p tcard-demo -- --width 1024 --height 576
//! ```
//!
//! Set `RUST_LOG=tcard_fit=debug` to watch each search step.

use tcard_dom::{ContentTree, NodeId, NodeKind};
use tcard_fit::{PassReport, TextMetricsProbe, Viewport, run_pass};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Fresh tree plus its root id.
fn slide() -> (ContentTree, NodeId) {
    let mut tree = ContentTree::with_root();
    let root = tree.root().expect("with_root always sets a root");
    (tree, root)
}

/// Lone heading, the classic title card.
fn title_slide() -> ContentTree {
    let (mut tree, root) = slide();
    let heading = tree.add_element(root, NodeKind::Heading);
    tree.add_text(heading, "Shipping the Renderer");
    tree
}

/// Heading plus one short line of prose.
fn hero_slide() -> ContentTree {
    let (mut tree, root) = slide();
    let heading = tree.add_element(root, NodeKind::Heading);
    tree.add_text(heading, "Why It Matters");
    let paragraph = tree.add_element(root, NodeKind::Paragraph);
    tree.add_text(paragraph, "One renderer, every backend, no redraw debt.");
    tree
}

/// A blockquote with body and attribution.
fn quote_slide() -> ContentTree {
    let (mut tree, root) = slide();
    let quote = tree.add_element(root, NodeKind::Blockquote);
    let body = tree.add_element(quote, NodeKind::Paragraph);
    tree.add_text(
        body,
        "Simplicity is a great virtue but it requires hard work to achieve it.",
    );
    let attribution = tree.add_element(quote, NodeKind::Paragraph);
    tree.add_text(attribution, "Edsger W. Dijkstra");
    tree
}

/// A single figure with a known intrinsic size.
fn image_slide() -> ContentTree {
    let (mut tree, root) = slide();
    let figure = tree.add_element(root, NodeKind::Figure);
    tree.set_intrinsic_px(figure, 1600.0, 900.0);
    tree
}

/// Heading plus a classed code listing, the decorator's home turf.
fn code_slide() -> ContentTree {
    let (mut tree, root) = slide();
    let heading = tree.add_element(root, NodeKind::Heading);
    tree.add_text(heading, "The Event Loop");
    let block = tree.add_element(root, NodeKind::CodeBlock);
    tree.add_class(block, "sourceCode");
    tree.add_class(block, "rust");
    let text = tree.add_element(block, NodeKind::CodeText);
    tree.add_class(text, "rust");
    tree.set_text(
        text,
        "loop {\n    let event = backend.poll()?;\n    let cmd = model.update(event);\n    frame.render(&model, cmd);\n}\n",
    );
    tree
}

/// Heading plus enough prose to cross the dense threshold.
fn dense_slide() -> ContentTree {
    let (mut tree, root) = slide();
    let heading = tree.add_element(root, NodeKind::Heading);
    tree.add_text(heading, "Migration Notes");
    for _ in 0..4 {
        let paragraph = tree.add_element(root, NodeKind::Paragraph);
        tree.add_text(
            paragraph,
            "Every widget moved to the retained tree in this release, so callers \
             that held raw buffer offsets must switch to node handles before the \
             compatibility shims are removed in the next one.",
        );
    }
    tree
}

fn sample_slides() -> Vec<(&'static str, ContentTree)> {
    vec![
        ("title", title_slide()),
        ("hero", hero_slide()),
        ("quote", quote_slide()),
        ("image", image_slide()),
        ("code", code_slide()),
        ("dense", dense_slide()),
        ("rootless", ContentTree::new()),
    ]
}

fn print_summary(name: &str, report: &PassReport) {
    let dense = if report.dense { " +dense" } else { "" };
    let labels: Vec<&str> = report
        .decorations
        .iter()
        .map(|d| d.label.as_str())
        .collect();
    let decorated = if labels.is_empty() {
        String::new()
    } else {
        format!("  [{}]", labels.join(", "))
    };
    println!(
        "{name:>10}  {category}{dense}  {state}  {verdict} in {iterations} probe rounds{decorated}",
        category = report.category,
        state = report.scale.state,
        verdict = report.scale.verdict,
        iterations = report.scale.iterations,
    );
}

fn arg_value(name: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != name).nth(1)
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let as_json = std::env::args().any(|a| a == "--json");
    let width: f64 = arg_value("--width")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1280.0);
    let height: f64 = arg_value("--height")
        .and_then(|s| s.parse().ok())
        .unwrap_or(720.0);

    let Some(viewport) = Viewport::new(width, height, 96.0, 72.0) else {
        eprintln!("Viewport {width}x{height} is not usable with 96x72 padding");
        std::process::exit(1);
    };

    tracing::info!(width, height, "running the fit pass over sample slides");

    for (name, mut tree) in sample_slides() {
        let mut probe = TextMetricsProbe::new(viewport);
        match run_pass(&mut tree, &mut probe) {
            Some(report) => {
                if as_json {
                    match serde_json::to_string_pretty(&report) {
                        Ok(json) => println!("{json}"),
                        Err(e) => eprintln!("{name}: report did not serialize: {e}"),
                    }
                } else {
                    print_summary(name, &report);
                }
            }
            None => println!("{name:>10}  (no content root, left untouched)"),
        }
    }
}
