use std::path::PathBuf;

use syntax_tblgen::{Action, Category, Generator, GeneratorConfig, RecordKeeper, Target};

fn main() -> anyhow::Result<()> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let schema = manifest_dir.join("../syntax-tblgen/tests/fixtures/syntax.json");
    println!("cargo:rerun-if-changed={}", schema.display());

    let records = RecordKeeper::load(&schema)?;
    let generator = Generator::new(&records, GeneratorConfig::default());

    // Every category lands in one module: nested slots refer to node types
    // of other categories.
    let mut nodes = String::new();
    for category in Category::ALL {
        for action in [Action::Interface, Action::Implementation] {
            nodes.push_str(&generator.generate(action, Target::Syntax(category))?);
            nodes.push('\n');
        }
    }

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    std::fs::write(out_dir.join("nodes.rs"), nodes)?;
    Ok(())
}
