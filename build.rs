//! Build script to embed the level catalog
//!
//! Scans assets/levels/ and generates a Rust source listing every level
//! file with its contents, since WASM can't enumerate directories at runtime.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=assets/levels");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let levels_dir = Path::new(&manifest_dir).join("assets/levels");
    let out_path = Path::new(&env::var("OUT_DIR").unwrap()).join("levels.rs");

    let mut levels: Vec<_> = if levels_dir.exists() {
        fs::read_dir(&levels_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext.to_ascii_lowercase() == "ron")
                    .unwrap_or(false)
            })
            .collect()
    } else {
        Vec::new()
    };

    levels.sort_by_key(|e| e.file_name());

    let mut source = String::from("pub const BUILTIN_LEVELS: &[(&str, &str)] = &[\n");
    for entry in levels {
        let file_name = entry.file_name().to_string_lossy().to_string();
        let full_path = entry.path().to_string_lossy().to_string();
        // Debug formatting yields an escaped string literal on every platform
        source.push_str(&format!(
            "    ({:?}, include_str!({:?})),\n",
            file_name, full_path
        ));
    }
    source.push_str("];\n");

    let mut file = fs::File::create(out_path).unwrap();
    file.write_all(source.as_bytes()).unwrap();
}
