//! Build script for segmask-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time
//! - Emits the validated settings as constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use segmask_core::config::CHIPS;
use segmask_core::{compile, find_chip};

fn main() {
    setup_linker();
    let settings = validate_config();
    emit_config(&settings);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Settings read from the [display] table
struct Settings {
    driver: String,
    mask: String,
    right_aligned: bool,
    descending: bool,
    zero_padding: bool,
    cascaded: bool,
}

/// Validate display.toml configuration at compile time
fn validate_config() -> Settings {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");
    if !config_path.exists() {
        fail(
            "display.toml not found",
            &["The firmware requires a display.toml configuration file."],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read display.toml", &[&e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in display.toml", &[&e.to_string()]),
    };

    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t,
        _ => fail("Missing [display] section", &[]),
    };

    let mut errors: Vec<String> = Vec::new();

    let driver = match display.get("driver") {
        Some(toml::Value::String(name)) => {
            if find_chip(name).is_none() {
                let known: Vec<&str> = CHIPS.iter().map(|c| c.name).collect();
                errors.push(format!(
                    "unknown driver '{}' (expected one of {})",
                    name,
                    known.join(", ")
                ));
            }
            name.clone()
        }
        _ => {
            errors.push("missing 'driver'".to_string());
            String::new()
        }
    };

    let mask = match display.get("mask") {
        Some(toml::Value::String(mask)) => {
            if let Err(e) = compile(mask) {
                errors.push(format!("mask '{}': {}", mask, e));
            }
            mask.clone()
        }
        _ => {
            errors.push("missing 'mask'".to_string());
            String::new()
        }
    };

    let right_aligned = match display.get("alignment") {
        None => false,
        Some(toml::Value::String(s)) if s == "left" => false,
        Some(toml::Value::String(s)) if s == "right" => true,
        Some(_) => {
            errors.push("alignment must be 'left' or 'right'".to_string());
            false
        }
    };

    let descending = match display.get("wiring") {
        None => false,
        Some(toml::Value::String(s)) if s == "ascending" => false,
        Some(toml::Value::String(s)) if s == "descending" => true,
        Some(_) => {
            errors.push("wiring must be 'ascending' or 'descending'".to_string());
            false
        }
    };

    let zero_padding = flag(display, "zero_padding", &mut errors);
    let cascaded = flag(display, "cascaded", &mut errors);

    if cascaded {
        if let Some(chip) = find_chip(&driver) {
            if !chip.cascadable {
                errors.push(format!("driver '{}' cannot be cascaded", driver));
            }
        }
    }

    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail("Invalid display configuration", &lines);
    }

    Settings {
        driver,
        mask,
        right_aligned,
        descending,
        zero_padding,
        cascaded,
    }
}

fn flag(table: &toml::Table, key: &str, errors: &mut Vec<String>) -> bool {
    match table.get(key) {
        None => false,
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push(format!("'{}' must be true or false", key));
            false
        }
    }
}

/// Write the settings as Rust constants into OUT_DIR
fn emit_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let alignment = if settings.right_aligned { "Right" } else { "Left" };
    let wiring = if settings.descending {
        "Descending"
    } else {
        "Ascending"
    };

    let source = format!(
        "pub const DRIVER: &str = {:?};\n\
         pub const MASK: &str = {:?};\n\
         pub const CASCADED: bool = {};\n\
         pub const RENDER: segmask_core::RenderConfig = segmask_core::RenderConfig {{\n    \
             alignment: segmask_core::Alignment::{},\n    \
             wiring: segmask_core::Wiring::{},\n    \
             zero_padding: {},\n\
         }};\n",
        settings.driver, settings.mask, settings.cascaded, alignment, wiring, settings.zero_padding
    );

    fs::write(out_dir.join("display_config.rs"), source).unwrap();
}

fn fail(title: &str, lines: &[&str]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
