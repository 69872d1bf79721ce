//! Build script for osdlink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates osd.toml and turns it into a const `OsdConfig`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use osdlink_core::config::OsdConfig;
use osdlink_core::osd::COLUMNS;

/// Longest line the protocol's reader can hold
const MAX_LINE_LEN: u16 = 256;

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate osd.toml
fn load_config() -> OsdConfig {
    println!("cargo:rerun-if-changed=osd.toml");

    let config_path = Path::new("osd.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: osd.toml not found!                                      ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires an osd.toml configuration file.           ║\n\
            ║  Please create one in the osdlink-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read osd.toml                                  ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: OsdConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid osd.toml                                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let errors = validate(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: osd.toml validation failed                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&errors.join("\n"))
        );
    }

    println!("cargo:warning=osd.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate(config: &OsdConfig) -> Vec<String> {
    let mut errors = Vec::new();
    let video = &config.video;
    let serial = &config.serial;

    if video.x_min >= COLUMNS {
        errors.push(format!("video.x_min {} must be below {}", video.x_min, COLUMNS));
    }
    let rows = video.standard.rows();
    if video.y_min >= rows {
        errors.push(format!(
            "video.y_min {} must be below {} for {:?}",
            video.y_min, rows, video.standard
        ));
    }

    if serial.baudrate == 0 {
        errors.push("serial.baudrate must be non-zero".to_string());
    }
    if !(2..=MAX_LINE_LEN).contains(&serial.line_len) {
        errors.push(format!(
            "serial.line_len {} must be within 2..={}",
            serial.line_len, MAX_LINE_LEN
        ));
    }
    if serial.timeout_ms == 0 {
        errors.push("serial.timeout_ms must be non-zero".to_string());
    }

    if config.poll.max_polls == 0 {
        errors.push("poll.max_polls must be at least 1".to_string());
    }

    errors
}

/// Write `OSD_CONFIG` for `main.rs` to include
fn generate_config(config: &OsdConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let video = &config.video;
    let serial = &config.serial;
    let poll = &config.poll;

    let source = format!(
        "/// Settings compiled from osd.toml\n\
         pub const OSD_CONFIG: OsdConfig = OsdConfig {{\n    \
             video: VideoConfig {{\n        \
                 standard: VideoStandard::{:?},\n        \
                 x_min: {},\n        \
                 y_min: {},\n    \
             }},\n    \
             serial: SerialConfig {{\n        \
                 baudrate: {},\n        \
                 line_len: {},\n        \
                 timeout_ms: {},\n    \
             }},\n    \
             poll: PollConfig {{\n        \
                 reset_settle_us: {},\n        \
                 interval_us: {},\n        \
                 max_polls: {},\n    \
             }},\n\
         }};\n",
        video.standard,
        video.x_min,
        video.y_min,
        serial.baudrate,
        serial.line_len,
        serial.timeout_ms,
        poll.reset_settle_us,
        poll.interval_us,
        poll.max_polls,
    );

    fs::write(out_dir.join("osd_config.rs"), source).unwrap();
}
