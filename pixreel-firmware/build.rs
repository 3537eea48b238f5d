//! Build script for pixreel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates player.toml at compile time
//! - Checks frames.bin is a whole number of 8-byte frames

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Bytes per frame record (one byte per matrix row)
const FRAME_SIZE: u64 = 8;

fn main() {
    setup_linker();
    validate_config();
    validate_frames();
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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate player.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=player.toml");

    let config_path = Path::new("player.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: player.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a player.toml configuration file.           ║\n\
            ║  Please create one in the pixreel-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read player.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in player.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_ranges(&config, &mut errors);
    report("Invalid player configuration", &errors);

    println!("cargo:warning=player.toml validated successfully");
}

/// Check frames.bin exists and holds whole frames
fn validate_frames() {
    println!("cargo:rerun-if-changed=frames.bin");

    let len = match fs::metadata("frames.bin") {
        Ok(meta) => meta.len(),
        Err(e) => {
            report("frames.bin not readable", &[e.to_string()]);
            return;
        }
    };

    if len % FRAME_SIZE != 0 {
        report(
            "frames.bin is not a whole number of frames",
            &[format!(
                "{} bytes is not a multiple of the {}-byte frame size",
                len, FRAME_SIZE
            )],
        );
    }

    println!("cargo:warning=frames.bin holds {} frames", len / FRAME_SIZE);
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

/// Fail the build listing `errors`, if there are any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Known sections and the keys each accepts
const SECTIONS: &[(&str, &[&str])] = &[
    ("playback", &["frame_rate"]),
    ("input", &["active_low", "debounce_ms", "poll_interval_ms", "long_press_ms"]),
    ("display", &["brightness", "idle_refresh_ms"]),
    ("watchdog", &["timeout_ms"]),
];

/// Reject unknown sections and keys
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, section) in root {
        let Some(&(_, keys)) = SECTIONS.iter().find(|(known, _)| *known == name.as_str()) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };

        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };

        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

/// Read an integer field, recording a type error
fn int(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(v)) => Some(*v),
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => None,
    }
}

/// Validate value ranges and the watchdog window
fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let frame_rate = int(config, "playback", "frame_rate", errors).unwrap_or(30);
    let debounce = int(config, "input", "debounce_ms", errors).unwrap_or(50);
    let poll = int(config, "input", "poll_interval_ms", errors).unwrap_or(10);
    let long_press = int(config, "input", "long_press_ms", errors).unwrap_or(2000);
    let brightness = int(config, "display", "brightness", errors).unwrap_or(2);
    let idle = int(config, "display", "idle_refresh_ms", errors).unwrap_or(100);
    let timeout = int(config, "watchdog", "timeout_ms", errors).unwrap_or(2000);

    if let Some(v) = config.get("input").and_then(|s| s.get("active_low")) {
        if !v.is_bool() {
            errors.push("[input] active_low must be true or false".to_string());
        }
    }

    if !(1..=1000).contains(&frame_rate) {
        errors.push("[playback] frame_rate must be 1-1000".to_string());
    }
    if !(0..=15).contains(&brightness) {
        errors.push("[display] brightness must be 0-15".to_string());
    }
    if debounce < 0 || idle < 0 {
        errors.push("durations cannot be negative".to_string());
    }
    if poll < 1 {
        errors.push("[input] poll_interval_ms must be at least 1".to_string());
    }
    if long_press <= debounce {
        errors.push("[input] long_press_ms must exceed debounce_ms".to_string());
    }

    let frame_interval = 1000 / frame_rate.max(1);
    // Bounce: debounce then idle. Release: last poll then idle or pace.
    let longest_unfed = debounce.max(poll) + frame_interval.max(idle);
    if !(1..=8300).contains(&timeout) {
        errors.push("[watchdog] timeout_ms must be 1-8300".to_string());
    } else if timeout <= longest_unfed {
        errors.push(format!(
            "[watchdog] timeout_ms must exceed the longest unfed stretch ({} ms)",
            longest_unfed
        ));
    }
}
