//! Build script for jestbox-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time
//! - Checks that jokes.min.json holds one `[setup, punchline]` pair per line

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const SECTIONS: &[&str] = &[
    "display",
    "led",
    "jokes",
    "weather",
    "echo",
    "scheduler",
    "network",
];

const MAX_URL_LEN: usize = 256;

fn main() {
    setup_linker();
    validate_config();
    validate_jokes();

    // Secrets are baked in with option_env!
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASS");
    println!("cargo:rerun-if-env-changed=WEATHER_API_KEY");
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

fn fail(title: &str, lines: &[String]) -> ! {
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
            .map(|line| format!("║  • {:<62} ║", truncate(line, 62)))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn truncate(line: &str, width: usize) -> String {
    if line.chars().count() > width {
        let head: String = line.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}

fn read(path: &Path) -> String {
    println!("cargo:rerun-if-changed={}", path.display());

    if !path.exists() {
        fail(
            &format!("{} not found", path.display()),
            &[format!(
                "Create {} in the jestbox-firmware directory",
                path.display()
            )],
        );
    }

    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(&format!("failed to read {}", path.display()), &[e.to_string()]),
    }
}

/// Validate device.toml at compile time
fn validate_config() {
    let content = read(Path::new("device.toml"));

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "invalid TOML syntax in device.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    if let Some(table) = config.as_table() {
        for name in table.keys() {
            if !SECTIONS.contains(&name.as_str()) {
                errors.push(format!("Unknown section [{}]", name));
            }
        }
    }

    validate_display(&config, &mut errors);
    validate_led(&config, &mut errors);
    validate_url(&config, "jokes", "url", &mut errors);
    validate_url(&config, "echo", "url", &mut errors);
    validate_weather(&config, &mut errors);
    validate_interval(&config, "scheduler", "poll_interval_ms", &mut errors);
    validate_interval(&config, "network", "check_interval_ms", &mut errors);

    if !errors.is_empty() {
        fail("invalid device.toml", &errors);
    }

    println!("cargo:warning=device.toml validated successfully");
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(value) = config.get("display").and_then(|d| d.get("backlight")) {
        match value.as_integer() {
            Some(percent) if (0..=100).contains(&percent) => {}
            _ => errors.push(format!(
                "[display] backlight must be 0-100, got {}",
                value
            )),
        }
    }
}

fn validate_led(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(led) = config.get("led") else {
        return;
    };

    for key in ["idle", "busy"] {
        let Some(value) = led.get(key) else {
            continue;
        };
        let valid = value.as_array().is_some_and(|channels| {
            channels.len() == 3
                && channels
                    .iter()
                    .all(|c| c.as_integer().is_some_and(|c| (0..=255).contains(&c)))
        });
        if !valid {
            errors.push(format!("[led] {} must be [r, g, b] with 0-255 channels", key));
        }
    }
}

fn validate_url(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
        return;
    };

    match value.as_str() {
        Some(url) if url.starts_with("https://") => errors.push(format!(
            "[{}] {}: https is not supported, use http://",
            section, key
        )),
        Some(url) if !url.starts_with("http://") => {
            errors.push(format!("[{}] {} must start with http://", section, key))
        }
        Some(url) if url.len() > MAX_URL_LEN => errors.push(format!(
            "[{}] {} is longer than {} bytes",
            section, key, MAX_URL_LEN
        )),
        Some(_) => {}
        None => errors.push(format!("[{}] {} must be a string", section, key)),
    }
}

fn validate_weather(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(weather) = config.get("weather") else {
        return;
    };

    for (key, limit) in [("latitude", 90.0), ("longitude", 180.0)] {
        let Some(value) = weather.get(key) else {
            continue;
        };
        let number = value
            .as_float()
            .or_else(|| value.as_integer().map(|i| i as f64));
        match number {
            Some(n) if (-limit..=limit).contains(&n) => {}
            _ => errors.push(format!("[weather] {} must be within +/-{}", key, limit)),
        }
    }

    validate_url(config, "weather", "url_template", errors);

    if let Some(template) = weather.get("url_template").and_then(|t| t.as_str()) {
        for placeholder in ["{latitude}", "{longitude}"] {
            if !template.contains(placeholder) {
                errors.push(format!("[weather] url_template lacks {}", placeholder));
            }
        }
        if template.contains("{api_key}") && env::var("WEATHER_API_KEY").is_err() {
            println!(
                "cargo:warning=url_template uses {{api_key}} but WEATHER_API_KEY is not set; \
                 the device will halt at startup"
            );
        }
    }
}

fn validate_interval(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
        match value.as_integer() {
            Some(ms) if ms > 0 && ms <= u32::MAX as i64 => {}
            _ => errors.push(format!("[{}] {} must be a positive integer", section, key)),
        }
    }
}

/// Check the local joke file line by line
fn validate_jokes() {
    let content = read(Path::new("jokes.min.json"));

    let mut errors = Vec::new();
    let mut count = 0;

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<(String, String)>(line) {
            Ok(_) => count += 1,
            Err(e) => errors.push(format!("line {}: {}", index + 1, e)),
        }
    }

    if count == 0 && errors.is_empty() {
        errors.push("no jokes found".to_string());
    }

    if !errors.is_empty() {
        fail("invalid jokes.min.json", &errors);
    }

    println!("cargo:warning=jokes.min.json: {} jokes", count);
}
