//! Build script for sensorlab-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time and generates the
//!   `board_config.rs` constants included by `sensorlab_firmware::config`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sensorlab_core::config::{
    BoardConfig, ConfigError, DataRate, FullScale, ImuConfig, LedConfig, SerialConfig,
};
use serde::Deserialize;

const MIN_I2C_FREQUENCY_HZ: u32 = 10_000;
const MAX_I2C_FREQUENCY_HZ: u32 = 1_000_000;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardToml {
    #[serde(default)]
    serial: SerialSection,
    #[serde(default)]
    led: LedSection,
    #[serde(default)]
    imu: ImuSection,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SerialSection {
    baudrate: u32,
}

impl Default for SerialSection {
    fn default() -> Self {
        Self {
            baudrate: SerialConfig::default().baudrate,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LedSection {
    blink_interval_ms: u32,
    active_low: bool,
}

impl Default for LedSection {
    fn default() -> Self {
        let led = LedConfig::default();
        Self {
            blink_interval_ms: led.blink_interval_ms,
            active_low: led.active_low,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ImuSection {
    full_scale_g: u8,
    data_rate_hz: u16,
    poll_interval_ms: u32,
    i2c_frequency_hz: u32,
}

impl Default for ImuSection {
    fn default() -> Self {
        let imu = ImuConfig::default();
        Self {
            full_scale_g: imu.full_scale.as_g(),
            data_rate_hz: imu.data_rate.as_hz(),
            poll_interval_ms: imu.poll_interval_ms,
            i2c_frequency_hz: 400_000,
        }
    }
}

fn main() {
    setup_linker();
    generate_config();
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

/// Validate board.toml and write the generated constants
fn generate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the sensorlab-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let raw: BoardToml = match toml::from_str(&content) {
        Ok(raw) => raw,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let (board, i2c_frequency_hz) = match build_config(&raw) {
        Ok(config) => config,
        Err(errors) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid values in board.toml                             ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                errors
                    .iter()
                    .map(|e| format!("║  • {:<62} ║", e))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
        }
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(
        out_dir.join("board_config.rs"),
        render_config(&board, i2c_frequency_hz),
    )
    .unwrap();

    println!("cargo:warning=board.toml validated successfully");
}

/// Convert the raw sections, collecting every problem
fn build_config(raw: &BoardToml) -> Result<(BoardConfig, u32), Vec<String>> {
    let mut errors = Vec::new();

    let full_scale = FullScale::from_g(raw.imu.full_scale_g).unwrap_or_else(|e| {
        errors.push(describe(e, &raw.imu.full_scale_g.to_string()));
        FullScale::default()
    });

    let data_rate = DataRate::from_hz(raw.imu.data_rate_hz).unwrap_or_else(|e| {
        errors.push(describe(e, &raw.imu.data_rate_hz.to_string()));
        DataRate::default()
    });

    let board = BoardConfig {
        serial: SerialConfig {
            baudrate: raw.serial.baudrate,
        },
        led: LedConfig {
            blink_interval_ms: raw.led.blink_interval_ms,
            active_low: raw.led.active_low,
        },
        imu: ImuConfig {
            full_scale,
            data_rate,
            poll_interval_ms: raw.imu.poll_interval_ms,
        },
    };

    if let Err(e) = board.serial.validate() {
        errors.push(describe(e, &raw.serial.baudrate.to_string()));
    }
    if let Err(e) = board.led.validate() {
        errors.push(describe(e, &raw.led.blink_interval_ms.to_string()));
    }
    if let Err(e) = board.imu.validate() {
        errors.push(describe(e, &raw.imu.poll_interval_ms.to_string()));
    }

    let i2c = raw.imu.i2c_frequency_hz;
    if !(MIN_I2C_FREQUENCY_HZ..=MAX_I2C_FREQUENCY_HZ).contains(&i2c) {
        errors.push(format!(
            "imu.i2c_frequency_hz = {} (expected {}..={})",
            i2c, MIN_I2C_FREQUENCY_HZ, MAX_I2C_FREQUENCY_HZ
        ));
    }

    if errors.is_empty() {
        Ok((board, i2c))
    } else {
        Err(errors)
    }
}

fn describe(error: ConfigError, value: &str) -> String {
    let what = match error {
        ConfigError::BlinkIntervalOutOfRange => "led.blink_interval_ms out of range",
        ConfigError::PollIntervalOutOfRange => "imu.poll_interval_ms out of range",
        ConfigError::UnsupportedFullScale => "imu.full_scale_g unsupported",
        ConfigError::UnsupportedDataRate => "imu.data_rate_hz unsupported",
        ConfigError::UnsupportedBaudrate => "serial.baudrate unsupported",
    };
    format!("{} ({})", what, value)
}

/// Render the generated constants
fn render_config(board: &BoardConfig, i2c_frequency_hz: u32) -> String {
    format!(
        "// Generated by build.rs from board.toml\n\
         \n\
         /// Board configuration\n\
         pub const BOARD: BoardConfig = BoardConfig {{\n    \
             serial: SerialConfig {{ baudrate: {baudrate} }},\n    \
             led: LedConfig {{ blink_interval_ms: {blink}, active_low: {active_low} }},\n    \
             imu: ImuConfig {{\n        \
                 full_scale: FullScale::{full_scale:?},\n        \
                 data_rate: DataRate::{data_rate:?},\n        \
                 poll_interval_ms: {poll},\n    \
             }},\n\
         }};\n\
         \n\
         /// IMU bus clock\n\
         pub const I2C_FREQUENCY_HZ: u32 = {i2c};\n",
        baudrate = board.serial.baudrate,
        blink = board.led.blink_interval_ms,
        active_low = board.led.active_low,
        full_scale = board.imu.full_scale,
        data_rate = board.imu.data_rate,
        poll = board.imu.poll_interval_ms,
        i2c = i2c_frequency_hz,
    )
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            // Count chars, toml errors may echo non-ASCII input
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
