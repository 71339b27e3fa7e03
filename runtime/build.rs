use std::{
    env,
    error::Error,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

const CONFIG_ENV: &str = "RUNTIME_DEVICE_CONFIG";
const MAINARGS_ENV: &str = "RUNTIME_MAINARGS";

#[derive(Debug, Deserialize)]
struct DeviceFile {
    memory: MemoryConfig,
    #[serde(default)]
    devices: Vec<DeviceConfig>,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Debug, Deserialize)]
struct MemoryConfig {
    memory_base: u64,
    /// In MiB.
    memory_size: u64,
}

#[derive(Debug, Deserialize)]
struct DeviceConfig {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    base: u64,
    size: u64,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RuntimeConfig {
    mainargs: String,
    heap_size: u64,
    log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mainargs: String::new(),
            heap_size: 4096,
            log_level: "info".to_string(),
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

impl DeviceFile {
    fn device(&self, kind: &str) -> Result<&DeviceConfig, Box<dyn Error>> {
        self.devices
            .iter()
            .find(|dev| dev.enabled && dev.kind == kind)
            .ok_or_else(|| format!("device file has no enabled device of type `{kind}`").into())
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if !self.memory.memory_size.is_power_of_two() {
            return Err(format!(
                "memory_size must be a power of two (MiB), got {}",
                self.memory.memory_size
            )
            .into());
        }
        if self.runtime.heap_size == 0 {
            return Err("heap_size must be non-zero".into());
        }
        for dev in self.devices.iter().filter(|dev| dev.enabled) {
            if dev.size == 0 {
                return Err(format!("device `{}` has an empty register window", dev.name).into());
            }
        }
        Ok(())
    }
}

fn level_filter(level: &str) -> Result<&'static str, Box<dyn Error>> {
    Ok(match level.to_ascii_lowercase().as_str() {
        "off" => "Off",
        "error" => "Error",
        "warn" => "Warn",
        "info" => "Info",
        "debug" => "Debug",
        "trace" => "Trace",
        other => return Err(format!("unknown log_level `{other}`").into()),
    })
}

fn render(file: &DeviceFile, mainargs: &str) -> Result<String, Box<dyn Error>> {
    let uart = file.device("uart")?;
    let timer = file.device("timer")?;
    let memory_size = file.memory.memory_size * 1024 * 1024;

    let mut out = String::new();
    writeln!(out, "// Generated by build.rs from the device file.")?;
    writeln!(out, "pub const MEMORY_BASE: usize = {:#x};", file.memory.memory_base)?;
    writeln!(out, "pub const MEMORY_SIZE: usize = {memory_size:#x};")?;
    writeln!(out, "pub const UART_BASE: usize = {:#x};", uart.base)?;
    writeln!(out, "pub const UART_SIZE: usize = {:#x};", uart.size)?;
    writeln!(out, "pub const TIMER_BASE: usize = {:#x};", timer.base)?;
    writeln!(out, "pub const TIMER_SIZE: usize = {:#x};", timer.size)?;
    writeln!(out, "pub const HEAP_SIZE: usize = {};", file.runtime.heap_size)?;
    writeln!(out, "pub const MAINARGS: &str = {mainargs:?};")?;
    writeln!(
        out,
        "pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::{};",
        level_filter(&file.runtime.log_level)?
    )?;
    Ok(out)
}

fn linker_script(file: &DeviceFile) -> String {
    format!(
        r#"OUTPUT_ARCH(riscv)
ENTRY(_start)

MEMORY
{{
    RAM : ORIGIN = {base:#x}, LENGTH = {size}M
}}

SECTIONS
{{
    .text : {{
        KEEP(*(.text.entry))
        *(.text .text.*)
    }} > RAM

    .rodata : ALIGN(8) {{
        *(.srodata .srodata.*)
        *(.rodata .rodata.*)
    }} > RAM

    .data : ALIGN(8) {{
        *(.sdata .sdata.*)
        *(.data .data.*)
    }} > RAM

    .bss (NOLOAD) : ALIGN(8) {{
        *(.sbss .sbss.*)
        *(.bss .bss.*)
    }} > RAM

    . = ALIGN(16);
    _heap_start = .;
    _stack_top = ORIGIN(RAM) + LENGTH(RAM);

    /DISCARD/ : {{ *(.eh_frame) }}
}}
"#,
        base = file.memory.memory_base,
        size = file.memory.memory_size,
    )
}

fn config_path(manifest_dir: &Path) -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| manifest_dir.join("device.toml"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let path = config_path(&manifest_dir);

    println!("cargo:rerun-if-changed={}", path.display());
    println!("cargo:rerun-if-env-changed={CONFIG_ENV}");
    println!("cargo:rerun-if-env-changed={MAINARGS_ENV}");

    let text = fs::read_to_string(&path)
        .map_err(|e| format!("failed to read device file {}: {e}", path.display()))?;
    let file: DeviceFile = toml::from_str(&text)
        .map_err(|e| format!("failed to parse device file {}: {e}", path.display()))?;
    file.validate()?;

    let mainargs = env::var(MAINARGS_ENV).unwrap_or_else(|_| file.runtime.mainargs.clone());
    fs::write(out_dir.join("device_config.rs"), render(&file, &mainargs)?)?;

    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("none") {
        fs::write(out_dir.join("link.x"), linker_script(&file))?;
        println!("cargo:rustc-link-search={}", out_dir.display());
    }

    Ok(())
}
