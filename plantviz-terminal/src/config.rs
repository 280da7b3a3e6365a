/// Host settings, read from the command line
use plantviz_core::ViewerSettings;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TRANSLATION_STEP: f32 = 5.0;
pub const DEFAULT_TARGET_FPS: u32 = 30;

pub const USAGE: &str = "\
Usage: plantviz-terminal [OPTIONS]

Options:
  --edge-radius <f32>  Radius of wireframe edge cylinders (default 0.5)
  --dedup-edges        Draw edges shared by two faces once
  --step <f32>         Distance moved per key press, positive (default 5)
  --fps <u32>          Target frame rate (default 30)
  -h, --help           Print this help";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' needs a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for '{option}'")]
    InvalidValue { option: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostSettings {
    /// Units moved by one W/A/S/D press
    pub translation_step: f32,
    pub target_fps: u32,
    pub viewer: ViewerSettings,
}

impl HostSettings {
    /// Parse options, not including the program name
    ///
    /// Returns `Ok(None)` when help was asked for.
    pub fn from_args<I, S>(args: I) -> Result<Option<Self>, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--dedup-edges" => settings.viewer.dedup_edges = true,
                "--edge-radius" => {
                    let radius: f32 = parse_value(&arg, args.next())?;
                    if !(radius.is_finite() && radius > 0.0) {
                        return Err(invalid(&arg, &radius.to_string()));
                    }
                    settings.viewer.edge_radius = radius;
                }
                "--step" => {
                    let step: f32 = parse_value(&arg, args.next())?;
                    if !(step.is_finite() && step > 0.0) {
                        return Err(invalid(&arg, &step.to_string()));
                    }
                    settings.translation_step = step;
                }
                "--fps" => {
                    let fps: u32 = parse_value(&arg, args.next())?;
                    if fps == 0 {
                        return Err(invalid(&arg, "0"));
                    }
                    settings.target_fps = fps;
                }
                _ => return Err(ConfigError::UnknownOption(arg)),
            }
        }

        Ok(Some(settings))
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.target_fps.max(1)))
    }
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            translation_step: DEFAULT_TRANSLATION_STEP,
            target_fps: DEFAULT_TARGET_FPS,
            viewer: ViewerSettings::default(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(option: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(option.to_string()))?;
    value.parse().map_err(|_| invalid(option, &value))
}

fn invalid(option: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}
