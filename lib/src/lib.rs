#![warn(clippy::match_same_arms)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::unnecessary_wraps)]

#[macro_use]
mod util;
mod config;
mod consts;
mod display;
mod errors;
mod status;

pub use crate::config::ToggleConfig;
pub use crate::display::{DisplayServer, Xrandr};
pub use crate::errors::TogglebrightError;
use crate::errors::*;
pub use crate::status::OutputStatus;
use crate::status::select_output;

make_log_macro!(debug, "togglebright");

/// Used to construct [`Togglebright`]
#[derive(Default)]
pub struct TogglebrightBuilder<'a> {
    output: Option<&'a str>,
    config: Option<ToggleConfig>,
}

impl<'a> TogglebrightBuilder<'a> {
    /// Create a new [`TogglebrightBuilder`].
    pub fn new() -> Self {
        TogglebrightBuilder::default()
    }

    /// Name of the output to act on. Defaults to the primary connected
    /// output the display server reports, or the first connected one.
    pub fn with_output(mut self, output: &'a str) -> Self {
        self.output = Some(output);
        self
    }

    /// Defaults to [`ToggleConfig::default()`].
    pub fn with_config(mut self, config: ToggleConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the constructed [`Togglebright`] instance, backed by
    /// [`Xrandr`].
    pub fn build(self) -> Result<Togglebright> {
        Togglebright::with_display_server(
            Xrandr::new(),
            self.output.map(str::to_string),
            self.config.unwrap_or_default(),
        )
    }
}

/// Two-level brightness toggler for a single display output.
pub struct Togglebright<D = Xrandr> {
    display: D,
    output: Option<String>,
    config: ToggleConfig,
}

impl<D: DisplayServer> Togglebright<D> {
    /// Build against a specific [`DisplayServer`] implementation, for tests
    /// or for display servers other than xrandr.
    pub fn with_display_server(
        display: D,
        output: Option<String>,
        config: ToggleConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Togglebright {
            display,
            output,
            config,
        })
    }

    /// Toggle the selected output between the two configured levels based on
    /// its current reading: one status read, then exactly one write, in that
    /// order. Any failure before the write leaves the output untouched.
    /// Returns the value written.
    pub async fn toggle(&self) -> Result<f64> {
        let outputs = self.display.outputs().await?;
        let output = select_output(&outputs, self.output.as_deref())?;
        let reading = output
            .brightness
            .ok_or_else(|| TogglebrightError::MissingBrightness(output.name.clone()))?;
        let target = self.config.target_for(reading);
        self.display.set_brightness(&output.name, target).await?;
        debug!("{}: {} -> {}", output.name, reading, target);
        Ok(target)
    }

    /// Get the current brightness of the selected output.
    /// Brightness is in range 0.0 to 1.0 (inclusive).
    pub async fn get_brightness(&self) -> Result<f64> {
        let outputs = self.display.outputs().await?;
        let output = select_output(&outputs, self.output.as_deref())?;
        output
            .brightness
            .ok_or_else(|| TogglebrightError::MissingBrightness(output.name.clone()))
    }

    /// Set the brightness of the selected output.
    /// Brightness is in range 0.0 to 1.0 (inclusive).
    pub async fn set_brightness(&self, value: f64) -> Result<()> {
        let name = match &self.output {
            Some(name) => name.clone(),
            None => {
                let outputs = self.display.outputs().await?;
                select_output(&outputs, None)?.name.clone()
            }
        };
        self.display.set_brightness(&name, value).await
    }
}
