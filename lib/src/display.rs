#[cfg(test)]
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::consts::*;
use crate::errors::*;
use crate::status::{OutputStatus, parse_outputs};
use crate::util::*;

make_log_macro!(debug, "display");

/// The two display server operations the toggler needs: one status read and
/// one brightness write.
#[async_trait]
pub trait DisplayServer {
    /// Status of every output the display server reports.
    async fn outputs(&self) -> Result<Vec<OutputStatus>>;

    /// Set the named output's gamma brightness.
    async fn set_brightness(&self, output: &str, value: f64) -> Result<()>;
}

/// [`DisplayServer`] backed by the `xrandr` command-line tool.
#[derive(Clone, Debug)]
pub struct Xrandr {
    program: String,
}

impl Xrandr {
    pub fn new() -> Self {
        Xrandr {
            program: XRANDR.to_string(),
        }
    }
}

impl Default for Xrandr {
    fn default() -> Self {
        Xrandr::new()
    }
}

#[async_trait]
impl DisplayServer for Xrandr {
    async fn outputs(&self) -> Result<Vec<OutputStatus>> {
        let output = run_command(&self.program, &["--verbose"]).await?;
        if !output.status.success() {
            return Err(TogglebrightError::QueryUnavailable(decode(&output.stderr)));
        }
        parse_outputs(&decode(&output.stdout))
    }

    async fn set_brightness(&self, name: &str, value: f64) -> Result<()> {
        let level = value.to_string();
        let args = ["--output", name, "--brightness", &level];
        let output = run_command(&self.program, &args).await?;
        if !output.status.success() {
            return Err(TogglebrightError::BrightnessRejected {
                output: name.to_string(),
                value,
                reason: decode(&output.stderr),
            });
        }
        debug!("{name} brightness set to {level}");
        Ok(())
    }
}

/// A mock [`DisplayServer`] with a fixed output list and recorded writes,
/// usable when testing the toggle flow without a display server.
///
/// Clones share their state, so a test can hand one clone to a toggler and
/// inspect the other.
#[cfg(test)]
#[derive(Clone)]
pub(crate) struct MockDisplayServer {
    outputs: Arc<Mutex<Vec<OutputStatus>>>,
    writes: Arc<Mutex<Vec<(String, f64)>>>,
    fail_reads: Arc<Mutex<bool>>,
    fail_writes: Arc<Mutex<bool>>,
    apply_writes: bool,
}

#[cfg(test)]
impl MockDisplayServer {
    pub(crate) fn new(outputs: Vec<OutputStatus>) -> Self {
        MockDisplayServer {
            outputs: Arc::new(Mutex::new(outputs)),
            writes: Arc::new(Mutex::new(Vec::new())),
            fail_reads: Arc::new(Mutex::new(false)),
            fail_writes: Arc::new(Mutex::new(false)),
            apply_writes: false,
        }
    }

    /// Make accepted writes visible to later reads, like a live display.
    pub(crate) fn applying_writes(mut self) -> Self {
        self.apply_writes = true;
        self
    }

    pub(crate) fn fail_reads(&self) {
        *self.fail_reads.lock().unwrap() = true;
    }

    pub(crate) fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub(crate) fn writes(&self) -> Vec<(String, f64)> {
        self.writes.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl DisplayServer for MockDisplayServer {
    async fn outputs(&self) -> Result<Vec<OutputStatus>> {
        if *self.fail_reads.lock().unwrap() {
            return Err(TogglebrightError::QueryUnavailable(
                "mock display server is failing".to_string(),
            ));
        }
        Ok(self.outputs.lock().unwrap().clone())
    }

    async fn set_brightness(&self, name: &str, value: f64) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(TogglebrightError::BrightnessRejected {
                output: name.to_string(),
                value,
                reason: "mock display server is failing".to_string(),
            });
        }
        self.writes.lock().unwrap().push((name.to_string(), value));
        if self.apply_writes {
            if let Some(output) = self
                .outputs
                .lock()
                .unwrap()
                .iter_mut()
                .find(|output| output.name == name)
            {
                output.brightness = Some(value);
            }
        }
        Ok(())
    }
}
