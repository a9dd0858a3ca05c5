use crate::errors::*;

use regex::Regex;

make_log_macro!(debug, "status");

/// Per-output slice of the display server's verbose status report.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputStatus {
    pub name: String,
    pub connected: bool,
    pub primary: bool,
    /// Gamma brightness as reported, if the output reported one.
    pub brightness: Option<f64>,
}

/// Scan verbose status text for output sections and pull each output's
/// brightness reading out of its property block.
///
/// A section starts at an unindented `<name> (dis)connected [primary]` line
/// and runs until the next unindented line. The first indented
/// `Brightness: <value>` line in a section is the section's reading; every
/// other line (screen summary, mode list, EDID dump) is ignored.
pub(crate) fn parse_outputs(status: &str) -> Result<Vec<OutputStatus>> {
    let header = Regex::new(r"^(\S+)\s+(connected|disconnected)\b(\s+primary)?")?;
    let brightness = Regex::new(r"^\s+Brightness:\s*(\S+)")?;

    let mut outputs: Vec<OutputStatus> = Vec::new();
    // Whether the tail of `outputs` is the section the cursor is inside of.
    let mut in_section = false;
    for line in status.lines() {
        if let Some(caps) = header.captures(line) {
            outputs.push(OutputStatus {
                name: caps[1].to_string(),
                connected: &caps[2] == "connected",
                primary: caps.get(3).is_some(),
                brightness: None,
            });
            in_section = true;
        } else if !line.starts_with(char::is_whitespace) {
            // Some other unindented line: the screen summary or a header
            // shape we don't know. Properties under it are not ours.
            in_section = false;
        } else if let Some(caps) = brightness.captures(line) {
            if !in_section {
                continue;
            }
            if let Some(output) = outputs.last_mut() {
                if output.brightness.is_none() {
                    let raw = &caps[1];
                    let value = raw
                        .parse::<f64>()
                        .map_err(|_| TogglebrightError::MalformedBrightness(raw.to_string()))?;
                    output.brightness = Some(value);
                }
            }
        }
    }
    debug!("parsed {} outputs", outputs.len());
    Ok(outputs)
}

/// Pick the output a toggle invocation acts on.
///
/// An explicit name must match exactly. With no name, prefer the primary
/// connected output, then the first connected one.
pub(crate) fn select_output<'a>(
    outputs: &'a [OutputStatus],
    name: Option<&str>,
) -> Result<&'a OutputStatus> {
    match name {
        Some(name) => outputs
            .iter()
            .find(|output| output.name == name)
            .ok_or_else(|| TogglebrightError::UnknownOutput(name.to_string())),
        None => outputs
            .iter()
            .find(|output| output.connected && output.primary)
            .or_else(|| outputs.iter().find(|output| output.connected))
            .ok_or(TogglebrightError::NoOutputs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERBOSE_STATUS: &str = "\
Screen 0: minimum 320 x 200, current 3840 x 1080, maximum 16384 x 16384
eDP-1 connected primary 1920x1080+0+0 (0x47) normal (normal left inverted right x axis y axis) 344mm x 194mm
\tIdentifier: 0x42
\tTimestamp:  86031
\tSubpixel:   unknown
\tGamma:      1.0:1.0:1.0
\tBrightness: 0.95
\tClones:
\tCRTC:       0
\tEDID:
\t\t00ffffffffffff0006af3d5700000000
\t\t001c0104951f11780226a5a255529e27
\tnon-desktop: 0
\t\tsupported: 0, 1
  1920x1080 (0x47) 138.500MHz +HSync -VSync *current +preferred
        h: width  1920 start 1968 end 2000 total 2226 skew    0 clock  62.22KHz
        v: height 1080 start 1083 end 1088 total 1120           clock  55.56Hz
HDMI-1 connected 1920x1080+1920+0 (0x48) normal (normal left inverted right x axis y axis) 527mm x 296mm
\tIdentifier: 0x43
\tGamma:      1.0:1.0:1.0
\tBrightness: 1.0
\tCRTC:       1
DP-1 disconnected (normal left inverted right x axis y axis)
\tIdentifier: 0x44
";

    #[test]
    fn parses_every_output_section() {
        let outputs = parse_outputs(VERBOSE_STATUS).unwrap();
        assert_eq!(
            outputs,
            vec![
                OutputStatus {
                    name: "eDP-1".to_string(),
                    connected: true,
                    primary: true,
                    brightness: Some(0.95),
                },
                OutputStatus {
                    name: "HDMI-1".to_string(),
                    connected: true,
                    primary: false,
                    brightness: Some(1.0),
                },
                OutputStatus {
                    name: "DP-1".to_string(),
                    connected: false,
                    primary: false,
                    brightness: None,
                },
            ]
        );
    }

    #[test]
    fn section_without_brightness_has_no_reading() {
        let status = "eDP-1 connected primary 1920x1080+0+0\n\tGamma: 1.0:1.0:1.0\n";
        let outputs = parse_outputs(status).unwrap();
        assert_eq!(outputs[0].brightness, None);
    }

    #[test]
    fn first_brightness_line_wins() {
        let status = "eDP-1 connected 1920x1080+0+0\n\tBrightness: 0.5\n\tBrightness: 0.9\n";
        let outputs = parse_outputs(status).unwrap();
        assert_eq!(outputs[0].brightness, Some(0.5));
    }

    #[test]
    fn malformed_brightness_fails_the_parse() {
        let status = "eDP-1 connected 1920x1080+0+0\n\tBrightness: bright\n";
        let err = parse_outputs(status).unwrap_err();
        assert!(matches!(
            err,
            TogglebrightError::MalformedBrightness(raw) if raw == "bright"
        ));
    }

    #[test]
    fn properties_outside_a_section_are_ignored() {
        let status = "\tBrightness: 0.5\nScreen 0: minimum 320 x 200\n\tBrightness: 0.6\n";
        assert_eq!(parse_outputs(status).unwrap(), vec![]);
    }

    #[test]
    fn no_output_sections_means_empty() {
        assert_eq!(parse_outputs("").unwrap(), vec![]);
        assert_eq!(
            parse_outputs("Screen 0: minimum 320 x 200\n").unwrap(),
            vec![]
        );
    }

    #[test]
    fn explicit_name_matches_exactly() {
        let outputs = parse_outputs(VERBOSE_STATUS).unwrap();
        assert_eq!(select_output(&outputs, Some("HDMI-1")).unwrap().name, "HDMI-1");
    }

    #[test]
    fn explicit_name_misses_with_unknown_output() {
        let outputs = parse_outputs(VERBOSE_STATUS).unwrap();
        assert!(matches!(
            select_output(&outputs, Some("HDMI-9")),
            Err(TogglebrightError::UnknownOutput(name)) if name == "HDMI-9"
        ));
    }

    #[test]
    fn default_selection_prefers_primary() {
        let outputs = parse_outputs(VERBOSE_STATUS).unwrap();
        assert_eq!(select_output(&outputs, None).unwrap().name, "eDP-1");
    }

    #[test]
    fn default_selection_falls_back_to_first_connected() {
        let outputs = vec![
            OutputStatus {
                name: "DP-1".to_string(),
                connected: false,
                primary: false,
                brightness: None,
            },
            OutputStatus {
                name: "HDMI-1".to_string(),
                connected: true,
                primary: false,
                brightness: Some(1.0),
            },
        ];
        assert_eq!(select_output(&outputs, None).unwrap().name, "HDMI-1");
    }

    #[test]
    fn nothing_connected_is_an_error() {
        let outputs = vec![OutputStatus {
            name: "DP-1".to_string(),
            connected: false,
            primary: false,
            brightness: None,
        }];
        assert!(matches!(
            select_output(&outputs, None),
            Err(TogglebrightError::NoOutputs)
        ));
        assert!(matches!(
            select_output(&[], None),
            Err(TogglebrightError::NoOutputs)
        ));
    }
}
