//! Nagios plugin output assembly.
//!
//! A [`CheckResult`] collects the service output, long output, errors and
//! performance data of one check run and renders them in the plugin output
//! format understood by Nagios and compatible monitoring systems.

use std::fmt;

use crate::process::ServiceState;

/// Line ending used in plugin output. The trailing space keeps line breaks
/// intact in the Nagios web UI.
pub const CHECK_OUTPUT_EOL: &str = " \n";

/// A single performance data metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceData {
    pub label: String,
    pub value: String,
    /// Unit of measurement, e.g. "ms"; empty for plain counts.
    pub uom: String,
}

impl PerformanceData {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
            uom: String::new(),
        }
    }

    pub fn with_uom(mut self, uom: impl Into<String>) -> Self {
        self.uom = uom.into();
        self
    }
}

impl fmt::Display for PerformanceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'={}{};;;;", self.label, self.value, self.uom)
    }
}

/// Collected results of one plugin run.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub state: ServiceState,
    pub service_output: String,
    pub long_service_output: String,
    pub errors: Vec<String>,
    pub perf_data: Vec<PerformanceData>,
    pub branding: Option<String>,
}

impl Default for CheckResult {
    fn default() -> Self {
        Self {
            state: ServiceState::Ok,
            service_output: String::new(),
            long_service_output: String::new(),
            errors: Vec::new(),
            perf_data: Vec::new(),
            branding: None,
        }
    }
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, err: impl fmt::Display) {
        self.errors.push(err.to_string());
    }

    pub fn add_perf_data(&mut self, pd: impl IntoIterator<Item = PerformanceData>) {
        self.perf_data.extend(pd);
    }

    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    /// Renders the full plugin output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.service_output);

        if !self.errors.is_empty() {
            out.push_str(CHECK_OUTPUT_EOL);
            out.push_str(CHECK_OUTPUT_EOL);
            out.push_str("**ERRORS**");
            out.push_str(CHECK_OUTPUT_EOL);
            for err in &self.errors {
                out.push_str("* ");
                out.push_str(err);
                out.push_str(CHECK_OUTPUT_EOL);
            }
        }

        if !self.long_service_output.is_empty() {
            out.push_str(CHECK_OUTPUT_EOL);
            out.push_str("**DETAILED INFO**");
            out.push_str(CHECK_OUTPUT_EOL);
            out.push_str(&self.long_service_output);
        }

        if let Some(branding) = &self.branding {
            out.push_str(CHECK_OUTPUT_EOL);
            out.push_str(branding);
            out.push_str(CHECK_OUTPUT_EOL);
        }

        if !self.perf_data.is_empty() {
            let metrics: Vec<String> = self.perf_data.iter().map(|pd| pd.to_string()).collect();
            out.push_str(" | ");
            out.push_str(&metrics.join(" "));
        }

        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_data_format() {
        assert_eq!(PerformanceData::new("zombie", 3).to_string(), "'zombie'=3;;;;");
        assert_eq!(
            PerformanceData::new("time", 12).with_uom("ms").to_string(),
            "'time'=12ms;;;;"
        );
    }

    #[test]
    fn test_render_service_output_only() {
        let mut result = CheckResult::new();
        result.service_output = "OK: all good".to_string();
        assert_eq!(result.render(), "OK: all good\n");
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_render_all_sections() {
        let mut result = CheckResult::new();
        result.state = ServiceState::Critical;
        result.service_output = "CRITICAL: broken".to_string();
        result.add_error("problematic processes found");
        result.long_service_output = "details".to_string();
        result.branding = Some("Notification generated by check-process".to_string());
        result.add_perf_data([PerformanceData::new("a", 1), PerformanceData::new("b", 2)]);

        let expected = "CRITICAL: broken \n \n**ERRORS** \n* problematic processes found \n \n**DETAILED INFO** \ndetails \nNotification generated by check-process \n | 'a'=1;;;; 'b'=2;;;;\n";
        assert_eq!(result.render(), expected);
        assert_eq!(result.exit_code(), 2);
    }
}
