use std::fs;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

use crate::date::DayRange;
use crate::error::{Result, TimesheetError};

// Include default endpoint templates at compile time
const DEFAULT_REPOS: &str = include_str!("../default_repos.txt");

const SINCE_PLACEHOLDER: &str = "{since}";
const UNTIL_PLACEHOLDER: &str = "{until}";

/// One tracked repository: a commit-listing URL template carrying the fixed
/// author and branch filters plus `{since}`/`{until}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    fn parse(line: &str, line_number: usize) -> Result<Self> {
        let invalid = |reason: &str| TimesheetError::InvalidEndpoint {
            line: line_number,
            reason: reason.to_string(),
        };

        if !line.contains(SINCE_PLACEHOLDER) || !line.contains(UNTIL_PLACEHOLDER) {
            return Err(invalid("missing {since} or {until} placeholder"));
        }

        let template = EndpointTemplate(line.to_string());

        // Probe with dummy bounds so a bad URL fails at load, not mid-fetch.
        let probed = template.substitute("t", "t");
        let url = Url::parse(&probed).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "https" {
            return Err(invalid("endpoint must be an absolute https URL"));
        }

        Ok(template)
    }

    fn substitute(&self, since: &str, until: &str) -> String {
        self.0
            .replace(SINCE_PLACEHOLDER, since)
            .replace(UNTIL_PLACEHOLDER, until)
    }

    /// Binds the target day's bounds into the template.
    pub fn bind(&self, range: &DayRange) -> String {
        self.substitute(&range.since(), &range.until())
    }

    /// The repository portion of the template, for diagnostics.
    pub fn display_name(&self) -> &str {
        self.0.split('?').next().unwrap_or(&self.0)
    }
}

fn parse_lines(content: &str) -> Result<Vec<EndpointTemplate>> {
    let mut endpoints = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            endpoints.push(EndpointTemplate::parse(line, line_num + 1)?);
        }
    }

    Ok(endpoints)
}

/// Loads the repository endpoint table: an explicit file when given, else a
/// `repos.txt` in the working directory, else the embedded defaults.
pub fn load_endpoints(repos_file_path: Option<&Path>) -> Result<Vec<EndpointTemplate>> {
    let endpoints = if let Some(path) = repos_file_path {
        info!(action = "load", component = "endpoint_file", file_path = ?path, "Loading endpoints from specified file");
        if !path.exists() {
            return Err(TimesheetError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Endpoint file not found: {}", path.display()),
            )));
        }
        parse_lines(&fs::read_to_string(path)?)?
    } else {
        let default_file = Path::new("repos.txt");
        if default_file.exists() {
            info!(action = "load", component = "default_endpoint_file", file_path = ?default_file, "Loading endpoints from default file");
            parse_lines(&fs::read_to_string(default_file)?)?
        } else {
            info!(
                action = "load",
                component = "embedded_endpoints",
                "Using embedded default endpoints"
            );
            parse_lines(DEFAULT_REPOS)?
        }
    };

    if endpoints.is_empty() {
        warn!(
            action = "loaded",
            component = "endpoint_table",
            "No endpoints configured, the report will be empty"
        );
    } else {
        info!(
            action = "loaded",
            component = "endpoint_table",
            endpoint_count = endpoints.len(),
            "Endpoint table ready"
        );
    }
    Ok(endpoints)
}

/// Writes the embedded default table out as `repos.txt` for editing.
pub fn init_default_endpoints() -> anyhow::Result<()> {
    let default_file = Path::new("repos.txt");

    if default_file.exists() {
        anyhow::bail!("repos.txt already exists. Remove it first if you want to reinitialize.");
    }

    fs::write(default_file, DEFAULT_REPOS)?;
    println!("Created repos.txt with the default endpoint templates");

    Ok(())
}
