//! HAL file generation
//!
//! The file is written in fixed sections, each produced by one pass over the
//! netlist: header, modules, thread hooks, parameters, nets and signals.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::{ComponentIndex, NetList, TranslateError};

mod header;
mod modules;
mod nets;
mod params;
mod threads;

/// Problems with a single net that do not stop the translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A named net has more than one output; the first one drives it
    MultipleDrivers { net: String },
    /// A named net lacks an output or any input; it is not wired
    Unwirable { net: String },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MultipleDrivers { net } => {
                write!(f, "# WARNING: multiple outputs connected to net {net}")
            }
            Warning::Unwirable { net } => write!(f, "# No suitable pins connected to net {net}"),
        }
    }
}

/// A generated HAL file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalFile {
    lines: Vec<String>,
    warnings: Vec<Warning>,
}

impl HalFile {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn section(&mut self, title: &str) {
        debug!("emitting section {title:?}");
        self.push("");
        self.push("");
        self.push("#".repeat(52));
        self.push(format!("# {title}"));
    }

    /// Record a warning both in the file and on the log
    fn warn(&mut self, warning: Warning) {
        let line = warning.to_string();
        warn!("{}", line.trim_start_matches("# "));
        self.lines.push(line);
        self.warnings.push(warning);
    }
}

impl Display for HalFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Runs the translation passes in order
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    header: bool,
}

impl Default for Translator {
    fn default() -> Self {
        Self { header: true }
    }
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to start the file with the design metadata comments
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn translate(&self, netlist: &NetList) -> Result<HalFile, TranslateError> {
        let index = ComponentIndex::new(netlist);
        let mut out = HalFile::default();

        if self.header {
            header::emit(&netlist.design, &mut out);
        }
        out.section("Load realtime and userspace modules");
        modules::emit(&index, &mut out)?;
        out.section("Hook functions into threads");
        threads::emit(&index, &mut out)?;
        out.section("Set parameters");
        params::emit(&index, &mut out)?;
        out.section("Connect component pins with nets");
        nets::emit(&index, &mut out)?;

        debug!(
            lines = out.lines.len(),
            warnings = out.warnings.len(),
            "translation done"
        );
        Ok(out)
    }
}

/// Translate a netlist with default settings
pub fn translate(netlist: &NetList) -> Result<HalFile, TranslateError> {
    Translator::default().translate(netlist)
}
