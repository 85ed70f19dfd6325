//! Renderer interface for the linkage graph
//!
//! Renderers only need node ids and reason-labelled edges. Backend and target
//! are chosen per call through [`RenderConfig`]; nothing is configured
//! globally.

pub mod dot;
pub mod graphml;

pub use dot::DotRenderer;
pub use graphml::GraphMlRenderer;

use anyhow::{anyhow, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::graph::{LinkReason, LinkageGraph};

/// Output formats the built-in renderers can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Dot,
    GraphMl,
}

impl RenderFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            RenderFormat::Dot => "dot",
            RenderFormat::GraphMl => "graphml",
        }
    }

    fn renderer(&self) -> Box<dyn GraphRenderer> {
        match self {
            RenderFormat::Dot => Box::new(DotRenderer),
            RenderFormat::GraphMl => Box::new(GraphMlRenderer),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dot" => Ok(RenderFormat::Dot),
            "graphml" => Ok(RenderFormat::GraphMl),
            other => Err(anyhow!("Unknown render format: {}", other)),
        }
    }
}

/// Parse a render choice where `none` turns rendering off
pub fn parse_render_option(s: &str) -> Result<Option<RenderFormat>> {
    if s.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Where and how to render, supplied at call time
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub format: RenderFormat,
    pub output_path: PathBuf,
}

impl RenderConfig {
    pub fn new(format: RenderFormat, output_path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            output_path: output_path.into(),
        }
    }

    /// `<dir>/linkage_graph.<ext>`
    pub fn in_dir(format: RenderFormat, dir: &str) -> Self {
        let path = PathBuf::from(dir).join(format!("linkage_graph.{}", format.extension()));
        Self::new(format, path)
    }
}

/// Visual class of an edge: strong links draw solid, weak links dashed
pub fn edge_style(reason: LinkReason) -> &'static str {
    if reason.is_strong() {
        "solid"
    } else {
        "dashed"
    }
}

/// A sink that turns the linkage graph into a static artifact
pub trait GraphRenderer {
    fn render(&self, graph: &LinkageGraph, out: &mut dyn Write) -> Result<()>;
}

/// Render the graph to the file named in `config`
pub fn render_graph(graph: &LinkageGraph, config: &RenderConfig) -> Result<PathBuf> {
    log::info!(
        "Rendering {} accounts and {} links to {}",
        graph.node_count(),
        graph.edge_count(),
        config.output_path.display()
    );

    if let Some(parent) = config.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut out = BufWriter::new(File::create(&config.output_path)?);
    config.format.renderer().render(graph, &mut out)?;
    out.flush()?;

    Ok(config.output_path.clone())
}
