//! GraphML export

use anyhow::Result;
use std::io::Write;

use crate::graph::LinkageGraph;
use crate::viz::{edge_style, GraphRenderer};

/// Writes GraphML with `reason` and `style` edge attributes
pub struct GraphMlRenderer;

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl GraphRenderer for GraphMlRenderer {
    fn render(&self, graph: &LinkageGraph, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(out, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
        writeln!(out, "  <key id=\"reason\" for=\"edge\" attr.name=\"reason\" attr.type=\"string\"/>")?;
        writeln!(out, "  <key id=\"style\" for=\"edge\" attr.name=\"style\" attr.type=\"string\"/>")?;
        writeln!(out, "  <graph id=\"linkage\" edgedefault=\"undirected\">")?;

        for id in graph.node_ids() {
            writeln!(out, "    <node id=\"{}\"/>", escape(id))?;
        }

        for (edge_id, edge) in graph.edges().enumerate() {
            writeln!(
                out,
                "    <edge id=\"e{}\" source=\"{}\" target=\"{}\">",
                edge_id,
                escape(edge.source),
                escape(edge.target)
            )?;
            writeln!(out, "      <data key=\"reason\">{}</data>", edge.reason)?;
            writeln!(out, "      <data key=\"style\">{}</data>", edge_style(edge.reason))?;
            writeln!(out, "    </edge>")?;
        }

        writeln!(out, "  </graph>")?;
        writeln!(out, "</graphml>")?;

        Ok(())
    }
}
