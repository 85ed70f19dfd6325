//! Results persistence module

use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::cluster::ClusterReport;
use crate::graph::LinkageGraph;

/// Save analysis results to the specified directory
pub fn save_results(
    reports: &[ClusterReport],
    graph: &LinkageGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} cluster reports to {}", reports.len(), output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(reports, graph, output_dir)?;
    save_clusters(reports, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

fn save_summary(reports: &[ClusterReport], graph: &LinkageGraph, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let counts = graph.reason_counts();
    let linked: Vec<&ClusterReport> = reports.iter().filter(|r| !r.is_isolated()).collect();

    let summary = json!({
        "graph_stats": {
            "account_count": graph.node_count(),
            "link_count": graph.edge_count(),
            "shared_device_links": counts.shared_device,
            "shared_ip_links": counts.shared_ip,
            "oversized_buckets": graph.oversized_buckets(),
        },
        "cluster_stats": {
            "cluster_count": reports.len(),
            "isolated_count": reports.len() - linked.len(),
            "linked_cluster_count": linked.len(),
            "largest_cluster_size": reports.iter().map(|r| r.size()).max().unwrap_or(0),
            "accounts_in_linked_clusters": linked.iter().map(|r| r.size()).sum::<usize>(),
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

fn save_clusters(reports: &[ClusterReport], output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("clusters.json");
    let mut file = File::create(path)?;

    let clusters_json = json!({ "clusters": reports });
    file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::analyze;
    use crate::config::BuildConfig;
    use crate::data::AccountRecord;
    use crate::graph::build;

    #[test]
    fn test_save_results_writes_json() {
        let records = vec![
            AccountRecord::new(0, "A1", "D1", "I1").unwrap(),
            AccountRecord::new(0, "A2", "D1", "I2").unwrap(),
            AccountRecord::new(0, "B1", "D9", "I9").unwrap(),
        ];
        let graph = build(&records, &BuildConfig::default());
        let reports = analyze(&graph);

        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();
        save_results(&reports, &graph, output_dir).unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["graph_stats"]["account_count"], 3);
        assert_eq!(summary["graph_stats"]["shared_device_links"], 1);
        assert_eq!(summary["cluster_stats"]["isolated_count"], 1);

        let clusters: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("clusters.json")).unwrap())
                .unwrap();
        let first = &clusters["clusters"][0];
        assert_eq!(first["kind"], "clustered");
        assert_eq!(first["coordinator"], "A1");
        assert_eq!(clusters["clusters"][1]["kind"], "isolated");
    }
}
