//! Human-readable cluster summary

use std::io::{self, Write};

use crate::cluster::{ClusterKind, ClusterReport};

/// Write the per-cluster summary used by the command line tool
pub fn write_summary<W: Write>(out: &mut W, reports: &[ClusterReport]) -> io::Result<()> {
    writeln!(out, "\nDetected {} clusters:\n", reports.len())?;

    for report in reports {
        writeln!(out, "Cluster {}:", report.index)?;
        writeln!(out, " Accounts: {}", report.members.join(", "))?;

        match &report.kind {
            ClusterKind::Isolated => {
                writeln!(out, " Interpretation: Isolated account\n")?;
            }
            ClusterKind::Clustered { coordinator, score } => {
                writeln!(
                    out,
                    " Possible coordinator candidate: {} (degree centrality {:.2})",
                    coordinator, score
                )?;
                writeln!(
                    out,
                    " Links: {} shared device, {} shared ip",
                    report.links.shared_device, report.links.shared_ip
                )?;
                writeln!(out, " Interpretation: Review for organised control\n")?;
            }
        }
    }

    Ok(())
}

pub fn format_summary(reports: &[ClusterReport]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec<u8> cannot fail
    write_summary(&mut buf, reports).expect("in-memory write");
    String::from_utf8_lossy(&buf).into_owned()
}
