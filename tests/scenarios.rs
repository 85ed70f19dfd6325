use std::collections::{HashMap, HashSet};

use mule_link_analyzer::config::BuildConfig;
use mule_link_analyzer::{
    analyze, build, build_from_rows, AccountRecord, ClusterKind, LinkReason, LinkageError,
    LinkageGraph, RawRecord,
};
use mule_link_analyzer::cluster::metrics::{degree_centrality, rank_by_centrality};
use mule_link_analyzer::cluster::find_clusters;

fn records(rows: &[(&str, &str, &str)]) -> Vec<AccountRecord> {
    rows.iter()
        .enumerate()
        .map(|(row, &(account, device, ip))| AccountRecord::new(row, account, device, ip).unwrap())
        .collect()
}

fn graph_of(rows: &[(&str, &str, &str)]) -> LinkageGraph {
    build(&records(rows), &BuildConfig::default())
}

/// A mixed fixture: a device ring, an IP-only pair, bridges and loners
fn mixed_fixture() -> Vec<AccountRecord> {
    let mut rows = Vec::new();
    for i in 0..40 {
        let account = format!("M{:02}", i);
        let device = format!("D{}", i % 7);
        let ip = format!("10.0.{}.{}", i % 3, i % 11);
        rows.push(AccountRecord::new(i, account, device, ip).unwrap());
    }
    rows.push(AccountRecord::new(0, "L1", "DL1", "IL1").unwrap());
    rows.push(AccountRecord::new(0, "L2", "DL2", "IL2").unwrap());
    // Duplicate row for an existing account
    rows.push(AccountRecord::new(0, "M03", "D3", "10.0.0.3").unwrap());
    rows
}

#[test]
fn test_scenario_device_and_ip_links_one_cluster() {
    let graph = graph_of(&[("A1", "D1", "I1"), ("A2", "D1", "I2"), ("A3", "D2", "I1")]);

    assert_eq!(graph.link_between("A1", "A2"), Some(LinkReason::SharedDevice));
    assert_eq!(graph.link_between("A1", "A3"), Some(LinkReason::SharedIp));

    let reports = analyze(&graph);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].members, vec!["A1", "A2", "A3"]);
    assert_eq!(
        reports[0].kind,
        ClusterKind::Clustered { coordinator: "A1".to_string(), score: 1.0 }
    );
}

#[test]
fn test_scenario_single_account_is_isolated() {
    let reports = analyze(&graph_of(&[("B1", "D9", "I9")]));
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].members, vec!["B1"]);
    assert_eq!(reports[0].kind, ClusterKind::Isolated);
    assert!(reports[0].coordinator().is_none());
}

#[test]
fn test_scenario_two_pairs_resolve_ties_to_smaller_id() {
    let graph = graph_of(&[
        ("C2", "D5", "I6"),
        ("C1", "D5", "I7"),
        ("C4", "D6", "I5"),
        ("C3", "D7", "I5"),
    ]);
    let reports = analyze(&graph);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].members, vec!["C1", "C2"]);
    assert_eq!(reports[0].coordinator(), Some(("C1", 1.0)));
    assert_eq!(reports[0].links.shared_device, 1);
    assert_eq!(reports[1].members, vec!["C3", "C4"]);
    assert_eq!(reports[1].coordinator(), Some(("C3", 1.0)));
    assert_eq!(reports[1].links.shared_ip, 1);
}

#[test]
fn test_scenario_empty_input() {
    let graph = build_from_rows(&[], &BuildConfig::default()).unwrap();
    assert!(graph.is_empty());
    assert!(analyze(&graph).is_empty());
}

#[test]
fn test_scenario_missing_device_rejects_run() {
    let mut first = RawRecord::new();
    first.insert("account_id".into(), "A1".into());
    first.insert("device_id".into(), "D1".into());
    first.insert("ip_address".into(), "I1".into());
    let mut second = RawRecord::new();
    second.insert("account_id".into(), "A2".into());
    second.insert("ip_address".into(), "I1".into());

    let err = build_from_rows(&[first, second], &BuildConfig::default()).unwrap_err();
    assert_eq!(err, LinkageError::missing(1, "device_id"));
}

#[test]
fn test_repeated_runs_are_identical() {
    let input = mixed_fixture();
    let first = analyze(&build(&input, &BuildConfig::default()));
    for _ in 0..5 {
        let again = analyze(&build(&input, &BuildConfig::default()));
        assert_eq!(first, again);
    }
}

#[test]
fn test_shared_device_and_ip_always_strong() {
    let input = mixed_fixture();
    let graph = build(&input, &BuildConfig::default());

    let mut devices: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut ips: HashMap<&str, HashSet<&str>> = HashMap::new();
    for r in &input {
        devices.entry(r.account_id()).or_default().insert(r.device_id());
        ips.entry(r.account_id()).or_default().insert(r.ip_address());
    }

    for edge in graph.edges() {
        let share_device = !devices[edge.source].is_disjoint(&devices[edge.target]);
        let share_ip = !ips[edge.source].is_disjoint(&ips[edge.target]);
        assert!(share_device || share_ip);
        if share_device {
            assert_eq!(edge.reason, LinkReason::SharedDevice);
        } else {
            assert_eq!(edge.reason, LinkReason::SharedIp);
        }
    }
}

#[test]
fn test_no_duplicate_edges() {
    let graph = build(&mixed_fixture(), &BuildConfig::default());
    let mut seen = HashSet::new();
    for edge in graph.edges() {
        assert_ne!(edge.source, edge.target);
        let key = if edge.source < edge.target {
            (edge.source, edge.target)
        } else {
            (edge.target, edge.source)
        };
        assert!(seen.insert(key), "duplicate edge {:?}", key);
    }
    assert_eq!(seen.len(), graph.edge_count());
}

#[test]
fn test_clusters_partition_node_set() {
    let graph = build(&mixed_fixture(), &BuildConfig::default());
    let reports = analyze(&graph);

    let mut covered = HashSet::new();
    for report in &reports {
        let mut sorted = report.members.clone();
        sorted.sort();
        assert_eq!(sorted, report.members);
        for member in &report.members {
            assert!(covered.insert(member.clone()), "{} in two clusters", member);
        }
        assert_eq!(report.is_isolated(), report.size() == 1);
    }

    let all: HashSet<String> = graph.node_ids().iter().cloned().collect();
    assert_eq!(covered, all);
}

#[test]
fn test_coordinator_has_maximum_centrality() {
    let graph = build(&mixed_fixture(), &BuildConfig::default());

    for members in find_clusters(&graph).iter().filter(|m| m.len() > 1) {
        let scores = degree_centrality(&graph, members);
        assert!(scores.iter().all(|&(_, s)| (0.0..=1.0).contains(&s)));

        let (top, top_score) = rank_by_centrality(&graph, members)[0];
        for &(node, score) in &scores {
            assert!(top_score >= score);
            if score == top_score {
                assert!(graph.node_id(top) <= graph.node_id(node));
            }
        }
    }
}

#[test]
fn test_weak_chain_joins_cluster() {
    // X1-X2 by device, X2-X3 by ip: one cluster with X2 in the middle
    let reports = analyze(&graph_of(&[("X1", "D1", "I1"), ("X2", "D1", "I2"), ("X3", "D3", "I2")]));
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].coordinator(), Some(("X2", 1.0)));
}
