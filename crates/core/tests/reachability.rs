use gc_hazard_core::analysis::GcReachability;
use gc_hazard_core::graph::{CallGraph, CallGraphBuilder};
use gc_hazard_core::model::EdgeFlags;

/// Build a graph from `(caller, callee, triggers_gc, suppressed)` records.
fn graph(edges: &[(&str, &str, bool, bool)]) -> CallGraph {
    let mut builder = CallGraphBuilder::new();
    for &(caller, callee, triggers, suppressed) in edges {
        builder.add_edge(caller, callee, EdgeFlags::new(triggers, suppressed));
    }
    builder.finish()
}

fn chain(analysis: &GcReachability, name: &str) -> Vec<String> {
    analysis
        .witness_chain(name)
        .expect("function should be GC-reaching")
        .into_names()
        .expect("chain should be consistent")
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn trigger_callees_seed_and_callers_follow() {
    let analysis = GcReachability::compute(graph(&[
        ("B", "A", true, false),
        ("C", "B", false, false),
    ]));

    assert!(analysis.is_gc_reaching("A"));
    assert!(analysis.is_gc_reaching("B"));
    assert!(analysis.is_gc_reaching("C"));
    assert_eq!(chain(&analysis, "A"), ["A"]);
    assert_eq!(chain(&analysis, "B"), ["B", "A"]);
    assert_eq!(chain(&analysis, "C"), ["C", "B", "A"]);

    let summary = analysis.summary();
    assert_eq!(summary.functions, 3);
    assert_eq!(summary.call_sites, 2);
    assert_eq!(summary.gc_functions, 3);
    assert_eq!(summary.collector_entries, 1);
    assert_eq!(summary.suppressed_functions, 0);
}

#[test]
fn suppressed_trigger_reaches_nobody() {
    let analysis = GcReachability::compute(graph(&[
        ("B", "A", true, true),
        ("C", "B", false, false),
    ]));

    assert!(!analysis.is_gc_reaching("A"));
    assert!(!analysis.is_gc_reaching("B"));
    assert!(!analysis.is_gc_reaching("C"));
    assert!(analysis.witness_chain("B").is_none());
    assert!(analysis.has_suppressed_call("B"));
    assert!(!analysis.has_suppressed_call("A"));

    let suppressed: Vec<&str> = analysis.suppressed_functions().collect();
    assert_eq!(suppressed, ["B"]);
    assert_eq!(analysis.summary().gc_functions, 0);
}

#[test]
fn first_discovery_wins_when_two_origins_compete() {
    let analysis = GcReachability::compute(graph(&[
        ("X", "Y", true, false),
        ("X", "Z", true, false),
    ]));

    assert_eq!(chain(&analysis, "Y"), ["Y"]);
    assert_eq!(chain(&analysis, "Z"), ["Z"]);

    // X is one hop from either collector entry; the origin is assigned
    // exactly once, so the chain names one of them and stops.
    let x_chain = chain(&analysis, "X");
    assert_eq!(x_chain.len(), 2);
    assert_eq!(x_chain[0], "X");
    assert!(x_chain[1] == "Y" || x_chain[1] == "Z");
}

#[test]
fn mutual_recursion_terminates_with_finite_chains() {
    let analysis = GcReachability::compute(graph(&[
        ("A", "GCRuntime::collect", true, false),
        ("A", "B", false, false),
        ("B", "A", false, false),
    ]));

    assert!(analysis.is_gc_reaching("GCRuntime::collect"));
    assert!(analysis.is_gc_reaching("A"));
    assert!(analysis.is_gc_reaching("B"));
    assert_eq!(chain(&analysis, "A"), ["A", "GCRuntime::collect"]);
    assert_eq!(chain(&analysis, "B"), ["B", "A", "GCRuntime::collect"]);
}

#[test]
fn cycle_through_the_trigger_edge_terminates() {
    let analysis = GcReachability::compute(graph(&[
        ("A", "B", false, false),
        ("B", "A", true, false),
    ]));

    assert_eq!(chain(&analysis, "A"), ["A"]);
    assert_eq!(chain(&analysis, "B"), ["B", "A"]);
}

#[test]
fn self_loop_on_the_collector_entry_terminates() {
    let analysis = GcReachability::compute(graph(&[
        ("A", "A", true, false),
        ("A", "B", false, false),
        ("B", "A", false, false),
    ]));

    assert_eq!(chain(&analysis, "A"), ["A"]);
    assert_eq!(chain(&analysis, "B"), ["B", "A"]);
}

#[test]
fn suppressed_edges_never_propagate() {
    let analysis = GcReachability::compute(graph(&[
        ("P", "C", true, false),
        ("S", "C", true, true),
        ("Q", "S", false, false),
        ("R", "P", false, true),
    ]));

    assert!(analysis.is_gc_reaching("C"));
    assert!(analysis.is_gc_reaching("P"));
    // S only calls the collector under suppression, so neither S nor its
    // callers are reaching; R's only path runs through a suppressed edge.
    assert!(!analysis.is_gc_reaching("S"));
    assert!(!analysis.is_gc_reaching("Q"));
    assert!(!analysis.is_gc_reaching("R"));

    let suppressed: Vec<&str> = analysis.suppressed_functions().collect();
    assert_eq!(suppressed, ["S"]);
}

#[test]
fn function_can_be_both_reaching_and_suppressed() {
    let analysis = GcReachability::compute(graph(&[
        ("F", "G", true, true),
        ("F", "H", true, false),
    ]));

    assert!(analysis.is_gc_reaching("F"));
    assert!(analysis.has_suppressed_call("F"));
    assert_eq!(chain(&analysis, "F"), ["F", "H"]);
    assert!(!analysis.is_gc_reaching("G"));
}

#[test]
fn growing_the_graph_never_removes_reachability() {
    let base = vec![("B", "A", true, false), ("C", "B", false, false)];
    let small = GcReachability::compute(graph(&base));

    let mut bigger = base.clone();
    bigger.push(("D", "C", false, false));
    bigger.push(("E", "D", true, false));
    let large = GcReachability::compute(graph(&bigger));

    for name in small.gc_functions() {
        assert!(
            large.is_gc_reaching(name),
            "{} dropped out after adding edges",
            name
        );
    }
    assert!(large.is_gc_reaching("D"));
    assert!(large.is_gc_reaching("E"));
}

#[test]
fn rerunning_the_same_input_is_deterministic() {
    let records = [
        ("B", "A", true, false),
        ("C", "B", false, false),
        ("C", "A", false, false),
        ("S", "A", true, true),
        ("X", "Y", true, false),
    ];
    let first = GcReachability::compute(graph(&records));
    let second = GcReachability::compute(graph(&records));

    let first_gc: Vec<&str> = first.gc_functions().collect();
    let second_gc: Vec<&str> = second.gc_functions().collect();
    assert_eq!(first_gc, second_gc);
    assert_eq!(
        first.suppressed_functions().collect::<Vec<_>>(),
        second.suppressed_functions().collect::<Vec<_>>()
    );
    for name in &first_gc {
        assert_eq!(chain(&first, name), chain(&second, name));
    }
}

#[test]
fn empty_graph_yields_empty_results() {
    let analysis = GcReachability::compute(graph(&[]));

    let summary = analysis.summary();
    assert_eq!(summary.functions, 0);
    assert_eq!(summary.call_sites, 0);
    assert_eq!(summary.gc_functions, 0);
    assert_eq!(summary.suppressed_functions, 0);
    assert!(!analysis.is_gc_reaching("anything"));
    assert!(analysis.witness_chain("anything").is_none());
}

#[test]
fn plain_calls_alone_discover_nothing() {
    let analysis = GcReachability::compute(graph(&[
        ("a", "b", false, false),
        ("b", "c", false, false),
    ]));

    assert_eq!(analysis.gc_functions().count(), 0);
    assert_eq!(analysis.suppressed_functions().count(), 0);
}

#[test]
fn duplicate_trigger_edges_seed_once() {
    let analysis = GcReachability::compute(graph(&[
        ("A", "C", true, false),
        ("A", "C", true, false),
        ("B", "C", true, false),
    ]));

    let summary = analysis.summary();
    assert_eq!(summary.collector_entries, 1);
    assert_eq!(summary.gc_functions, 3);

    let gc: Vec<&str> = analysis.gc_functions().collect();
    assert!(gc.contains(&"A"));
    assert!(gc.contains(&"B"));
    assert!(gc.contains(&"C"));
}
