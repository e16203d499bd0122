use anyhow::Result;
use casegraph::algo::{
    calculate_layers, calculate_statistics, detect_communities, detect_unique_cycles,
    find_shortest_path, trace_money_flow,
};
use casegraph::filter::{run_pipeline, GraphFilters, LayerVisibility, ViewportState};
use casegraph::layout::{apply_layout, LayoutKind};
use casegraph::{
    EngineConfig, EntityType, GraphSnapshot, Link, Node, NodeId, NodeMetadata, RiskLevel,
};
use rustc_hash::FxHashSet;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Casegraph Investigation Engine v{}", casegraph::version());
    println!("==========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let config = EngineConfig::from_file(&path)?;
            println!("✓ Loaded configuration from {}", path);
            config
        }
        None => EngineConfig::default(),
    };

    let snapshot = sample_case()?;
    println!(
        "✓ Loaded case: {} entities, {} relationships",
        snapshot.node_count(),
        snapshot.links().len()
    );

    // Demo 1: analyses
    let layered = demo_analysis(&snapshot, &config)?;

    // Demo 2: layouts
    let positioned = demo_layouts(&layered, &config);

    // Demo 3: filter + cull
    demo_pipeline(&positioned, snapshot.links(), &config);

    Ok(())
}

/// Victim pays into a mule network that fans out to cash withdrawals
fn sample_case() -> Result<GraphSnapshot> {
    let bank = |name: &str, ifsc: &str, amount: f64| NodeMetadata {
        bank_name: Some(name.to_string()),
        ifsc_code: Some(ifsc.to_string()),
        amount: Some(amount),
        transaction_date: Some("2024-03-01".to_string()),
        ..Default::default()
    };

    let mut atm = NodeMetadata::default();
    atm.is_terminal = Some(true);
    atm.transaction_date = Some("2024-03-04 09:30:00".to_string());

    let nodes = vec![
        Node::new("victim", "Victim", "person"),
        Node::new("acc_victim", "Victim savings", "account")
            .with_metadata(bank("SBI", "SBIN0001234", 500_000.0)),
        Node::new("mule_1", "Mule account 1", "account")
            .with_risk(RiskLevel::High)
            .with_metadata(bank("HDFC", "HDFC0000456", 300_000.0)),
        Node::new("mule_2", "Mule account 2", "account")
            .with_risk(RiskLevel::High)
            .with_metadata(bank("HDFC", "HDFC0000456", 200_000.0)),
        Node::new("mule_3", "Mule account 3", "account")
            .with_risk(RiskLevel::Critical)
            .with_metadata(bank("ICICI", "ICIC0000789", 250_000.0)),
        Node::new("atm_1", "ATM withdrawal", "atm").with_metadata(atm),
        Node::new("phone_1", "+91 98xxxxxx01", "phone"),
    ];

    let links = vec![
        Link::new("owns", "victim", "acc_victim", "OWNS"),
        Link::transfer("t1", "acc_victim", "mule_1", 300_000.0).with_date("2024-03-01"),
        Link::transfer("t2", "acc_victim", "mule_2", 200_000.0).with_date("2024-03-01"),
        Link::transfer("t3", "mule_1", "mule_3", 250_000.0).with_date("2024-03-02"),
        Link::transfer("t4", "mule_2", "mule_3", 150_000.0).with_date("2024-03-02"),
        Link::transfer("t5", "mule_3", "mule_1", 20_000.0).with_date("2024-03-03"),
        Link::transfer("t6", "mule_3", "atm_1", 380_000.0).with_date("2024-03-04"),
        Link::new("c1", "phone_1", "victim", "CALLED").with_confidence(80),
    ];

    Ok(GraphSnapshot::new(nodes, links)?)
}

fn demo_analysis(snapshot: &GraphSnapshot, config: &EngineConfig) -> Result<GraphSnapshot> {
    println!("\n=== Demo 1: Analysis ===");
    let victim = NodeId::new("victim");

    let layered = snapshot.with_nodes(calculate_layers(snapshot, &victim))?;
    for node in layered.nodes() {
        println!("  {:<16} layer {}", node.label, node.layer.unwrap_or_default());
    }

    if let Some(path) = find_shortest_path(&layered, &victim, &NodeId::new("atm_1")) {
        let hops: Vec<&str> = path.nodes.iter().map(NodeId::as_str).collect();
        println!("\n✓ Shortest path ({} hops): {}", path.length, hops.join(" → "));
    }

    for cycle in detect_unique_cycles(&layered) {
        let ring: Vec<&str> = cycle.nodes.iter().map(NodeId::as_str).collect();
        println!(
            "✓ Cycle of {}: {} (₹{:.0})",
            cycle.length,
            ring.join(" → "),
            cycle.total_amount
        );
    }

    let flows = trace_money_flow(&layered, &NodeId::new("acc_victim"), 4, 100_000.0);
    println!("✓ {} money trails ≥ ₹100000 from the victim account", flows.len());
    for flow in &flows {
        let trail: Vec<&str> = flow.nodes.iter().map(NodeId::as_str).collect();
        println!("    {} (₹{:.0})", trail.join(" → "), flow.total_amount);
    }

    let communities = detect_communities(&layered);
    println!(
        "✓ {} communities, largest has {} members",
        communities.communities.len(),
        communities.largest()
    );

    let stats = calculate_statistics(&layered, &config.statistics);
    println!("\nCase Statistics:");
    println!("  Entities:          {}", stats.entity_count);
    println!("  Relationships:     {}", stats.relationship_count);
    println!("  Money moved:       ₹{:.0}", stats.total_money);
    println!("  Density:           {:.1}%", stats.density);
    println!("  Avg path length:   {:.2}", stats.avg_path_length);
    if let Some(range) = &stats.date_range {
        println!(
            "  Date range:        {} to {} ({} days)",
            range.start.date(),
            range.end.date(),
            range.span_days
        );
    }

    Ok(layered)
}

fn demo_layouts(snapshot: &GraphSnapshot, config: &EngineConfig) -> Vec<Node> {
    println!("\n=== Demo 2: Layouts ===");
    for kind in LayoutKind::ALL.iter().filter(|k| !k.is_placeholder()) {
        let outcome = apply_layout(kind.as_str(), snapshot, &config.layout);
        let placed = outcome.nodes.iter().filter(|n| n.position().is_some()).count();
        print!("  {:<13} {} nodes placed", kind.as_str(), placed);
        if let Some(vp) = outcome.suggested_viewport {
            print!(", suggested zoom {:.2}", vp.zoom);
        }
        println!();
    }

    apply_layout("force", snapshot, &config.layout).nodes
}

fn demo_pipeline(nodes: &[Node], links: &[Link], config: &EngineConfig) {
    println!("\n=== Demo 3: Filter & Viewport Culling ===");
    let types: FxHashSet<EntityType> =
        ["person", "account", "atm"].into_iter().map(EntityType::from).collect();
    let filters = GraphFilters {
        layers: LayerVisibility::custom([0, 1, 2, 3]).with_opacity(3, 0.4),
        ..Default::default()
    };
    let viewport =
        ViewportState::new(Default::default(), config.layout.width, config.layout.height);

    let result = run_pipeline(nodes, links, &types, &filters, &viewport, config.viewport.padding);
    let stats = result.stats;
    println!(
        "  Nodes: {} total → {} filtered → {} visible ({} culled)",
        stats.total_nodes, stats.filtered_nodes, stats.visible_nodes, stats.culled_nodes
    );
    println!(
        "  Links: {} total → {} filtered → {} visible ({} culled)",
        stats.total_links, stats.filtered_links, stats.visible_links, stats.culled_links
    );
}
