//! Loop-shaped topologies built through the public API.

use hs_graph::{GraphBuilder, Medium, PortKind};

#[test]
fn pump_between_supply_nodes() {
    let mut builder = GraphBuilder::new();
    let inlet = builder.add_node("Chilled Water Loop Supply Inlet Node", Medium::Water);
    let outlet = builder.add_node("Chilled Water Loop Supply Outlet Node", Medium::Water);
    let pump = builder.add_component("Chilled Water Loop Pump", inlet, outlet);

    let graph = builder.build().unwrap();
    assert_eq!((graph.nodes().len(), graph.components().len(), graph.ports().len()), (2, 1, 2));

    let comp = graph.component(pump).unwrap();
    let inlet_port = graph.port(comp.inlet).unwrap();
    let outlet_port = graph.port(comp.outlet).unwrap();
    assert_eq!((inlet_port.node, inlet_port.kind), (inlet, PortKind::Inlet));
    assert_eq!((outlet_port.node, outlet_port.kind), (outlet, PortKind::Outlet));
    assert_eq!(graph.comp_inlet_node(pump), Some(inlet));
    assert_eq!(graph.comp_outlet_node(pump), Some(outlet));
}

#[test]
fn supply_side_with_bypass_closes() {
    let mut builder = GraphBuilder::new();
    let inlet = builder.add_node("Inlet", Medium::Water);
    let split = builder.add_node("Splitter", Medium::Water);
    let mix = builder.add_node("Mixer", Medium::Water);
    let outlet = builder.add_node("Outlet", Medium::Water);
    builder.add_component("Pump", inlet, split);
    builder.add_component("Boiler", split, mix);
    builder.add_component("Bypass Pipe", split, mix);
    builder.add_component("Outlet Pipe", mix, outlet);

    let graph = builder.build().unwrap();
    assert_eq!(graph.fan_out(split), 2);
    assert_eq!(graph.node_ports(mix).len(), 3);
    assert!(graph.reachable(inlet, outlet));
}

#[test]
fn moving_the_pump_ahead_of_the_splitter() {
    let mut builder = GraphBuilder::new();
    let inlet = builder.add_node("Inlet", Medium::Water);
    let split = builder.add_node("Splitter", Medium::Water);
    let mid = builder.add_node("Chiller Inlet", Medium::Water);
    let mix = builder.add_node("Mixer", Medium::Water);
    let pump = builder.add_component("Pump", split, mid);
    let chiller = builder.add_component("Chiller", mid, mix);

    builder.set_inlet_node(chiller, split).unwrap();
    builder.set_inlet_node(pump, inlet).unwrap();
    builder.set_outlet_node(pump, split).unwrap();

    let graph = builder.build().unwrap();
    assert!(graph.reachable(inlet, mix));
    assert_eq!(graph.comp_inlet_node(chiller), Some(split));
    assert!(graph.node_ports(mid).is_empty());
}

#[test]
fn terminal_ducted_into_a_water_node_fails_to_build() {
    let mut builder = GraphBuilder::new();
    let demand = builder.add_node("VAV Demand Inlet", Medium::Air);
    let pipe = builder.add_node("Hot Water Demand Inlet", Medium::Water);
    builder.add_component("VAV Terminal", demand, pipe);
    let err = builder.build().unwrap_err();
    assert!(err.to_string().contains("joins a air node to a water node"));
}

#[test]
fn lookups_by_id_and_name() {
    let mut builder = GraphBuilder::new();
    let zone = builder.add_node("Office Air Node", Medium::Air);
    let ret = builder.add_node("Office Return Node", Medium::Air);
    let diffuser = builder.add_component("Office Return", zone, ret);

    let graph = builder.build().unwrap();
    assert_eq!(graph.node(zone).unwrap().medium, Medium::Air);
    assert_eq!(graph.component(diffuser).unwrap().name, "Office Return");
    assert_eq!(graph.node_by_name("Office Return Node").map(|n| n.id), Some(ret));
    assert_eq!(graph.nodes_carrying(Medium::Water).count(), 0);

    let bogus = hs_core::NodeId::from_index(999);
    assert!(graph.node(bogus).is_none());
    assert!(graph.node_ports(bogus).is_empty());
}

#[test]
fn empty_graph_builds() {
    let graph = GraphBuilder::new().build().unwrap();
    assert!(graph.nodes().is_empty() && graph.components().is_empty() && graph.ports().is_empty());
}
