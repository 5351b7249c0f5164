//! Ordered equipment chains between two fixed nodes.
//!
//! A segment owns the order of the components placed between its `from` and
//! `to` nodes and keeps the graph wiring consistent with that order. The end
//! nodes never change, so setpoint managers and overrides bound to them stay
//! valid while equipment is inserted or relocated.

use hs_core::{CompId, EquipId, HsResult, NodeId};
use hs_graph::GraphBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentItem {
    pub equip: EquipId,
    pub comp: CompId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    from: NodeId,
    to: NodeId,
    items: Vec<SegmentItem>,
}

impl Segment {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            items: Vec::new(),
        }
    }

    pub fn from_node(&self) -> NodeId {
        self.from
    }

    pub fn to_node(&self) -> NodeId {
        self.to
    }

    pub fn items(&self) -> &[SegmentItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, equip: EquipId) -> bool {
        self.items.iter().any(|i| i.equip == equip)
    }

    /// Equipment in flow order.
    pub fn equipment(&self) -> impl Iterator<Item = EquipId> + '_ {
        self.items.iter().map(|i| i.equip)
    }

    /// Place a new component for `equip` just upstream of `to`.
    pub(crate) fn push_back(
        &mut self,
        graph: &mut GraphBuilder,
        equip: EquipId,
        name: &str,
    ) -> HsResult<CompId> {
        let comp = graph.add_component(name, self.from, self.to);
        self.link_back(graph, SegmentItem { equip, comp }, name)?;
        Ok(comp)
    }

    /// Place a new component for `equip` just downstream of `from`.
    pub(crate) fn push_front(
        &mut self,
        graph: &mut GraphBuilder,
        equip: EquipId,
        name: &str,
    ) -> HsResult<CompId> {
        let comp = graph.add_component(name, self.from, self.to);
        self.link_front(graph, SegmentItem { equip, comp }, name)?;
        Ok(comp)
    }

    /// Rewire an existing component onto the downstream end.
    pub(crate) fn link_back(
        &mut self,
        graph: &mut GraphBuilder,
        item: SegmentItem,
        name: &str,
    ) -> HsResult<()> {
        let inlet = match self.items.last() {
            None => self.from,
            Some(last) => {
                let medium = graph.node_medium(self.from)?;
                let node = graph.add_node(format!("{name} Inlet Node"), medium);
                graph.set_outlet_node(last.comp, node)?;
                node
            }
        };
        graph.set_inlet_node(item.comp, inlet)?;
        graph.set_outlet_node(item.comp, self.to)?;
        self.items.push(item);
        Ok(())
    }

    /// Rewire an existing component onto the upstream end.
    pub(crate) fn link_front(
        &mut self,
        graph: &mut GraphBuilder,
        item: SegmentItem,
        name: &str,
    ) -> HsResult<()> {
        let outlet = match self.items.first() {
            None => self.to,
            Some(first) => {
                let medium = graph.node_medium(self.from)?;
                let node = graph.add_node(format!("{name} Outlet Node"), medium);
                graph.set_inlet_node(first.comp, node)?;
                node
            }
        };
        graph.set_inlet_node(item.comp, self.from)?;
        graph.set_outlet_node(item.comp, outlet)?;
        self.items.insert(0, item);
        Ok(())
    }

    /// Take `equip` out of the chain, closing the gap it leaves. The detached
    /// component keeps its old ports until it is linked elsewhere.
    pub(crate) fn detach(
        &mut self,
        graph: &mut GraphBuilder,
        equip: EquipId,
    ) -> HsResult<Option<SegmentItem>> {
        let Some(pos) = self.items.iter().position(|i| i.equip == equip) else {
            return Ok(None);
        };
        let item = self.items.remove(pos);
        let inlet = graph.inlet_node(item.comp)?;
        let outlet = graph.outlet_node(item.comp)?;
        if let Some(next) = self.items.get(pos) {
            graph.set_inlet_node(next.comp, inlet)?;
        } else if pos > 0 {
            graph.set_outlet_node(self.items[pos - 1].comp, outlet)?;
        }
        Ok(Some(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_core::Id;
    use hs_graph::Medium;

    fn chain(graph: &GraphBuilder, seg: &Segment) -> Vec<(NodeId, NodeId)> {
        seg.items()
            .iter()
            .map(|i| {
                (
                    graph.inlet_node(i.comp).unwrap(),
                    graph.outlet_node(i.comp).unwrap(),
                )
            })
            .collect()
    }

    fn assert_contiguous(graph: &GraphBuilder, seg: &Segment) {
        let links = chain(graph, seg);
        if links.is_empty() {
            return;
        }
        assert_eq!(links[0].0, seg.from_node());
        assert_eq!(links[links.len() - 1].1, seg.to_node());
        for pair in links.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn push_back_and_front_keep_chain_contiguous() {
        let mut graph = GraphBuilder::new();
        let a = graph.add_node("A", Medium::Air);
        let b = graph.add_node("B", Medium::Air);
        let mut seg = Segment::new(a, b);

        seg.push_back(&mut graph, Id::from_index(0), "Fan").unwrap();
        seg.push_front(&mut graph, Id::from_index(1), "Heating Coil").unwrap();
        seg.push_front(&mut graph, Id::from_index(2), "Cooling Coil").unwrap();
        seg.push_back(&mut graph, Id::from_index(3), "Humidifier").unwrap();

        let order: Vec<u32> = seg.equipment().map(|e| e.index()).collect();
        assert_eq!(order, vec![2, 1, 0, 3]);
        assert_contiguous(&graph, &seg);
        assert!(graph.build().unwrap().reachable(a, b));
    }

    #[test]
    fn detach_and_relink_moves_component() {
        let mut graph = GraphBuilder::new();
        let a = graph.add_node("A", Medium::Water);
        let b = graph.add_node("B", Medium::Water);
        let c = graph.add_node("C", Medium::Water);
        let mut branch = Segment::new(a, b);
        let mut header = Segment::new(c, a);

        branch.push_back(&mut graph, Id::from_index(0), "Pump").unwrap();
        branch.push_back(&mut graph, Id::from_index(1), "Chiller").unwrap();

        let item = branch.detach(&mut graph, Id::from_index(0)).unwrap().unwrap();
        header.link_back(&mut graph, item, "Pump").unwrap();

        assert_eq!(branch.len(), 1);
        assert_contiguous(&graph, &branch);
        assert_contiguous(&graph, &header);
        assert!(graph.build().unwrap().reachable(c, b));
        assert!(branch.detach(&mut graph, Id::from_index(7)).unwrap().is_none());
    }

    #[test]
    fn detaching_last_item_reconnects_predecessor() {
        let mut graph = GraphBuilder::new();
        let a = graph.add_node("A", Medium::Water);
        let b = graph.add_node("B", Medium::Water);
        let mut seg = Segment::new(a, b);
        seg.push_back(&mut graph, Id::from_index(0), "Boiler").unwrap();
        seg.push_back(&mut graph, Id::from_index(1), "Pipe").unwrap();

        seg.detach(&mut graph, Id::from_index(1)).unwrap();
        assert_contiguous(&graph, &seg);
    }
}
