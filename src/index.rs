use std::collections::HashMap;

use crate::{Component, Net, NetList, RefDes, TranslateError};

/// Read-only lookup from reference designator to component
///
/// Built once per translation and passed to every pass.
#[derive(Debug)]
pub struct ComponentIndex<'n, 'a> {
    netlist: &'n NetList<'a>,
    components: HashMap<&'a str, &'n Component<'a>>,
}

impl<'n, 'a> ComponentIndex<'n, 'a> {
    pub fn new(netlist: &'n NetList<'a>) -> Self {
        let components = netlist
            .components
            .iter()
            .map(|comp| (comp.ref_des.0, comp))
            .collect();
        Self {
            netlist,
            components,
        }
    }

    pub fn netlist(&self) -> &'n NetList<'a> {
        self.netlist
    }

    pub fn get(&self, ref_des: RefDes) -> Result<&'n Component<'a>, TranslateError> {
        self.components
            .get(ref_des.0)
            .copied()
            .ok_or_else(|| TranslateError::UnknownComponent(ref_des.0.to_owned()))
    }

    /// Components in netlist order
    pub fn components(&self) -> impl Iterator<Item = &'n Component<'a>> {
        let netlist = self.netlist;
        netlist.components.iter()
    }

    /// Components whose library part is exactly `part`
    pub fn instances_of<'p>(&self, part: &'p str) -> impl Iterator<Item = &'n Component<'a>> + 'p
    where
        'n: 'p,
    {
        let netlist = self.netlist;
        netlist
            .components
            .iter()
            .filter(move |comp| comp.part == part)
    }

    /// Nets with at least one node on the component, in netlist order
    pub fn nets_of(&self, ref_des: RefDes<'a>) -> impl Iterator<Item = &'n Net<'a>> {
        let netlist = self.netlist;
        netlist.nets.iter().filter(move |net| net.contains(ref_des))
    }
}
