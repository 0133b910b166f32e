use crate::{
    pins::{full_name, is_loadrt, pin_function, PARAMETER},
    ComponentIndex, Net, TranslateError,
};

use super::HalFile;

/// Emit a `setp` line for every unnamed net joining a `PARAMETER` to one pin
pub(super) fn emit(index: &ComponentIndex, out: &mut HalFile) -> Result<(), TranslateError> {
    for net in &index.netlist().nets {
        if net.nodes.len() != 2 || net.is_named() {
            continue;
        }
        if let Some((pin, value)) = parameter(index, net)? {
            out.push(format!("setp {pin:<20}\t{value}"));
        }
    }
    Ok(())
}

/// The pin name and literal value bound by a two node net, if it has both
fn parameter<'a>(
    index: &ComponentIndex<'_, 'a>,
    net: &Net<'a>,
) -> Result<Option<(String, &'a str)>, TranslateError> {
    let mut value = None;
    let mut pin = None;
    for node in &net.nodes {
        let comp = index.get(node.ref_des)?;
        if comp.part == PARAMETER {
            value = Some(comp.value);
        } else {
            let function = pin_function(index.netlist(), node, comp.part)?;
            pin = Some(if is_loadrt(comp.part) {
                function.to_owned()
            } else {
                full_name(comp.value, function)
            });
        }
    }
    Ok(pin.zip(value))
}
