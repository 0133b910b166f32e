use indexmap::IndexMap;
use tracing::debug;

use crate::{
    pins::{is_loadrt, module_name, LOADRT, LOADUSR, THREAD},
    Component, ComponentIndex, PinType, TranslateError,
};

use super::HalFile;

/// Emit the `loadusr` and `loadrt` lines
///
/// Components whose part is a `loadusr`/`loadrt` part carry their complete load
/// line as value. Everything else hooked into a thread is loaded by module name
/// with an instance count.
pub(super) fn emit(index: &ComponentIndex, out: &mut HalFile) -> Result<(), TranslateError> {
    for prefix in [LOADUSR, LOADRT] {
        for comp in load_order(index, prefix) {
            out.push(comp.value);
        }
    }

    for (module, count) in thread_modules(index)? {
        out.push(format!("loadrt {module:<20} count={count}"));
    }
    Ok(())
}

/// Components with a part starting with `prefix`, by descending sort key
fn load_order<'n, 'a>(index: &ComponentIndex<'n, 'a>, prefix: &str) -> Vec<&'n Component<'a>> {
    let mut modules: Vec<_> = index
        .components()
        .filter(|comp| comp.part.starts_with(prefix))
        .collect();
    // Stable, so equal keys keep netlist order
    modules.sort_by_key(|comp| std::cmp::Reverse(sort_key(comp.ref_des.0)));
    modules
}

/// Sort key of a reference designator
///
/// The digits are folded as `key * (10 + digit)`, so starting from zero the
/// key stays zero. Files generated so far depend on the resulting netlist
/// order.
pub(crate) fn sort_key(ref_des: &str) -> i32 {
    ref_des
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0i32, |key, digit| key.wrapping_mul(10 + digit as i32))
}

/// Module names of the non-`loadrt` components hooked into any thread, with
/// the number of instances, in the order they are first seen
fn thread_modules<'a>(
    index: &ComponentIndex<'_, 'a>,
) -> Result<IndexMap<&'a str, usize>, TranslateError> {
    let mut counts = IndexMap::new();
    for thread in index.instances_of(THREAD) {
        for net in index.nets_of(thread.ref_des) {
            let inputs = net
                .nodes
                .iter()
                .filter(|node| node.typ == PinType::Input && node.ref_des != thread.ref_des);
            for node in inputs {
                let comp = index.get(node.ref_des)?;
                if is_loadrt(comp.part) {
                    continue;
                }
                *counts.entry(module_name(comp.part)).or_insert(0) += 1;
            }
        }
    }
    debug!(modules = counts.len(), "thread modules counted");
    Ok(counts)
}
