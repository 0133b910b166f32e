use indexmap::IndexMap;

use crate::{
    pins::{is_loadrt, pin_function, THREAD},
    Component, ComponentIndex, Net, PinType, TranslateError,
};

use super::HalFile;

const ORDER: &str = "order";
const SEQUENCE: &str = "sequence";

/// Emit the `addf` lines of every thread
///
/// Each net a thread is on is scheduled on its own. Functions named in the
/// thread's `order` (or `sequence`) field come first, in field order; the
/// rest follow in net order.
pub(super) fn emit(index: &ComponentIndex, out: &mut HalFile) -> Result<(), TranslateError> {
    for thread in index.instances_of(THREAD) {
        let sequence = sequence(thread);
        for net in index.nets_of(thread.ref_des) {
            let hooks = hooks(index, thread, net)?;
            for line in schedule(hooks, &sequence) {
                out.push(line);
            }
        }
    }
    Ok(())
}

/// Name prefixes from the thread's `order` or `sequence` field
///
/// A leading separator gives an empty first prefix, which matches every hook.
fn sequence<'a>(thread: &Component<'a>) -> Vec<&'a str> {
    thread
        .fields
        .iter()
        .find(|field| {
            field.name.eq_ignore_ascii_case(ORDER) || field.name.eq_ignore_ascii_case(SEQUENCE)
        })
        .map(|field| split_sequence(field.value))
        .unwrap_or_default()
}

/// Split on runs of `,` `;` and space, keeping a leading empty token
fn split_sequence(value: &str) -> Vec<&str> {
    let mut tokens = value.split([',', ';', ' ']);
    tokens
        .next()
        .into_iter()
        .chain(tokens.filter(|token| !token.is_empty()))
        .collect()
}

/// `addf` lines for the inputs on `net`, keyed by function name, in net order
fn hooks<'a>(
    index: &ComponentIndex<'_, 'a>,
    thread: &Component<'a>,
    net: &Net<'a>,
) -> Result<IndexMap<&'a str, String>, TranslateError> {
    let netlist = index.netlist();

    // e.g. a position like `1` to hook in front of other functions
    let position = match net.nodes.iter().find(|node| node.ref_des == thread.ref_des) {
        Some(node) => pin_function(netlist, node, thread.part)?,
        None => "",
    };

    let mut hooks = IndexMap::new();
    let candidates = net
        .nodes
        .iter()
        .filter(|node| node.typ == PinType::Input && node.ref_des != thread.ref_des);
    for node in candidates {
        let comp = index.get(node.ref_des)?;
        let function = if is_loadrt(comp.part) {
            pin_function(netlist, node, comp.part)?
        } else {
            comp.value
        };
        let line = if position.is_empty() {
            format!("addf {function:<20}\t{}", thread.value)
        } else {
            format!("addf {function:<20}\t{:<10} {position}", thread.value)
        };
        hooks.insert(function, line);
    }
    Ok(hooks)
}

/// Order hook lines by the prefixes in `sequence`
///
/// Every prefix takes all remaining hooks that start with it. Hooks matched by
/// no prefix come last. Relative net order is kept throughout.
fn schedule(hooks: IndexMap<&str, String>, sequence: &[&str]) -> Vec<String> {
    let mut pending: Vec<(&str, String)> = hooks.into_iter().collect();
    let mut lines = Vec::with_capacity(pending.len());
    for prefix in sequence {
        let (matched, rest): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|(function, _)| function.starts_with(*prefix));
        lines.extend(matched.into_iter().map(|(_, line)| line));
        pending = rest;
    }
    lines.extend(pending.into_iter().map(|(_, line)| line));
    lines
}
