//! Resolving nodes to HAL pin and function names

use crate::{NetList, Node, TranslateError};

/// Part name prefix of components loaded with `loadrt`
pub const LOADRT: &str = "loadrt";
/// Part name prefix of components loaded with `loadusr`
pub const LOADUSR: &str = "loadusr";
/// Part name of realtime threads
pub const THREAD: &str = "thread";
/// Part name of components whose value is a literal
pub const PARAMETER: &str = "PARAMETER";
/// All BeagleBone GPIO pins live in one namespace, whatever the component value
pub const GPIO_PREFIX: &str = "bb_gpio.";

/// Realtime modules export their pins and functions without an instance prefix
pub fn is_loadrt(part: &str) -> bool {
    part.starts_with(LOADRT)
}

/// The function of the pin a node is connected to
///
/// An explicit pin function on the node wins. Otherwise the pin is looked up by
/// number in the library part named `part`.
pub fn pin_function<'a>(
    netlist: &NetList<'a>,
    node: &Node<'a>,
    part: &str,
) -> Result<&'a str, TranslateError> {
    if let Some(function) = node.function {
        return Ok(function);
    }
    netlist
        .parts
        .iter()
        .filter(|p| p.part == part)
        .find_map(|p| p.pin(node.num))
        .map(|pin| pin.name)
        .ok_or_else(|| TranslateError::UnresolvedPin {
            part: part.to_owned(),
            pin: node.num.0.to_owned(),
        })
}

/// Join a component value and a pin function into a HAL pin name
pub fn full_name(value: &str, function: &str) -> String {
    if value.starts_with(GPIO_PREFIX) {
        format!("{GPIO_PREFIX}{function}")
    } else if value.ends_with('.') {
        format!("{value}{function}")
    } else {
        format!("{value}.{function}")
    }
}

/// The HAL module a part instantiates: the part name up to its first `.`
///
/// Eeschema may append an instance id after the dot.
pub fn module_name(part: &str) -> &str {
    part.split_once('.').map_or(part, |(module, _)| module)
}
