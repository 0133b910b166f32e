use crate::{
    pins::{full_name, pin_function, PARAMETER},
    ComponentIndex, Net, Node, PinType, TranslateError,
};

use super::{HalFile, Warning};

/// Emit a `net` line for every named net, then `sets` for nets driven by a
/// `PARAMETER`
///
/// A net needs exactly one output to drive it and at least one other pin.
/// Extra outputs are reported and ignored; nets without an output or without
/// inputs are reported and skipped.
pub(super) fn emit(index: &ComponentIndex, out: &mut HalFile) -> Result<(), TranslateError> {
    let mut signals = Vec::new();

    for net in index.netlist().nets.iter() {
        if net.nodes.len() < 2 || !net.is_named() {
            continue;
        }
        if let Some(driver) = wire(index, net, out)? {
            signals.push((net.label(), driver));
        }
    }

    if !signals.is_empty() {
        out.section("Connect signals to nets");
    }
    for (net, driver) in signals {
        let comp = index.get(driver.ref_des)?;
        out.push(format!("sets {net:<20} {}", comp.value));
    }
    Ok(())
}

/// Emit the `net` line of one named net
///
/// Returns the driver when it is a `PARAMETER`, which becomes a signal.
fn wire<'n, 'a>(
    index: &ComponentIndex<'n, 'a>,
    net: &'n Net<'a>,
    out: &mut HalFile,
) -> Result<Option<&'n Node<'a>>, TranslateError> {
    let name = net.label();

    let mut driver = None;
    let mut inputs = Vec::new();
    for node in &net.nodes {
        if node.typ != PinType::Output {
            inputs.push(node);
        } else if driver.is_none() {
            driver = Some(node);
        } else {
            out.warn(Warning::MultipleDrivers {
                net: name.to_owned(),
            });
        }
    }

    let Some(driver) = driver.filter(|_| !inputs.is_empty()) else {
        out.warn(Warning::Unwirable {
            net: name.to_owned(),
        });
        return Ok(None);
    };

    let mut line = format!("net {name}");
    let driver_comp = index.get(driver.ref_des)?;
    let signal = if driver_comp.part == PARAMETER {
        Some(driver)
    } else {
        let function = pin_function(index.netlist(), driver, driver_comp.part)?;
        line.push_str(&format!(" {} =>", full_name(driver_comp.value, function)));
        None
    };
    for node in inputs {
        let comp = index.get(node.ref_des)?;
        let function = pin_function(index.netlist(), node, comp.part)?;
        line.push(' ');
        line.push_str(&full_name(comp.value, function));
    }
    out.push(line);

    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, Design, NetList, PinNum, RefDes};
    use rstest::*;

    fn comp(ref_des: &'static str, part: &'static str, value: &'static str) -> Component<'static> {
        Component {
            ref_des: RefDes(ref_des),
            value,
            lib: "hal",
            part,
            fields: vec![],
            footprint: None,
        }
    }

    fn node(ref_des: &'static str, function: &'static str, typ: PinType) -> Node<'static> {
        Node {
            ref_des: RefDes(ref_des),
            num: PinNum("1"),
            function: Some(function),
            typ,
        }
    }

    fn netlist(nets: Vec<Net<'static>>) -> NetList<'static> {
        NetList {
            design: Design::default(),
            components: vec![
                comp("M1", "spindle.", "spindle.0"),
                comp("M2", "and2.", "and2.0"),
                comp("M3", "and2.", "and2.1"),
                comp("M4", "loadrt.motmod", "motion"),
                comp("P1", "PARAMETER", "1"),
            ],
            parts: vec![],
            nets,
        }
    }

    fn net(name: &'static str, nodes: Vec<Node<'static>>) -> Net<'static> {
        Net {
            code: "1",
            name,
            nodes,
        }
    }

    fn run(netlist: &NetList) -> Result<HalFile, TranslateError> {
        let index = ComponentIndex::new(netlist);
        let mut out = HalFile::default();
        emit(&index, &mut out)?;
        Ok(out)
    }

    #[test]
    fn one_driver_many_inputs() {
        let netlist = netlist(vec![net(
            "/spindle-enable",
            vec![
                node("M1", "enable", PinType::Output),
                node("M2", "in0", PinType::Input),
                node("M3", "in1", PinType::Input),
            ],
        )]);
        let out = run(&netlist).unwrap();
        assert_eq!(
            out.lines(),
            &["net spindle-enable spindle.0.enable => and2.0.in0 and2.1.in1"]
        );
        assert!(out.warnings().is_empty());
    }

    #[test]
    fn non_output_pins_are_all_driven() {
        let netlist = netlist(vec![net(
            "/x",
            vec![
                node("M2", "in0", PinType::Bidirectional),
                node("M4", "spindle-on", PinType::Output),
                node("M3", "in1", PinType::Passive),
            ],
        )]);
        let out = run(&netlist).unwrap();
        assert_eq!(out.lines(), &["net x motion.spindle-on => and2.0.in0 and2.1.in1"]);
    }

    #[test]
    fn first_of_multiple_drivers_wins() {
        let netlist = netlist(vec![net(
            "/out",
            vec![
                node("M2", "out", PinType::Output),
                node("M3", "out", PinType::Output),
                node("M1", "enable", PinType::Input),
            ],
        )]);
        let out = run(&netlist).unwrap();
        assert_eq!(
            out.lines(),
            &[
                "# WARNING: multiple outputs connected to net out",
                "net out and2.0.out => spindle.0.enable",
            ]
        );
        assert_eq!(
            out.warnings(),
            &[Warning::MultipleDrivers {
                net: "out".to_owned()
            }]
        );
    }

    #[rstest]
    #[case(vec![node("M2", "in0", PinType::Input), node("M3", "in1", PinType::Input)])]
    #[case(vec![node("M2", "out", PinType::Output), node("M3", "out", PinType::Output)])]
    fn unwirable_nets_are_skipped(#[case] nodes: Vec<Node<'static>>) {
        let netlist = netlist(vec![net("/dangling", nodes)]);
        let out = run(&netlist).unwrap();
        assert_eq!(
            out.lines().last().map(String::as_str),
            Some("# No suitable pins connected to net dangling")
        );
        assert!(!out.lines().iter().any(|line| line.starts_with("net ")));
        assert_eq!(
            out.warnings().last(),
            Some(&Warning::Unwirable {
                net: "dangling".to_owned()
            })
        );
    }

    #[test]
    fn unnamed_and_single_node_nets_are_ignored() {
        let netlist = netlist(vec![
            net(
                "Net-(M1-Pad1)",
                vec![
                    node("M1", "enable", PinType::Output),
                    node("M2", "in0", PinType::Input),
                ],
            ),
            net("/lonely", vec![node("M1", "enable", PinType::Output)]),
        ]);
        let out = run(&netlist).unwrap();
        assert!(out.lines().is_empty());
        assert!(out.warnings().is_empty());
    }

    #[test]
    fn parameter_driver_becomes_signal() {
        let netlist = netlist(vec![
            net(
                "/enable",
                vec![
                    node("P1", "~", PinType::Output),
                    node("M2", "in0", PinType::Input),
                ],
            ),
            net(
                "/spindle-enable",
                vec![
                    node("M1", "enable", PinType::Output),
                    node("M3", "in1", PinType::Input),
                ],
            ),
        ]);
        let out = run(&netlist).unwrap();
        assert_eq!(
            out.lines(),
            &[
                "net enable and2.0.in0",
                "net spindle-enable spindle.0.enable => and2.1.in1",
                "",
                "",
                "####################################################",
                "# Connect signals to nets",
                "sets enable               1",
            ]
        );
    }

    #[test]
    fn unresolved_input_pin_is_fatal() {
        let mut input = node("M2", "in0", PinType::Input);
        input.function = None;
        let netlist = netlist(vec![net(
            "/x",
            vec![node("M1", "enable", PinType::Output), input],
        )]);
        assert_eq!(
            run(&netlist).unwrap_err(),
            TranslateError::UnresolvedPin {
                part: "and2.".to_owned(),
                pin: "1".to_owned(),
            }
        );
    }
}
