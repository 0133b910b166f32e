//! Translate KiCad netlists of LinuxCNC HAL schematics into HAL configuration files.
//!
//! A netlist is read with [`NetList::parse`] and handed to [`translate`], which
//! yields the `.hal` file as a [`HalFile`].

mod error;
pub mod hal;
mod index;
mod parse;
pub mod pins;
mod raw;
mod sexpr;

pub use error::{ParseError, TranslateError};
pub use hal::{translate, HalFile, Translator, Warning};
pub use index::ComponentIndex;
pub use raw::{Design, Sheet};

/// A component reference designator, e.g. `THR1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefDes<'a>(pub &'a str);

/// A pin number as given in the library part, e.g. `1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinNum<'a>(pub &'a str);

/// Electrical type of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinType {
    Input,
    Output,
    Bidirectional,
    TriState,
    Passive,
    Free,
    Unspecified,
    PowerInput,
    PowerOutput,
    OpenCollector,
    OpenEmitter,
    Unconnected,
}

/// The full netlist
#[derive(Debug, Clone)]
pub struct NetList<'a> {
    pub design: Design<'a>,
    pub components: Vec<Component<'a>>,
    pub parts: Vec<Part<'a>>,
    pub nets: Vec<Net<'a>>,
}

/// A name/value pair attached to a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// A component in the schematic
#[derive(Debug, Clone)]
pub struct Component<'a> {
    pub ref_des: RefDes<'a>,
    pub value: &'a str,
    pub lib: &'a str,
    /// Name of the library part this component is an instance of
    pub part: &'a str,
    pub fields: Vec<Field<'a>>,
    pub footprint: Option<&'a str>,
}

/// A pin of a library part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartPin<'a> {
    pub num: PinNum<'a>,
    pub name: &'a str,
    pub typ: PinType,
}

/// A library part
#[derive(Debug, Clone)]
pub struct Part<'a> {
    pub lib: &'a str,
    pub part: &'a str,
    pub description: &'a str,
    pub pins: Vec<PartPin<'a>>,
}

/// A node connects a net to a component pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<'a> {
    pub ref_des: RefDes<'a>,
    pub num: PinNum<'a>,
    /// Pin function written by the schematic editor, overriding the library pin name
    pub function: Option<&'a str>,
    pub typ: PinType,
}

/// A net
#[derive(Debug, Clone)]
pub struct Net<'a> {
    /// A unique id for the net
    pub code: &'a str,
    pub name: &'a str,
    pub nodes: Vec<Node<'a>>,
}

impl<'a> NetList<'a> {
    /// Parse the s-expression netlist export written by Eeschema
    pub fn parse(input: &'a str) -> Result<Self, ParseError> {
        let sexpr = sexpr::SExpr::try_from(input)?;
        let export = raw::NetList::try_from(&sexpr)?;
        export.try_into()
    }
}

impl<'a> Component<'a> {
    /// Look up a field, ignoring the case of its name
    pub fn field(&self, name: &str) -> Option<&Field<'a>> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }
}

impl<'a> Part<'a> {
    pub fn pin(&self, num: PinNum) -> Option<&PartPin<'a>> {
        self.pins.iter().find(|pin| pin.num == num)
    }
}

impl<'a> Net<'a> {
    /// Nets named in the schematic start with `/`, generated ones do not
    pub fn is_named(&self) -> bool {
        self.name.starts_with('/')
    }

    /// The net name without its leading `/`
    pub fn label(&self) -> &'a str {
        self.name.strip_prefix('/').unwrap_or(self.name)
    }

    pub fn contains(&self, ref_des: RefDes) -> bool {
        self.nodes.iter().any(|node| node.ref_des == ref_des)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    macro_rules! test_data {
        ($fname:expr) => {
            std::fs::read_to_string(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/resources/test/",
                $fname
            ))
            .unwrap()
        };
    }

    #[test]
    fn can_parse_full_file() {
        let input = test_data!("mill.net");
        let netlist = NetList::parse(&input).unwrap();

        assert_eq!(netlist.design.tool, "Eeschema 7.0.10");
        assert_eq!(netlist.design.sheets.len(), 1);
        assert_eq!(netlist.components.len(), 12);
        assert_eq!(netlist.parts.len(), 8);
        assert_eq!(netlist.nets.len(), 7);

        let thread = &netlist.components[0];
        assert_eq!(thread.ref_des, RefDes("THR1"));
        assert_eq!(thread.part, "thread");
        assert_eq!(thread.field("ORDER").map(|f| f.value), Some("motion;and2"));
    }

    #[test]
    fn translates_full_file() {
        let input = test_data!("mill.net");
        let expected = test_data!("mill.hal");
        let netlist = NetList::parse(&input).unwrap();

        let hal = translate(&netlist).unwrap();

        assert_eq!(hal.to_string(), expected);
        assert_eq!(
            hal.warnings(),
            &[
                Warning::MultipleDrivers {
                    net: "dangling".to_owned()
                },
                Warning::Unwirable {
                    net: "dangling".to_owned()
                },
            ]
        );
    }

    #[rstest]
    #[case("/spindle-enable", true, "spindle-enable")]
    #[case("Net-(P1-Pad1)", false, "Net-(P1-Pad1)")]
    fn net_names(#[case] name: &str, #[case] named: bool, #[case] label: &str) {
        let net = Net {
            code: "1",
            name,
            nodes: vec![],
        };
        assert_eq!(net.is_named(), named);
        assert_eq!(net.label(), label);
    }

    #[test]
    fn field_lookup_ignores_case() {
        let comp = Component {
            ref_des: RefDes("THR1"),
            value: "servo-thread",
            lib: "hal",
            part: "thread",
            fields: vec![Field {
                name: "Sequence",
                value: "a b",
            }],
            footprint: None,
        };
        assert!(comp.field("sequence").is_some());
        assert!(comp.field("order").is_none());
    }
}
