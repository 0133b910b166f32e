use crate::{error::ParseError, sexpr::SExpr};

use super::{Component, Design, Net, NetList, Node, Part, Pin, Sheet};

impl<'a, 'b> TryFrom<&'b SExpr<'a>> for Sheet<'a> {
    type Error = ParseError;

    fn try_from(sheet: &'b SExpr<'a>) -> Result<Self, Self::Error> {
        let number = sheet.value("number")?;
        let name = sheet.value_or_empty("name");
        let (title, company, rev, date, source, comments) = match sheet.child("title_block") {
            Ok(block) => (
                block.value_or_empty("title"),
                block.value_or_empty("company"),
                block.value_or_empty("rev"),
                block.value_or_empty("date"),
                block.value_or_empty("source"),
                block
                    .children("comment")
                    .map(|comment| comment.value_or_empty("value"))
                    .collect::<Vec<_>>(),
            ),
            Err(_) => ("", "", "", "", "", vec![]),
        };
        Ok(Sheet {
            number,
            name,
            title,
            company,
            rev,
            date,
            source,
            comments,
        })
    }
}

impl<'a, 'b> TryFrom<&'b SExpr<'a>> for Design<'a> {
    type Error = ParseError;

    fn try_from(design: &'b SExpr<'a>) -> Result<Self, Self::Error> {
        let sheets = design
            .children("sheet")
            .map(Sheet::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Design {
            source: design.value_or_empty("source"),
            date: design.value_or_empty("date"),
            tool: design.value_or_empty("tool"),
            sheets,
        })
    }
}

impl<'a, 'b> TryFrom<&'b SExpr<'a>> for Component<'a> {
    type Error = ParseError;

    fn try_from(comp: &'b SExpr<'a>) -> Result<Self, Self::Error> {
        let ref_des = comp.value("ref")?;
        let value = comp.value("value")?;
        let libsource = comp.child("libsource")?;
        let part = libsource.value("part")?;
        let lib = libsource.value_or_empty("lib");
        let fields = comp
            .grandchildren("fields", "field")
            .map(|field| -> Result<_, ParseError> {
                Ok((field.value("name")?, field.text().unwrap_or("")))
            })
            .collect::<Result<_, ParseError>>()?;
        let properties = comp
            .children("property")
            .map(|prop| -> Result<_, ParseError> {
                Ok((prop.value("name")?, prop.value_or_empty("value")))
            })
            .collect::<Result<_, ParseError>>()?;
        let footprint = comp.opt_value("footprint");
        Ok(Component {
            ref_des,
            value,
            part,
            lib,
            fields,
            properties,
            footprint,
        })
    }
}

impl<'a, 'b> TryFrom<&'b SExpr<'a>> for Pin<'a> {
    type Error = ParseError;

    fn try_from(pin: &'b SExpr<'a>) -> Result<Self, Self::Error> {
        Ok(Pin {
            num: pin.value("num")?,
            name: pin.value_or_empty("name"),
            typ: pin.value("type")?,
        })
    }
}

impl<'a, 'b> TryFrom<&'b SExpr<'a>> for Part<'a> {
    type Error = ParseError;

    fn try_from(libpart: &'b SExpr<'a>) -> Result<Self, Self::Error> {
        let pins = libpart
            .grandchildren("pins", "pin")
            .map(Pin::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Part {
            part: libpart.value("part")?,
            lib: libpart.value_or_empty("lib"),
            description: libpart.value_or_empty("description"),
            pins,
        })
    }
}

impl<'a, 'b> TryFrom<&'b SExpr<'a>> for Node<'a> {
    type Error = ParseError;

    fn try_from(node: &'b SExpr<'a>) -> Result<Self, Self::Error> {
        Ok(Node {
            ref_des: node.value("ref")?,
            num: node.value("pin")?,
            function: node.opt_value("pinfunction"),
            typ: node.opt_value("pintype"),
        })
    }
}

impl<'a, 'b> TryFrom<&'b SExpr<'a>> for Net<'a> {
    type Error = ParseError;

    fn try_from(net: &'b SExpr<'a>) -> Result<Self, Self::Error> {
        let nodes = net
            .children("node")
            .map(Node::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Net {
            code: net.value_or_empty("code"),
            name: net.value("name")?,
            nodes,
        })
    }
}

impl<'a, 'b> TryFrom<&'b SExpr<'a>> for NetList<'a> {
    type Error = ParseError;

    fn try_from(export: &'b SExpr<'a>) -> Result<Self, Self::Error> {
        let design = match export.child("design") {
            Ok(design) => Design::try_from(design)?,
            Err(_) => Design::default(),
        };
        let components = export
            .grandchildren("components", "comp")
            .map(Component::try_from)
            .collect::<Result<_, _>>()?;
        let parts = export
            .grandchildren("libparts", "libpart")
            .map(Part::try_from)
            .collect::<Result<_, _>>()?;
        let nets = export
            .grandchildren("nets", "net")
            .map(Net::try_from)
            .collect::<Result<_, _>>()?;
        Ok(NetList {
            design,
            components,
            parts,
            nets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_with_fields_and_properties() {
        let input = r#"(comp (ref "THR1")
            (value "servo-thread")
            (fields (field (name "Footprint")) (field (name "Order") "pid, and2"))
            (libsource (lib "hal") (part "thread") (description "Realtime thread"))
            (property (name "Sheetname") (value "")))"#;
        let sexpr = SExpr::try_from(input).unwrap();
        let comp = Component::try_from(&sexpr).unwrap();
        assert_eq!(comp.ref_des, "THR1");
        assert_eq!(comp.value, "servo-thread");
        assert_eq!(comp.part, "thread");
        assert_eq!(comp.lib, "hal");
        assert_eq!(comp.fields, vec![("Footprint", ""), ("Order", "pid, and2")]);
        assert_eq!(comp.properties, vec![("Sheetname", "")]);
        assert_eq!(comp.footprint, None);
    }

    #[test]
    fn component_without_libsource_fails() {
        let sexpr = SExpr::try_from(r#"(comp (ref "U1") (value "x"))"#).unwrap();
        let err = Component::try_from(&sexpr).unwrap_err();
        assert_eq!(err, ParseError::MissingChild("libsource".to_owned()));
    }

    #[test]
    fn node_with_optional_parts_missing() {
        let sexpr = SExpr::try_from(r#"(node (ref "P1") (pin "1"))"#).unwrap();
        let node = Node::try_from(&sexpr).unwrap();
        assert_eq!(node.ref_des, "P1");
        assert_eq!(node.num, "1");
        assert_eq!(node.function, None);
        assert_eq!(node.typ, None);
    }

    #[test]
    fn sheet_with_empty_title_block_entries() {
        let input = r#"(sheet (number "1") (name "/") (tstamps "/")
            (title_block (title "Mill") (company) (rev "A") (date) (source "mill.kicad_sch")
              (comment (number "1") (value "Servo loop"))
              (comment (number "2") (value ""))))"#;
        let sexpr = SExpr::try_from(input).unwrap();
        let sheet = Sheet::try_from(&sexpr).unwrap();
        assert_eq!(sheet.number, "1");
        assert_eq!(sheet.title, "Mill");
        assert_eq!(sheet.company, "");
        assert_eq!(sheet.rev, "A");
        assert_eq!(sheet.comments, vec!["Servo loop", ""]);
    }
}
