use std::collections::HashSet;

use crate::{
    raw, Component, Field, Net, NetList, Node, ParseError, Part, PartPin, PinNum, PinType, RefDes,
};

impl TryFrom<&str> for PinType {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.ends_with("no_connect") {
            return Ok(Self::Unconnected);
        }
        match value {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            "bidirectional" => Ok(Self::Bidirectional),
            "tri_state" => Ok(Self::TriState),
            "passive" => Ok(Self::Passive),
            "free" => Ok(Self::Free),
            "unspecified" => Ok(Self::Unspecified),
            "power_in" => Ok(Self::PowerInput),
            "power_out" => Ok(Self::PowerOutput),
            "open_collector" => Ok(Self::OpenCollector),
            "open_emitter" => Ok(Self::OpenEmitter),
            s => Err(ParseError::UnknownPinType(s.to_owned())),
        }
    }
}

impl<'a> TryFrom<raw::Pin<'a>> for PartPin<'a> {
    type Error = ParseError;

    fn try_from(value: raw::Pin<'a>) -> Result<Self, Self::Error> {
        let raw::Pin { num, name, typ } = value;
        let num = PinNum(num);
        let typ = typ.try_into()?;
        Ok(PartPin { num, name, typ })
    }
}

impl<'a> TryFrom<raw::Part<'a>> for Part<'a> {
    type Error = ParseError;

    fn try_from(value: raw::Part<'a>) -> Result<Self, Self::Error> {
        let raw::Part {
            part,
            lib,
            description,
            pins,
        } = value;
        let pins: Vec<PartPin> = pins
            .into_iter()
            .map(|pin| pin.try_into())
            .collect::<Result<_, _>>()?;

        let mut seen = HashSet::new();
        if let Some(dup) = pins.iter().find(|pin| !seen.insert(pin.num)) {
            return Err(ParseError::DuplicatePin(
                part.to_owned(),
                dup.num.0.to_owned(),
            ));
        }

        Ok(Part {
            lib,
            part,
            description,
            pins,
        })
    }
}

impl<'a> From<raw::Component<'a>> for Component<'a> {
    fn from(value: raw::Component<'a>) -> Self {
        let raw::Component {
            ref_des,
            value,
            part,
            lib,
            fields,
            properties,
            footprint,
        } = value;

        // Newer Eeschema versions repeat user fields as properties
        let mut fields: Vec<Field> = fields
            .into_iter()
            .map(|(name, value)| Field { name, value })
            .collect();
        for (name, value) in properties {
            if fields.iter().all(|field| field.name != name) {
                fields.push(Field { name, value });
            }
        }

        Component {
            ref_des: RefDes(ref_des),
            value,
            lib,
            part,
            fields,
            footprint,
        }
    }
}

impl<'a> TryFrom<raw::Node<'a>> for Node<'a> {
    type Error = ParseError;

    fn try_from(value: raw::Node<'a>) -> Result<Self, Self::Error> {
        let raw::Node {
            ref_des,
            num,
            function,
            typ,
        } = value;
        let ref_des = RefDes(ref_des);
        let num = PinNum(num);
        let typ = match typ {
            Some(typ) => PinType::try_from(typ)?,
            None => PinType::Unspecified,
        };
        Ok(Node {
            ref_des,
            num,
            function,
            typ,
        })
    }
}

impl<'a> TryFrom<raw::Net<'a>> for Net<'a> {
    type Error = ParseError;

    fn try_from(value: raw::Net<'a>) -> Result<Self, Self::Error> {
        let raw::Net { code, name, nodes } = value;
        let nodes = nodes
            .into_iter()
            .map(|node| node.try_into())
            .collect::<Result<_, _>>()?;
        Ok(Net { code, name, nodes })
    }
}

impl<'a> TryFrom<raw::NetList<'a>> for NetList<'a> {
    type Error = ParseError;

    fn try_from(value: raw::NetList<'a>) -> Result<Self, Self::Error> {
        let raw::NetList {
            design,
            components,
            parts,
            nets,
        } = value;

        let components: Vec<Component> = components.into_iter().map(Component::from).collect();

        let mut seen = HashSet::new();
        if let Some(dup) = components.iter().find(|comp| !seen.insert(comp.ref_des)) {
            return Err(ParseError::DuplicateReference(dup.ref_des.0.to_owned()));
        }

        let parts: Vec<Part> = parts
            .into_iter()
            .map(|part| part.try_into())
            .collect::<Result<_, _>>()?;

        let nets: Vec<Net> = nets
            .into_iter()
            .map(|net| net.try_into())
            .collect::<Result<_, _>>()?;

        Ok(NetList {
            design,
            components,
            parts,
            nets,
        })
    }
}
