use crate::Design;

use super::HalFile;

pub(super) fn emit(design: &Design, out: &mut HalFile) {
    out.push("# HAL config file created by KiCad2HAL");
    out.push(format!("# Source file:  {}", design.source));
    out.push(format!("# Created by:   {}", design.tool));
    out.push(format!("# Created at:   {}", design.date));
    out.push("#");

    for sheet in &design.sheets {
        out.push(format!("# Sheet #{}", sheet.number));
        out.push(format!("#   Title:     {}", sheet.title));
        out.push(format!("#   Company:   {}", sheet.company));
        out.push(format!("#   Created:   {}", sheet.date));
        out.push(format!("#   Source:    {}", sheet.source));
        out.push(format!("#   Revision:  {}", sheet.rev));
        for comment in sheet.comments.iter().filter(|c| !c.is_empty()) {
            out.push(format!("#   Comment:   {comment}"));
        }
    }
}
