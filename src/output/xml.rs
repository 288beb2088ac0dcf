use super::TokenReport;
use crate::models::ModelEntry;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::error::Error;
use std::io::Cursor;

/// Render a report under a `<tokens>` root. The token count itself is written
/// as `<count>` (the `tokens` field in JSON) so it does not repeat the root
/// element's name.
pub fn render(report: &TokenReport) -> Result<String, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let root = BytesStart::new("tokens");
    writer.write_event(Event::Start(root.borrow()))?;

    write_element(&mut writer, "model", &report.model)?;

    if let Some(ref encoding) = report.encoding {
        write_element(&mut writer, "encoding", encoding)?;
    }

    if let Some(method) = report.method {
        write_element(&mut writer, "method", method.as_str())?;
    }

    write_element(&mut writer, "count", &report.tokens.to_string())?;

    if let Some(budget) = report.budget {
        write_element(&mut writer, "budget", &budget.to_string())?;
    }

    if let Some(within) = report.within_budget {
        write_element(&mut writer, "within_budget", &within.to_string())?;
    }

    if let Some(ref ids) = report.token_ids {
        let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        write_element(&mut writer, "token_ids", &joined.join(","))?;
    }

    if let Some(ref decoded) = report.decoded_text {
        write_cdata_element(&mut writer, "decoded_text", decoded)?;
    }

    if let Some(ref original) = report.original_text {
        write_cdata_element(&mut writer, "original_text", original)?;
    }

    if let Some(ref normalized) = report.normalized_text {
        write_cdata_element(&mut writer, "normalized_text", normalized)?;
    }

    if !report.files.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("files")))?;
        for file in &report.files {
            let mut elem = BytesStart::new("file");
            elem.push_attribute(("path", file.path.as_str()));
            elem.push_attribute(("tokens", file.tokens.to_string().as_str()));
            writer.write_event(Event::Empty(elem))?;
        }
        writer.write_event(Event::End(BytesEnd::new("files")))?;
    }

    if !report.chunks.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("chunks")))?;
        for chunk in &report.chunks {
            let mut elem = BytesStart::new("chunk");
            elem.push_attribute(("index", chunk.index.to_string().as_str()));
            elem.push_attribute(("tokens", chunk.tokens.to_string().as_str()));
            writer.write_event(Event::Start(elem.borrow()))?;
            write_cdata(&mut writer, &chunk.text)?;
            writer.write_event(Event::End(BytesEnd::new("chunk")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("chunks")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("tokens")))?;

    let result = writer.into_inner().into_inner();
    Ok(String::from_utf8(result)?)
}

pub fn render_models(models: &[ModelEntry]) -> Result<String, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("models")))?;

    for entry in models {
        let mut elem = BytesStart::new("model");
        elem.push_attribute(("name", entry.name));
        elem.push_attribute((
            "max_context",
            entry.capability.max_context.to_string().as_str(),
        ));
        elem.push_attribute(("vision", entry.capability.vision.to_string().as_str()));
        elem.push_attribute(("encoding", entry.capability.encoding));
        writer.write_event(Event::Empty(elem))?;
    }

    writer.write_event(Event::End(BytesEnd::new("models")))?;

    let result = writer.into_inner().into_inner();
    Ok(String::from_utf8(result)?)
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    content: &str,
) -> Result<(), Box<dyn Error>> {
    let elem = BytesStart::new(name);
    writer.write_event(Event::Start(elem.borrow()))?;
    writer.write_event(Event::Text(BytesText::new(content)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_cdata_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    content: &str,
) -> Result<(), Box<dyn Error>> {
    let elem = BytesStart::new(name);
    writer.write_event(Event::Start(elem.borrow()))?;
    write_cdata(writer, content)?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write `content` as CDATA. A `]]>` inside the text would end the section, so
/// it is split across two sections: `]]` closes one and `>` opens the next.
fn write_cdata<W: std::io::Write>(writer: &mut Writer<W>, content: &str) -> Result<(), Box<dyn Error>> {
    let mut parts = content.split("]]>");
    let mut section = parts.next().unwrap_or_default().to_string();

    for part in parts {
        section.push_str("]]");
        writer.write_event(Event::CData(BytesCData::new(section.as_str())))?;
        section = format!(">{}", part);
    }

    writer.write_event(Event::CData(BytesCData::new(section.as_str())))?;
    Ok(())
}
