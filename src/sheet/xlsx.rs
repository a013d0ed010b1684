// src/sheet/xlsx.rs
//
// Minimal OOXML reader: workbook.xml → first <sheet> → its worksheet part
// (via workbook.xml.rels) → cell text. Only what a flat promo table needs:
// shared strings, inline strings, numbers, booleans, error literals.

use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;
use zip::result::ZipError;

use super::Grid;
use crate::error::DecodeError;

const WORKBOOK: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS: &str = "xl/sharedStrings.xml";

// Sheet grid bounds (Excel 2007+).
const MAX_ROWS: u32 = 1_048_576;
const MAX_COLS: u32 = 16_384;

/// Caps on what a container may make us inflate. Sizes are uncompressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerLimits {
    pub max_entries: usize,
    pub max_part_uncompressed_bytes: u64,
    pub max_total_uncompressed_bytes: u64,
}

impl Default for ContainerLimits {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            max_part_uncompressed_bytes: 100 * 1024 * 1024,
            max_total_uncompressed_bytes: 500 * 1024 * 1024,
        }
    }
}

/// Zip archive plus the running total of bytes inflated so far.
struct Container<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    limits: ContainerLimits,
    total_read: u64,
}

impl<'a> Container<'a> {
    fn open(bytes: &'a [u8], limits: ContainerLimits) -> Result<Self, DecodeError> {
        let archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DecodeError::NotAContainer(e.to_string()))?;
        if archive.len() > limits.max_entries {
            return Err(DecodeError::TooManyEntries { entries: archive.len(), limit: limits.max_entries });
        }
        Ok(Self { archive, limits, total_read: 0 })
    }

    /// Part bytes, `None` if absent. The declared size is checked up front,
    /// and the read itself is capped, since headers can lie.
    fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>, DecodeError> {
        let part_limit = self.limits.max_part_uncompressed_bytes;
        let remaining = self.limits.max_total_uncompressed_bytes.saturating_sub(self.total_read);

        let file = match self.archive.by_name(name) {
            Ok(f) => f,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(DecodeError::NotAContainer(format!("{name}: {e}"))),
        };
        let declared = file.size();
        if declared > part_limit {
            return Err(DecodeError::PartTooLarge { part: s!(name), size: declared, limit: part_limit });
        }
        if declared > remaining {
            return Err(DecodeError::TotalTooLarge { limit: self.limits.max_total_uncompressed_bytes });
        }

        let out = read_capped(file, name, part_limit.min(remaining))?;
        let read = out.len() as u64;
        if read > part_limit {
            return Err(DecodeError::PartTooLarge { part: s!(name), size: read, limit: part_limit });
        }
        if read > remaining {
            return Err(DecodeError::TotalTooLarge { limit: self.limits.max_total_uncompressed_bytes });
        }
        self.total_read += read;
        Ok(Some(out))
    }
}

/// Reads at most `cap + 1` bytes, so an over-long stream shows up as
/// `len() > cap` without inflating the rest.
fn read_capped(file: impl Read, name: &str, cap: u64) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    file.take(cap.saturating_add(1))
        .read_to_end(&mut out)
        .map_err(|e| DecodeError::NotAContainer(format!("{name}: {e}")))?;
    Ok(out)
}

struct SheetEntry {
    name: String,
    rel_id: Option<String>,
    sheet_id: Option<u32>,
}

/// Decode the first sheet of an .xlsx container into a sparse grid.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Grid, DecodeError> {
    read_first_sheet_with_limits(bytes, ContainerLimits::default())
}

pub fn read_first_sheet_with_limits(bytes: &[u8], limits: ContainerLimits) -> Result<Grid, DecodeError> {
    let mut archive = Container::open(bytes, limits)?;

    let workbook = archive.read_part(WORKBOOK)?
        .ok_or_else(|| DecodeError::MissingPart(s!(WORKBOOK)))?;
    let sheets = parse_workbook(&workbook)?;
    let first = sheets.first().ok_or(DecodeError::NoSheets)?;

    let rels = match archive.read_part(WORKBOOK_RELS)? {
        Some(xml) => parse_relationships(&xml)?,
        None => HashMap::new(),
    };
    let target = resolve_target(first, &rels, 0);
    logd!("Sheet: first sheet '{}' → {}", first.name, target);

    let shared = match archive.read_part(SHARED_STRINGS)? {
        Some(xml) => parse_shared_strings(&xml)?,
        None => Vec::new(),
    };

    let sheet_xml = archive.read_part(&target)?
        .ok_or_else(|| DecodeError::MissingPart(target.clone()))?;
    parse_sheet(&sheet_xml, &shared, &target)
}

fn xml_err(part: &str, reason: impl ToString) -> DecodeError {
    DecodeError::Xml { part: s!(part), reason: reason.to_string() }
}

fn attr(e: &BytesStart<'_>, key: &[u8], part: &str) -> Result<Option<String>, DecodeError> {
    for a in e.attributes() {
        let a = a.map_err(|err| xml_err(part, err))?;
        if a.key.as_ref() == key {
            let v = a.unescape_value().map_err(|err| xml_err(part, err))?;
            return Ok(Some(v.into_owned()));
        }
    }
    Ok(None)
}

/// Text content up to the matching end tag, entities resolved.
fn text_of(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>, part: &str) -> Result<String, DecodeError> {
    let raw = reader.read_text(start.name()).map_err(|e| xml_err(part, e))?;
    let text = quick_xml::escape::unescape(&raw).map_err(|e| xml_err(part, e))?;
    Ok(text.into_owned())
}

fn parse_workbook(xml: &[u8]) -> Result<Vec<SheetEntry>, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                let name = attr(&e, b"name", WORKBOOK)?;
                let rel_id = attr(&e, b"r:id", WORKBOOK)?;
                let sheet_id = attr(&e, b"sheetId", WORKBOOK)?.and_then(|v| v.parse().ok());
                if let Some(name) = name {
                    sheets.push(SheetEntry { name, rel_id, sheet_id });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(WORKBOOK, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(sheets)
}

fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut map = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr(&e, b"Id", WORKBOOK_RELS)?;
                let target = attr(&e, b"Target", WORKBOOK_RELS)?;
                let kind = attr(&e, b"Type", WORKBOOK_RELS)?.unwrap_or_default();
                if let (Some(id), Some(target)) = (id, target) {
                    if kind.contains("worksheet") {
                        map.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(WORKBOOK_RELS, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(map)
}

fn resolve_target(sheet: &SheetEntry, rels: &HashMap<String, String>, index: usize) -> String {
    if let Some(target) = sheet.rel_id.as_ref().and_then(|id| rels.get(id)) {
        return normalize_target(target);
    }
    let guessed = sheet
        .sheet_id
        .map(|id| format!("worksheets/sheet{id}.xml"))
        .unwrap_or_else(|| format!("worksheets/sheet{}.xml", index + 1));
    normalize_target(&guessed)
}

fn normalize_target(target: &str) -> String {
    let trimmed = target.trim_start_matches('/');
    if trimmed.starts_with("xl/") { s!(trimmed) } else { join!("xl/", trimmed) }
}

/// `<si>` entries, rich-text runs flattened, phonetic hints (`<rPh>`) skipped.
fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = s!();
    let mut in_si = false;
    let mut in_rph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => { current.clear(); in_si = true; }
                b"rPh" => in_rph = true,
                b"t" if in_si && !in_rph => current.push_str(&text_of(&mut reader, &e, SHARED_STRINGS)?),
                _ => {}
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => strings.push(s!()),
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                b"rPh" => in_rph = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(SHARED_STRINGS, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

fn parse_sheet(xml: &[u8], shared: &[String], part: &str) -> Result<Grid, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut rows: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();
    let mut cur_row: u32 = 0;
    let mut next_row: u32 = 0;
    let mut next_col: u32 = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"row" => {
                cur_row = match attr(&e, b"r", part)? {
                    Some(r) => r
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| (1..=MAX_ROWS).contains(n))
                        .map(|n| n - 1)
                        .ok_or_else(|| DecodeError::InvalidAddress(r.clone()))?,
                    None if next_row < MAX_ROWS => next_row,
                    None => return Err(DecodeError::InvalidAddress(format!("row {}", next_row + 1))),
                };
                next_row = cur_row + 1;
                next_col = 0;
            }
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"c" => {
                let (row, col) = cell_position(&e, cur_row, next_col, part)?;
                let kind = attr(&e, b"t", part)?;
                let text = read_cell(&mut reader, &e, kind.as_deref(), shared, part)?;
                next_col = col + 1;
                if !text.is_empty() {
                    rows.entry(row).or_default().insert(col, text);
                }
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"c" => {
                let (_, col) = cell_position(&e, cur_row, next_col, part)?;
                next_col = col + 1;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(rows
        .into_iter()
        .map(|(r, cells)| (r, cells.into_iter().collect()))
        .collect())
}

fn cell_position(e: &BytesStart<'_>, row: u32, next_col: u32, part: &str) -> Result<(u32, u32), DecodeError> {
    match attr(e, b"r", part)? {
        Some(a) => address_to_index(&a).ok_or(DecodeError::InvalidAddress(a)),
        None if next_col < MAX_COLS => Ok((row, next_col)),
        None => Err(DecodeError::InvalidAddress(format!("column {} in row {}", next_col + 1, row + 1))),
    }
}

fn read_cell(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    kind: Option<&str>,
    shared: &[String],
    part: &str,
) -> Result<String, DecodeError> {
    let mut buf = Vec::new();
    let mut value: Option<String> = None;
    let mut inline: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"v" => {
                value = Some(text_of(reader, &e, part)?);
            }
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"is" => {
                inline = Some(read_inline(reader, part)?);
            }
            Ok(Event::End(e)) if e.name().as_ref() == start.name().as_ref() => break,
            Ok(Event::Eof) => return Err(xml_err(part, "unexpected EOF inside cell")),
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(text) = inline {
        return Ok(text);
    }
    let Some(raw) = value else { return Ok(s!()) };
    convert_value(&raw, kind, shared)
}

fn read_inline(reader: &mut Reader<&[u8]>, part: &str) -> Result<String, DecodeError> {
    let mut buf = Vec::new();
    let mut out = s!();
    let mut in_rph = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"rPh" => in_rph = true,
                b"t" if !in_rph => out.push_str(&text_of(reader, &e, part)?),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"rPh" => in_rph = false,
                b"is" => break,
                _ => {}
            },
            Ok(Event::Eof) => return Err(xml_err(part, "unexpected EOF inside inline string")),
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

fn convert_value(raw: &str, kind: Option<&str>, shared: &[String]) -> Result<String, DecodeError> {
    let trimmed = raw.trim();
    match kind {
        Some("s") => {
            let idx = trimmed
                .parse::<usize>()
                .map_err(|_| DecodeError::SharedStringOutOfBounds(usize::MAX))?;
            shared.get(idx).cloned().ok_or(DecodeError::SharedStringOutOfBounds(idx))
        }
        Some("b") => Ok(match trimmed {
            "1" => s!("TRUE"),
            "0" => s!("FALSE"),
            other => s!(other),
        }),
        Some("str") | Some("inlineStr") => Ok(s!(raw)),
        Some("e") => Ok(s!(trimmed)),
        _ => Ok(format_number(trimmed)),
    }
}

/// Integral values print without a fraction ("199", not "199.0").
pub(crate) fn format_number(raw: &str) -> String {
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        Ok(n) if n.is_finite() => format!("{n}"),
        _ => s!(raw),
    }
}

/// "B3" → (2, 1), 0-based (row, col).
pub(crate) fn address_to_index(a: &str) -> Option<(u32, u32)> {
    let a = a.trim().trim_start_matches('$');
    let split = a.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = a.split_at(split);
    let letters = letters.trim_end_matches('$');
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 || row > MAX_ROWS || col > MAX_COLS {
        return None;
    }
    Some((row - 1, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses() {
        assert_eq!(address_to_index("A1"), Some((0, 0)));
        assert_eq!(address_to_index("B3"), Some((2, 1)));
        assert_eq!(address_to_index("AA10"), Some((9, 26)));
        assert_eq!(address_to_index("$C$2"), Some((1, 2)));
        assert_eq!(address_to_index("A0"), None);
        assert_eq!(address_to_index("12"), None);
    }

    #[test]
    fn numbers_drop_trailing_zero() {
        assert_eq!(format_number("199"), "199");
        assert_eq!(format_number("199.0"), "199");
        assert_eq!(format_number("0.5"), "0.5");
        assert_eq!(format_number("n/a"), "n/a");
    }

    #[test]
    fn shared_strings_flatten_runs_and_skip_phonetics() {
        let xml = br#"<sst><si><t>a &amp; b</t></si><si><r><t>x</t></r><r><t>y</t></r><rPh><t>zz</t></rPh></si><si/></sst>"#;
        let ss = parse_shared_strings(xml).unwrap();
        assert_eq!(ss, vec!["a & b".to_string(), "xy".to_string(), String::new()]);
    }

    #[test]
    fn sheet_cells_by_type() {
        let xml = br#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="inlineStr"><is><t>inline</t></is></c></row>
            <row r="2"><c r="A2"><v>100.0</v></c><c r="B2" t="b"><v>1</v></c><c r="C2" t="e"><v>#N/A</v></c><c r="D2"/></row>
        </sheetData></worksheet>"#;
        let shared = vec![s!("head")];
        let grid = parse_sheet(xml, &shared, "sheet1").unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].1, vec![(0, s!("head")), (1, s!("inline"))]);
        assert_eq!(grid[1].1, vec![(0, s!("100")), (1, s!("TRUE")), (2, s!("#N/A"))]);
    }

    #[test]
    fn row_numbers_past_the_grid_are_rejected() {
        let xml = br#"<worksheet><sheetData><row r="4294967295"><c><v>1</v></c></row><row><c><v>2</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(parse_sheet(xml, &[], "sheet1"), Err(DecodeError::InvalidAddress(_))));

        let xml = br#"<worksheet><sheetData><row r="1048576"><c><v>1</v></c></row><row><c><v>2</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(parse_sheet(xml, &[], "sheet1"), Err(DecodeError::InvalidAddress(_))));

        let xml = br#"<worksheet><sheetData><row r="1048575"><c><v>1</v></c></row><row><c><v>2</v></c></row></sheetData></worksheet>"#;
        let grid = parse_sheet(xml, &[], "sheet1").unwrap();
        assert_eq!(grid.iter().map(|(r, _)| *r).collect::<Vec<_>>(), vec![1_048_574, 1_048_575]);
    }

    #[test]
    fn cell_addresses_past_the_grid_are_rejected() {
        assert_eq!(address_to_index("A1048576"), Some((1_048_575, 0)));
        assert_eq!(address_to_index("XFD1"), Some((0, 16_383)));
        assert_eq!(address_to_index("A1048577"), None);
        assert_eq!(address_to_index("XFE1"), None);
        assert_eq!(address_to_index("A4294967296"), None);
    }

    fn zip_of(parts: &[(&str, &[u8])]) -> Vec<u8> {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut zw = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let opts = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, body) in parts {
            zw.start_file(*name, opts.clone()).unwrap();
            zw.write_all(body).unwrap();
        }
        zw.finish().unwrap().into_inner()
    }

    const WB: &[u8] = br#"<workbook><sheets><sheet name="a" sheetId="1"/></sheets></workbook>"#;

    #[test]
    fn oversized_part_is_refused() {
        let big = vec![b' '; 4096];
        let bytes = zip_of(&[(WORKBOOK, WB), ("xl/worksheets/sheet1.xml", &big)]);
        let limits = ContainerLimits { max_part_uncompressed_bytes: 1024, ..ContainerLimits::default() };

        let err = read_first_sheet_with_limits(&bytes, limits).unwrap_err();
        assert!(matches!(err, DecodeError::PartTooLarge { ref part, size: 4096, limit: 1024 } if part == "xl/worksheets/sheet1.xml"));
    }

    #[test]
    fn total_and_entry_limits() {
        let sheet = br#"<worksheet><sheetData/></worksheet>"#;
        let bytes = zip_of(&[(WORKBOOK, WB), ("xl/worksheets/sheet1.xml", sheet)]);

        let tight = ContainerLimits { max_total_uncompressed_bytes: WB.len() as u64 + 4, ..ContainerLimits::default() };
        assert!(matches!(read_first_sheet_with_limits(&bytes, tight), Err(DecodeError::TotalTooLarge { .. })));

        let few = ContainerLimits { max_entries: 1, ..ContainerLimits::default() };
        assert!(matches!(
            read_first_sheet_with_limits(&bytes, few),
            Err(DecodeError::TooManyEntries { entries: 2, limit: 1 })
        ));

        assert!(read_first_sheet_with_limits(&bytes, ContainerLimits::default()).unwrap().is_empty());
    }

    #[test]
    fn capped_read_stops_one_past_the_cap() {
        let out = read_capped(&[7u8; 100][..], "p", 10).unwrap();
        assert_eq!(out.len(), 11);
    }

    #[test]
    fn shared_index_out_of_range_errors() {
        let xml = br#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>3</v></c></row></sheetData></worksheet>"#;
        let err = parse_sheet(xml, &[], "sheet1").unwrap_err();
        assert!(matches!(err, DecodeError::SharedStringOutOfBounds(3)));
    }

    #[test]
    fn targets_are_rooted_under_xl() {
        assert_eq!(normalize_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(normalize_target("/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn garbage_is_not_a_container() {
        let err = read_first_sheet(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, DecodeError::NotAContainer(_)));
    }
}
