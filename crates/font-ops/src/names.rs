//! `name` table reading and rewriting.

use log::warn;
use read_fonts::{
    FontRef, TableProvider,
    tables::name::{MacRomanMapping, NameRecord},
    types::Tag,
};

use crate::{
    error::{Error, Result},
    rewrite_font,
};

const NAME: Tag = Tag::new(b"name");
/// version, count, storageOffset.
const NAME_HEADER_LEN: usize = 6;
/// platformID, encodingID, languageID, nameID, length, stringOffset.
const NAME_RECORD_LEN: usize = 12;

/// One decoded `name` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub name_id: u16,
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub string: String,
}

/// List every `name` record in table order. A font without a `name` table
/// has no records.
pub fn name_records(data: &[u8]) -> Result<Vec<NameEntry>> {
    let font = FontRef::new(data)?;
    let Ok(name) = font.name() else {
        return Ok(Vec::new());
    };

    name.name_record()
        .iter()
        .map(|record| {
            let name_id = record.name_id().to_u16();
            let string = record
                .string(name.string_data())
                .map_err(|_| Error::UnreadableNameRecord { name_id })?
                .chars()
                .collect();
            Ok(NameEntry {
                name_id,
                platform_id: record.platform_id(),
                encoding_id: record.encoding_id(),
                language_id: record.language_id(),
                string,
            })
        })
        .collect()
}

/// Rewrite the `name` table of a font binary through `mapper`.
///
/// The mapper receives `(name_id, current_string)` and returns:
/// - `Some(new_string)` to replace the record's string
/// - `None` to keep the current string unchanged
///
/// The table is patched in its raw form. A replaced string is appended to
/// the string storage and only its record's length and offset change; every
/// other byte (record order, untouched records, language tags) is kept.
/// A font without a `name` table is returned unchanged.
pub fn rename(data: &[u8], mut mapper: impl FnMut(u16, &str) -> Option<String>) -> Result<Vec<u8>> {
    rewrite_font(data, |font, builder| {
        let Ok(name) = font.name() else {
            warn!("font has no name table; names left untouched");
            return Ok(());
        };

        let mut table = name.offset_data().as_bytes().to_vec();
        let storage = usize::from(name.storage_offset());
        if storage > table.len() {
            return Err(Error::MalformedNameTable);
        }

        for (index, record) in name.name_record().iter().enumerate() {
            let name_id = record.name_id().to_u16();
            let current: String = record
                .string(name.string_data())
                .map_err(|_| Error::UnreadableNameRecord { name_id })?
                .chars()
                .collect();
            let Some(new_string) = mapper(name_id, &current) else {
                continue;
            };
            if new_string == current {
                continue;
            }

            let encoded = encode_string(record, &new_string).ok_or(Error::UnencodableName {
                name_id,
                platform_id: record.platform_id(),
                encoding_id: record.encoding_id(),
            })?;
            let overflow = || Error::NameStorageOverflow { name_id };
            let length = u16::try_from(encoded.len()).map_err(|_| overflow())?;
            let offset = u16::try_from(table.len() - storage).map_err(|_| overflow())?;
            table.extend_from_slice(&encoded);

            let at = NAME_HEADER_LEN + index * NAME_RECORD_LEN;
            table[at + 8..at + 10].copy_from_slice(&length.to_be_bytes());
            table[at + 10..at + 12].copy_from_slice(&offset.to_be_bytes());
        }

        builder.add_raw(NAME, table);
        Ok(())
    })
}

/// Encode `string` the way `record` stores text: UTF-16BE for Unicode
/// records, Mac Roman for (1, 0). Other encodings take ASCII only, which
/// every legacy encoding in `name` represents as itself.
fn encode_string(record: &NameRecord, string: &str) -> Option<Vec<u8>> {
    if record.is_unicode() {
        return Some(string.encode_utf16().flat_map(u16::to_be_bytes).collect());
    }
    match (record.platform_id(), record.encoding_id()) {
        (1, 0) => string.chars().map(|c| MacRomanMapping.encode(c)).collect(),
        _ => string.is_ascii().then(|| string.as_bytes().to_vec()),
    }
}
