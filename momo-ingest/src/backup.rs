//! Streaming reader over SMS backup XML documents.
//!
//! A backup is a single `<smses>` document holding one flat `<sms .../>`
//! element per message, attributes only. The reader is a pull cursor over
//! the XML event stream: it yields one attribute map per `<sms>` element in
//! document order and holds no other element state, so backups larger than
//! memory stream fine.

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct BackupReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    done: bool,
}

impl BackupReader<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("opening {}", path.as_ref().display()))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> BackupReader<R> {
    pub fn from_reader(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().check_end_names = true;
        Self {
            reader,
            buf: Vec::new(),
            done: false,
        }
    }

    fn attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>> {
        let mut attrs = HashMap::new();
        for attr in element.attributes() {
            let attr = attr.context("malformed attribute in <sms> element")?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .context("undecodable attribute value in <sms> element")?
                .into_owned();
            attrs.insert(key, value);
        }
        Ok(attrs)
    }
}

impl<R: BufRead> Iterator for BackupReader<R> {
    type Item = Result<HashMap<String, String>>;

    /// Next `<sms>` element's attributes, or an error on ill-formed markup.
    /// The cursor is finished after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(element)) | Ok(Event::Empty(element))
                    if element.name().as_ref() == b"sms" =>
                {
                    return Some(Self::attributes(&element));
                }
                Ok(Event::Eof) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err).context("malformed backup XML"));
                }
            }
        }
    }
}
