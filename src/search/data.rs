// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::{self, Write};
use std::sync::Mutex;

use csv::Writer;

use crate::position::Position;

/// Statistics gathered over a single search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub fen: String,
    pub depth: u32,
    pub nodes: u64,
    pub leaves: u64,
    pub mates: u64,
}

pub trait DataRecorder {
    fn record(&self, pos: &Position, rec: &Record) -> io::Result<()>;
}

pub struct NullDataRecorder;
impl DataRecorder for NullDataRecorder {
    fn record(&self, _pos: &Position, _rec: &Record) -> io::Result<()> {
        Ok(())
    }
}

/// Writes one CSV row per search.
pub struct CsvDataRecorder<W: Write> {
    writer: Mutex<Writer<W>>,
}

impl<W: Write> CsvDataRecorder<W> {
    pub fn new(writer: W) -> CsvDataRecorder<W> {
        CsvDataRecorder {
            writer: Mutex::new(Writer::from_writer(writer)),
        }
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "csv writer lock poisoned"))?;
        writer
            .into_inner()
            .map_err(|err| io::Error::new(err.error().kind(), err.error().to_string()))
    }
}

impl<W: Write> DataRecorder for CsvDataRecorder<W> {
    fn record(&self, pos: &Position, rec: &Record) -> io::Result<()> {
        let mut copy = rec.clone();
        copy.fen = pos.as_fen();
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "csv writer lock poisoned"))?;
        writer.serialize(&copy)?;
        writer.flush()
    }
}
