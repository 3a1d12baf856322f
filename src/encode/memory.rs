use std::collections::BTreeMap;

use crate::{
    encode::service::EncoderService,
    foundation::error::{ScanwipeError, ScanwipeResult},
};

/// Operation an [`InMemoryEncoder`] can be told to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailAt {
    /// `init` fails.
    Init,
    /// `write_file` fails on the n-th write (0-based).
    Write(usize),
    /// `exec` fails.
    Exec,
    /// `read_file` fails.
    Read,
}

/// Encoder service that keeps its namespace in memory.
///
/// `exec` does not encode anything: it checks that the numbered input sequence named by `-i`
/// exists and writes a small deterministic placeholder to the output name (the last argument).
#[derive(Debug, Default)]
pub struct InMemoryEncoder {
    files: BTreeMap<String, Vec<u8>>,
    init_calls: usize,
    writes: usize,
    exec_log: Vec<Vec<String>>,
    deleted: Vec<String>,
    fail: Option<FailAt>,
}

impl InMemoryEncoder {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service that fails at `at`.
    pub fn failing(at: FailAt) -> Self {
        Self {
            fail: Some(at),
            ..Self::default()
        }
    }

    /// Names currently present in the namespace.
    pub fn file_names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    /// Number of times `init` ran.
    pub fn init_calls(&self) -> usize {
        self.init_calls
    }

    /// Arguments of every `exec` call, in order.
    pub fn exec_log(&self) -> &[Vec<String>] {
        &self.exec_log
    }

    /// Every name passed to `delete_file`, in order.
    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }

    fn sequence(&self, pattern: &str) -> ScanwipeResult<Vec<&[u8]>> {
        let (prefix, rest) = pattern.split_once("%04d").ok_or_else(|| {
            ScanwipeError::encode(format!("unsupported input pattern '{pattern}'"))
        })?;
        let mut frames = Vec::new();
        while let Some(bytes) = self.files.get(&format!("{prefix}{:04}{rest}", frames.len())) {
            frames.push(bytes.as_slice());
        }
        if frames.is_empty() {
            return Err(ScanwipeError::encode(format!("no input matches '{pattern}'")));
        }
        Ok(frames)
    }
}

impl EncoderService for InMemoryEncoder {
    fn init(&mut self) -> ScanwipeResult<()> {
        self.init_calls += 1;
        if self.fail == Some(FailAt::Init) {
            return Err(ScanwipeError::encoder_init("injected init failure"));
        }
        Ok(())
    }

    fn write_file(&mut self, name: &str, bytes: &[u8]) -> ScanwipeResult<()> {
        let n = self.writes;
        self.writes += 1;
        if self.fail == Some(FailAt::Write(n)) {
            return Err(ScanwipeError::encode(format!("injected write failure on '{name}'")));
        }
        self.files.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exec(&mut self, args: &[&str]) -> ScanwipeResult<()> {
        self.exec_log.push(args.iter().map(|a| a.to_string()).collect());
        if self.fail == Some(FailAt::Exec) {
            return Err(ScanwipeError::encode("injected exec failure"));
        }

        let input = args
            .iter()
            .position(|a| *a == "-i")
            .and_then(|i| args.get(i + 1))
            .ok_or_else(|| ScanwipeError::encode("missing -i argument"))?;
        let output = args
            .last()
            .ok_or_else(|| ScanwipeError::encode("missing output argument"))?;

        let frames = self.sequence(input)?;
        let total: usize = frames.iter().map(|f| f.len()).sum();
        let video = format!("mock-mp4 frames={} input_bytes={total}", frames.len()).into_bytes();
        self.files.insert(output.to_string(), video);
        Ok(())
    }

    fn read_file(&mut self, name: &str) -> ScanwipeResult<Vec<u8>> {
        if self.fail == Some(FailAt::Read) {
            return Err(ScanwipeError::read(format!("injected read failure on '{name}'")));
        }
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| ScanwipeError::read(format!("'{name}' does not exist")))
    }

    fn delete_file(&mut self, name: &str) -> ScanwipeResult<()> {
        self.deleted.push(name.to_string());
        self.files.remove(name);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/memory.rs"]
mod tests;
