//! Prints the record events for JSON read from standard input, one call per
//! line.
//!
//! ```bash
//! printf '{"a":[1,{"b":null}]}\n{"c":true}' | cargo run -p jsonrecord --example print_events
//! ```
//!
//! Pass `--comments` to accept `//` and `/* */` comments.
#![allow(missing_docs)]

use std::{
    io::{self, BufWriter, Read, Write},
    process::ExitCode,
};

use jsonrecord::{Decoder, DecoderOptions, StreamReceiver};

/// Writes every call as soon as it arrives.
struct Printer<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> Printer<W> {
    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        // Write errors such as a closed pipe are ignored.
        let _ = writeln!(self.out, "{:indent$}{text}", "", indent = self.depth * 2);
    }
}

impl<W: Write> StreamReceiver for Printer<W> {
    fn start_record(&mut self, id: &str) {
        self.line(format_args!("startRecord({id})"));
        self.depth += 1;
    }

    fn end_record(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("endRecord()"));
    }

    fn start_entity(&mut self, name: &str) {
        self.line(format_args!("startEntity({name})"));
        self.depth += 1;
    }

    fn end_entity(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("endEntity()"));
    }

    fn literal(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.line(format_args!("literal({name}, {value:?})")),
            None => self.line(format_args!("literal({name}, null)")),
        }
    }
}

fn main() -> ExitCode {
    let options = DecoderOptions {
        allow_comments: std::env::args().any(|arg| arg == "--comments"),
        ..DecoderOptions::default()
    };

    let mut input = Vec::new();
    if let Err(err) = io::stdin().lock().read_to_end(&mut input) {
        eprintln!("failed to read stdin: {err}");
        return ExitCode::FAILURE;
    }

    let mut printer = Printer {
        out: BufWriter::new(io::stdout().lock()),
        depth: 0,
    };
    let result = Decoder::new(options).process_bytes(&input, &mut printer);
    let _ = printer.out.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
