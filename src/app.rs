use crate::config::{Cli, Config};
use crate::convert::{convert_table, Converter, Dcm2niix};
use crate::error::{Error, TableError};
use crate::message::{Operator, Outcome};
use crate::model::{DicomHeaderReader, HeaderReader, SeriesTable};
use crate::operators::process_statement;
use crate::views::{render, render_error};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use termcolor::{ColorChoice, StandardStream, WriteColor};

const PROMPT: &str = ">> ";
const INSTRUCTIONS: &str = "Please type (i)gnore, (a)lias, (g)roup, ungroup, (u)ndo, (r)edo, \
                            (c)onvert, (f)orce convert, change (p)ath, (h)elp, or (q)uit.";
const EMPTY_TABLE: &str = "This directory does not have DICOM files. Enter a new path with: p <directory>";

pub fn run() -> anyhow::Result<()> {
    let config = Config::from(Cli::parse());

    let mut logger = env_logger::Builder::from_default_env();
    if config.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    let _ = logger.format_timestamp_secs().try_init();

    let converter = Dcm2niix::new(config.dcm2niix.clone()).with_timeout(config.timeout);
    let mut session = Session::open(config, DicomHeaderReader, converter)?;
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    writeln!(stdout, "{INSTRUCTIONS}")?;
    session.show(&mut stdout)?;

    let mut editor = DefaultEditor::new()?;
    if let Some(history) = &session.config.history {
        if let Err(err) = editor.load_history(history) {
            log::debug!("No prompt history loaded from {}: {err}", history.display());
        }
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                remember(&mut editor, &line);
                match session.execute(&line, &mut stdout) {
                    Ok(Flow::Halt) => break,
                    Ok(Flow::Continue) => {}
                    Err(err) => {
                        log::debug!("Statement {line:?} failed: {err:?}");
                        render_error(&err.to_string(), &mut stdout)?;
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(history) = &session.config.history {
        editor.save_history(history)?;
    }
    Ok(())
}

/// Adds `line` to the prompt history, returning whether it was recorded.
fn remember(editor: &mut DefaultEditor, line: &str) -> bool {
    match editor.add_history_entry(line) {
        Ok(added) => added,
        Err(err) => {
            log::debug!("Prompt history entry {line:?} not recorded: {err}");
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// The current table plus what is needed to rebuild and convert it.
pub struct Session<R, C> {
    config: Config,
    reader: R,
    converter: C,
    table: SeriesTable,
}

impl<R: HeaderReader, C: Converter> Session<R, C> {
    pub fn open(config: Config, reader: R, converter: C) -> Result<Self, TableError> {
        let table = SeriesTable::build(&config.inpath, &reader)?;
        Ok(Self {
            config,
            reader,
            converter,
            table,
        })
    }

    pub fn table(&self) -> &SeriesTable {
        &self.table
    }

    pub fn show(&self, out: &mut impl WriteColor) -> Result<(), Error> {
        if self.table.is_empty() {
            render_error(EMPTY_TABLE, out)?;
        } else {
            render(&self.table, out)?;
        }
        Ok(())
    }

    /// Runs one line of input. Failed statements leave the table as it was.
    pub fn execute(&mut self, line: &str, out: &mut impl WriteColor) -> Result<Flow, Error> {
        match process_statement(line, &self.table)? {
            Outcome::Table(table) => {
                self.table = table;
                self.show(out)?;
            }
            Outcome::Convert {
                destination,
                overwrite,
            } => {
                let destination = destination
                    .or_else(|| self.config.outpath.clone())
                    .unwrap_or_else(|| self.table.path().to_path_buf());
                writeln!(out, "Sending to {}", destination.display())?;
                let converted = convert_table(&self.table, &self.converter, &destination, overwrite)?;
                writeln!(out, "Converted {} series", converted.len())?;
            }
            Outcome::ChangePath(path) => {
                log::info!("Replacing table for {} with {}", self.table.path().display(), path.display());
                self.table = SeriesTable::build(&path, &self.reader)?;
                self.show(out)?;
            }
            Outcome::Help => {
                writeln!(out, "{INSTRUCTIONS}")?;
                for operator in Operator::ALL {
                    writeln!(out, "  {}", operator.usage())?;
                }
                writeln!(
                    out,
                    "Numbers may be ranges (1:4, 9:-2:3) or bracketed lists ([1 3:5 8])."
                )?;
            }
            Outcome::Halt => return Ok(Flow::Halt),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConversionError, OperatorError};
    use crate::model::fixtures::write_session;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use termcolor::Buffer;

    #[derive(Default)]
    struct Recorder {
        names: RefCell<Vec<(PathBuf, String)>>,
    }

    impl Converter for &Recorder {
        fn convert(
            &self,
            _files: &[PathBuf],
            output_name: &str,
            output_dir: &Path,
            _overwrite: bool,
        ) -> Result<(), ConversionError> {
            self.names
                .borrow_mut()
                .push((output_dir.to_path_buf(), output_name.to_string()));
            Ok(())
        }
    }

    fn text(buffer: Buffer) -> String {
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn edits_render_and_undo() {
        let dir = tempfile::tempdir().unwrap();
        write_session(dir.path());
        let recorder = Recorder::default();
        let mut session = Session::open(Config::new(dir.path()), DicomHeaderReader, &recorder).unwrap();

        let mut out = Buffer::no_color();
        assert_eq!(session.execute("g 1:4 scout", &mut out).unwrap(), Flow::Continue);
        assert!(text(out).contains("scout:\n"));
        assert_eq!(session.table().groups().get("scout"), Some(&[0, 1, 2, 3][..]));

        let mut out = Buffer::no_color();
        session.execute("u", &mut out).unwrap();
        assert!(session.table().groups().get("scout").is_none());

        let mut out = Buffer::no_color();
        let err = session.execute("u", &mut out).unwrap_err();
        assert!(matches!(err, Error::Operator(OperatorError::NothingToUndo)));

        assert_eq!(session.execute("q", &mut Buffer::no_color()).unwrap(), Flow::Halt);
    }

    #[test]
    fn convert_uses_configured_destination() {
        let dir = tempfile::tempdir().unwrap();
        write_session(dir.path());
        let recorder = Recorder::default();
        let mut config = Config::new(dir.path());
        config.outpath = Some(PathBuf::from("/nifti"));
        let mut session = Session::open(config, DicomHeaderReader, &recorder).unwrap();

        let mut out = Buffer::no_color();
        session.execute("i 1:4", &mut out).unwrap();
        session.execute("a 6 rest", &mut out).unwrap();
        session.execute("c", &mut out).unwrap();

        let output = text(out);
        assert!(output.contains("Sending to /nifti"));
        assert!(output.contains("Converted 2 series"));
        assert_eq!(
            *recorder.names.borrow(),
            vec![
                (PathBuf::from("/nifti"), "MBME_RPE1_TMS_SBRef_echo-%e".to_string()),
                (PathBuf::from("/nifti"), "rest_echo-%e".to_string()),
            ]
        );
    }

    #[test]
    fn change_path_replaces_table() {
        let first = tempfile::tempdir().unwrap();
        write_session(first.path());
        let empty = tempfile::tempdir().unwrap();
        let recorder = Recorder::default();
        let mut session = Session::open(Config::new(first.path()), DicomHeaderReader, &recorder).unwrap();
        session.execute("g 1 x", &mut Buffer::no_color()).unwrap();

        let mut out = Buffer::no_color();
        session
            .execute(&format!("p {}", empty.path().display()), &mut out)
            .unwrap();
        assert!(session.table().is_empty());
        assert!(session.table().prevtable().is_none());
        assert!(text(out).contains("does not have DICOM files"));

        let err = session.execute("p /here/is/kalamazoo", &mut Buffer::no_color()).unwrap_err();
        assert!(matches!(err, Error::Table(TableError::NotADirectory(_))));
        assert!(session.table().is_empty());
    }

    #[test]
    fn failed_statement_keeps_table() {
        let dir = tempfile::tempdir().unwrap();
        write_session(dir.path());
        let recorder = Recorder::default();
        let mut session = Session::open(Config::new(dir.path()), DicomHeaderReader, &recorder).unwrap();

        assert!(session.execute("g [1 2", &mut Buffer::no_color()).is_err());
        assert!(session.execute("a 1 two words", &mut Buffer::no_color()).is_err());
        assert_eq!(session.table().groups().len(), 1);
        assert!(session.table().prevtable().is_none());
    }

    #[test]
    fn statements_are_remembered() {
        use rustyline::history::History;

        let mut editor = DefaultEditor::new().unwrap();
        assert!(remember(&mut editor, "g 1:4 scout"));
        assert!(remember(&mut editor, "u"));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn help_lists_every_operator() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Recorder::default();
        let mut session = Session::open(Config::new(dir.path()), DicomHeaderReader, &recorder).unwrap();

        let mut out = Buffer::no_color();
        session.execute("h", &mut out).unwrap();
        let output = text(out);
        for operator in Operator::ALL {
            assert!(output.contains(operator.usage()));
        }
    }
}
