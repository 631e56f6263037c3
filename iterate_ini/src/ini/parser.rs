//! Line-oriented parser producing an [`IniDocument`].

use thiserror::Error;

use super::document::{IniDocument, Section};
use super::options::ParseOptions;

/// A malformed line in a sectioned document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    /// One-based line number.
    pub line: usize,
    /// Description of the problem.
    pub message: String,
}

impl SyntaxError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Section currently receiving options.
#[derive(Debug, Clone, Copy)]
enum Target {
    Defaults,
    Section(usize),
}

/// Option that indented lines would continue.
///
/// Blank lines seen while the value is open are only counted; they become
/// part of the value if a later continuation line follows and are dropped
/// otherwise.
#[derive(Debug, Clone, Copy)]
struct OpenValue {
    slot: usize,
    indent: usize,
    pending_blanks: usize,
}

struct Parser<'opts> {
    options: &'opts ParseOptions,
    doc: IniDocument,
    target: Option<Target>,
    open: Option<OpenValue>,
}

pub(super) fn parse(text: &str, options: &ParseOptions) -> Result<IniDocument, SyntaxError> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut parser = Parser {
        options,
        doc: IniDocument::default(),
        target: None,
        open: None,
    };
    for (idx, raw) in body.lines().enumerate() {
        parser.line(idx + 1, raw)?;
    }
    Ok(parser.doc)
}

impl Parser<'_> {
    fn line(&mut self, line_no: usize, raw: &str) -> Result<(), SyntaxError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            if let Some(open) = self.open.as_mut() {
                open.pending_blanks += 1;
            }
            return Ok(());
        }
        if trimmed.starts_with(['#', ';']) {
            return Ok(());
        }

        let indent = raw.len() - raw.trim_start().len();
        if let Some(open) = self.open {
            if indent > open.indent {
                let section = self.section_mut().ok_or_else(|| {
                    SyntaxError::new(line_no, "continuation outside of any section")
                })?;
                for _ in 0..open.pending_blanks {
                    section.continue_value(open.slot, "");
                }
                section.continue_value(open.slot, trimmed);
                self.open = Some(OpenValue {
                    pending_blanks: 0,
                    ..open
                });
                return Ok(());
            }
        }

        if let Some(header) = trimmed.strip_prefix('[') {
            return self.header(line_no, header);
        }
        self.assignment(line_no, trimmed, indent)
    }

    fn header(&mut self, line_no: usize, header: &str) -> Result<(), SyntaxError> {
        let (name, _trailing) = header
            .rsplit_once(']')
            .ok_or_else(|| SyntaxError::new(line_no, "section header is missing ']'"))?;
        if name.is_empty() {
            return Err(SyntaxError::new(line_no, "section name is empty"));
        }
        self.open = None;

        if self.options.default_section() == Some(name) {
            if self.doc.defaults.is_some() && self.options.is_strict() {
                return Err(duplicate_section(line_no, name));
            }
            self.doc.defaults.get_or_insert_with(|| Section::new(name));
            self.target = Some(Target::Defaults);
            return Ok(());
        }

        if let Some(&slot) = self.doc.index.get(name) {
            if self.options.is_strict() {
                return Err(duplicate_section(line_no, name));
            }
            self.target = Some(Target::Section(slot));
            return Ok(());
        }

        let slot = self.doc.sections.len();
        self.doc.sections.push(Section::new(name));
        self.doc.index.insert(name.to_owned(), slot);
        self.target = Some(Target::Section(slot));
        Ok(())
    }

    fn assignment(&mut self, line_no: usize, line: &str, indent: usize) -> Result<(), SyntaxError> {
        let (option, value) = line.split_once(['=', ':']).ok_or_else(|| {
            SyntaxError::new(line_no, "expected '[section]' or 'option = value'")
        })?;
        let option_name = option.trim();
        if option_name.is_empty() {
            return Err(SyntaxError::new(line_no, "option name is empty"));
        }
        let strict = self.options.is_strict();
        let section = self.section_mut().ok_or_else(|| {
            SyntaxError::new(
                line_no,
                format!("option '{option_name}' appears before any section header"),
            )
        })?;
        let (slot, existed) = section.set(option_name, value.trim());
        if existed && strict {
            return Err(SyntaxError::new(
                line_no,
                format!(
                    "option '{option_name}' in section '{}' already exists",
                    section.name()
                ),
            ));
        }
        self.open = Some(OpenValue {
            slot,
            indent,
            pending_blanks: 0,
        });
        Ok(())
    }

    fn section_mut(&mut self) -> Option<&mut Section> {
        match self.target? {
            Target::Defaults => self.doc.defaults.as_mut(),
            Target::Section(slot) => self.doc.sections.get_mut(slot),
        }
    }
}

fn duplicate_section(line_no: usize, name: &str) -> SyntaxError {
    SyntaxError::new(line_no, format!("section '{name}' already exists"))
}
