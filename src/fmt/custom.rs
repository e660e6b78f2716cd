//! Datetime-to-string routines.
//!
//! There are various competing standards for how a date-time formatting
//! string should look: Unix-style `strftime` with `%` symbols and flags,
//! Joda-style formatters that use the number of letters as their widths,
//! and many others. This library uses a curly-brace syntax designed to
//! mimic the `format!` and `println!` macros: a format string is checked
//! for correctness *once*, when the formatter object is created, after
//! which it can be applied to any number of values.
//!
//! ```
//! use datespan::fmt::DateFormat;
//! use datespan::{CivilDate, CivilDateTime, CivilTime, Month};
//!
//! let formatter = DateFormat::parse("{:D} {:b} {:Y}, {0 2:H}:{0 2:i}").unwrap();
//! # let _ = formatter;
//! ```
//!
//! Month and weekday names come from a [`locale::Time`] value, so the
//! same formatter can render `"December"`, `"décembre"`, or whatever the
//! chosen locale calls it.

use std::fmt::Display;

use pad::{Alignment, PadStr};

use crate::cal::{DatePiece, TimePiece};


/// One piece of a parsed format string: either a literal run of text, or
/// a single date or time field with its styling arguments.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Field<'a> {
    Literal(&'a str),

    Year(Style),
    YearOfCentury(Style),

    MonthNumber(Style),
    MonthName(bool, Style),

    Day(Style),
    WeekdayName(bool, Style),

    Hour(Style),
    Minute(Style),
    Second(Style),
    Millisecond(Style),
}

/// Width, fill, and alignment arguments for a single field.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Style {
    width: Option<usize>,
    fill: Option<char>,
    alignment: Option<Alignment>,
}

impl Style {
    fn empty() -> Self {
        Self { width: None, fill: None, alignment: None }
    }

    /// Numbers pad on the left by default, so that widths line columns up.
    fn render_number<N: Display>(self, out: &mut String, number: N) {
        self.render(out, &number.to_string(), Alignment::Right);
    }

    /// Names pad on the right by default.
    fn render_text(self, out: &mut String, text: &str) {
        self.render(out, text, Alignment::Left);
    }

    fn render(self, out: &mut String, value: &str, default_alignment: Alignment) {
        match self.width {
            Some(width) => {
                let fill = self.fill.unwrap_or(' ');
                let alignment = self.alignment.unwrap_or(default_alignment);
                out.push_str(&value.pad(width, fill, alignment, false));
            }
            None => out.push_str(value),
        }
    }
}

impl<'a> Field<'a> {
    fn format<T>(&self, when: &T, out: &mut String, locale: &locale::Time)
    where T: DatePiece + TimePiece
    {
        match *self {
            Field::Literal(s)             => out.push_str(s),
            Field::Year(s)                => s.render_number(out, when.year()),
            Field::YearOfCentury(s)       => s.render_number(out, when.year_of_century()),
            Field::MonthNumber(s)         => s.render_number(out, when.month() as i32),
            Field::MonthName(true, s)     => s.render_text(out, &locale.long_month_name(when.month().months_from_january())),
            Field::MonthName(false, s)    => s.render_text(out, &locale.short_month_name(when.month().months_from_january())),
            Field::Day(s)                 => s.render_number(out, when.day()),
            Field::WeekdayName(true, s)   => s.render_text(out, &locale.long_day_name(when.weekday().days_from_sunday())),
            Field::WeekdayName(false, s)  => s.render_text(out, &locale.short_day_name(when.weekday().days_from_sunday())),
            Field::Hour(s)                => s.render_number(out, when.hour()),
            Field::Minute(s)              => s.render_number(out, when.minute()),
            Field::Second(s)              => s.render_number(out, when.second()),
            Field::Millisecond(s)         => s.render_number(out, when.millisecond()),
        }
    }
}


/// A compiled format string, ready to render values.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DateFormat<'a> {
    pub fields: Vec<Field<'a>>,
}

/// Everything that can go wrong while compiling a format string.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum FormatError {

    /// A character appeared somewhere it isn’t allowed, such as an
    /// unknown field letter.
    InvalidChar { c: char, pos: usize },

    /// A `{` was opened but the format string ended before it closed.
    OpenCurlyBrace { open_pos: usize },

    /// A `}` appeared with no `{` to match it.
    CloseCurlyBrace { close_pos: usize },

    /// A field was opened and styled but never given a field letter.
    MissingField { open_pos: usize },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            FormatError::InvalidChar { c, pos }        => write!(f, "invalid character {:?} at position {}", c, pos),
            FormatError::OpenCurlyBrace { open_pos }   => write!(f, "unclosed {{ at position {}", open_pos),
            FormatError::CloseCurlyBrace { close_pos } => write!(f, "unmatched }} at position {}", close_pos),
            FormatError::MissingField { open_pos }     => write!(f, "field at position {} has no field letter", open_pos),
        }
    }
}

impl std::error::Error for FormatError {
}

impl<'a> DateFormat<'a> {

    /// Compiles a format string. The syntax per field is
    /// `{` `[<|>]` `[fill ]` `[width]` `:` *letter* `}`, with `{{` and
    /// `}}` as literal braces. The field letters are:
    ///
    /// | letter | meaning             |
    /// |--------|---------------------|
    /// | `Y`    | year                |
    /// | `y`    | year of century     |
    /// | `n`    | month number        |
    /// | `M`    | month name, long    |
    /// | `b`    | month name, short   |
    /// | `D`    | day of month        |
    /// | `W`    | weekday name, long  |
    /// | `a`    | weekday name, short |
    /// | `H`    | hour                |
    /// | `i`    | minute              |
    /// | `s`    | second              |
    /// | `f`    | millisecond         |
    ///
    /// A fill character is any single character followed by a space; so
    /// `{0 2:H}` renders the hour zero-padded to two digits.
    pub fn parse(input: &'a str) -> Result<Self, FormatError> {
        let mut parser = FormatParser::new(input);
        parser.run()?;

        Ok(Self { fields: parser.fields })
    }

    /// Renders the given value through this formatter, drawing month and
    /// weekday names from the given locale.
    pub fn format<T>(&self, when: &T, locale: &locale::Time) -> String
    where T: DatePiece + TimePiece
    {
        let mut out = String::new();

        for field in &self.fields {
            field.format(when, &mut out, locale);
        }

        out
    }
}


struct FormatParser<'a> {
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
    input: &'a str,
    fields: Vec<Field<'a>>,
    anchor: Option<usize>,
}

impl<'a> FormatParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            iter: input.char_indices().peekable(),
            input,
            fields: Vec::new(),
            anchor: None,
        }
    }

    fn run(&mut self) -> Result<(), FormatError> {
        while let Some((pos, c)) = self.iter.next() {
            match c {
                '{' => {
                    self.flush_literal(pos);
                    if self.take_if('{') {
                        self.fields.push(Field::Literal(&self.input[pos..=pos]));
                    }
                    else {
                        self.parse_field(pos)?;
                    }
                }
                '}' => {
                    self.flush_literal(pos);
                    if self.take_if('}') {
                        self.fields.push(Field::Literal(&self.input[pos..=pos]));
                    }
                    else {
                        return Err(FormatError::CloseCurlyBrace { close_pos: pos });
                    }
                }
                _ => {
                    if self.anchor.is_none() {
                        self.anchor = Some(pos);
                    }
                }
            }
        }

        self.flush_literal(self.input.len());
        Ok(())
    }

    /// Consumes the next character if it matches.
    fn take_if(&mut self, wanted: char) -> bool {
        match self.iter.peek() {
            Some(&(_, c)) if c == wanted => {
                let _ = self.iter.next();
                true
            }
            _ => false,
        }
    }

    /// Pushes the literal run ending at `up_to`, if one is in progress.
    fn flush_literal(&mut self, up_to: usize) {
        if let Some(anchor) = self.anchor.take() {
            if anchor < up_to {
                self.fields.push(Field::Literal(&self.input[anchor..up_to]));
            }
        }
    }

    /// Parses the inside of a `{...}` field, starting just after the
    /// opening brace.
    fn parse_field(&mut self, open_pos: usize) -> Result<(), FormatError> {
        let mut style = Style::empty();

        // Styling arguments come before the colon.
        loop {
            let (pos, c) = match self.iter.next() {
                Some(next) => next,
                None => return Err(FormatError::OpenCurlyBrace { open_pos }),
            };

            if c == ':' {
                break;
            }
            else if c == '<' && style.alignment.is_none() {
                style.alignment = Some(Alignment::Left);
            }
            else if c == '>' && style.alignment.is_none() {
                style.alignment = Some(Alignment::Right);
            }
            else if style.fill.is_none() && style.width.is_none() && self.take_if(' ') {
                // Any character followed by a space is a fill character.
                style.fill = Some(c);
            }
            else if let Some(digit) = c.to_digit(10) {
                style.width = Some(style.width.unwrap_or(0) * 10 + digit as usize);
            }
            else {
                return Err(FormatError::InvalidChar { c, pos });
            }
        }

        let (letter_pos, letter) = match self.iter.next() {
            Some(next) => next,
            None => return Err(FormatError::OpenCurlyBrace { open_pos }),
        };

        let field = match letter {
            'Y' => Field::Year(style),
            'y' => Field::YearOfCentury(style),
            'n' => Field::MonthNumber(style),
            'M' => Field::MonthName(true, style),
            'b' => Field::MonthName(false, style),
            'D' => Field::Day(style),
            'W' => Field::WeekdayName(true, style),
            'a' => Field::WeekdayName(false, style),
            'H' => Field::Hour(style),
            'i' => Field::Minute(style),
            's' => Field::Second(style),
            'f' => Field::Millisecond(style),
            '}' => return Err(FormatError::MissingField { open_pos }),
            c => return Err(FormatError::InvalidChar { c, pos: letter_pos }),
        };

        match self.iter.next() {
            Some((_, '}')) => {
                self.fields.push(field);
                Ok(())
            }
            Some((pos, c)) => Err(FormatError::InvalidChar { c, pos }),
            None => Err(FormatError::OpenCurlyBrace { open_pos }),
        }
    }
}
