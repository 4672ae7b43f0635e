//! Input validation.
//!
//! Search text is checked against a small allow-list before it is sent
//! anywhere, so that users cannot smuggle arbitrary search syntax to the
//! remote service. The only syntax let through is the exact-match wrapper
//! `!"Name"`, which the finder itself produces.

use mtgfinder_model::error::{Field, ValidationError};

/// The most characters a card name or type may have.
pub const MAX_LENGTH: usize = 100;

/// A validator.
pub trait Validator<T> {
    /// The field being validated.
    fn field(&self) -> Field;

    /// Runs the validation.
    fn validate(self) -> Result<T, ValidationError>;
}

/// Validator extension functions.
pub trait ValidatorExt<T>
where
    Self: Sized,
{
    /// Checks that a value has at most `max` characters.
    fn max_chars(self, max: usize) -> LengthValidator<Self>;

    /// Checks that every character of a value passes `allowed`.
    fn allowed_chars<P>(self, allowed: P) -> CharsetValidator<Self, P>
    where
        P: Fn(char) -> bool;
}

impl<T, V> ValidatorExt<V> for T
where
    T: Validator<V> + Sized,
{
    fn max_chars(self, max: usize) -> LengthValidator<Self> {
        LengthValidator::new(self, max)
    }

    fn allowed_chars<P>(self, allowed: P) -> CharsetValidator<Self, P>
    where
        P: Fn(char) -> bool,
    {
        CharsetValidator::new(self, allowed)
    }
}

/// Represents a value with no constraints.
///
/// This is where all input validation begins. As such, this struct's
/// validation scheme always returns happily.
#[derive(Debug)]
pub struct Value<T> {
    field: Field,
    value: T,
}

impl<T> Value<T> {
    /// Creates a new `Value`.
    pub fn new(field: Field, value: T) -> Value<T> {
        Value { field, value }
    }
}

impl<T> Validator<T> for Value<T> {
    fn validate(self) -> Result<T, ValidationError> {
        Ok(self.value)
    }

    fn field(&self) -> Field {
        self.field
    }
}

/// Length validator.
#[derive(Debug)]
pub struct LengthValidator<I> {
    inner: I,
    max: usize,
}

impl<I> LengthValidator<I> {
    /// Creates a new `LengthValidator`.
    pub fn new(inner: I, max: usize) -> LengthValidator<I> {
        LengthValidator { inner, max }
    }
}

impl<T, I> Validator<T> for LengthValidator<I>
where
    I: Validator<T>,
    T: AsRef<str>,
{
    /// Counts characters, not bytes.
    fn validate(self) -> Result<T, ValidationError> {
        let field = self.inner.field();
        let value = self.inner.validate()?;

        if value.as_ref().chars().count() > self.max {
            Err(ValidationError::TooLong(field))
        } else {
            Ok(value)
        }
    }

    fn field(&self) -> Field {
        self.inner.field()
    }
}

/// Character set validator.
#[derive(Debug)]
pub struct CharsetValidator<I, P> {
    inner: I,
    allowed: P,
}

impl<I, P> CharsetValidator<I, P> {
    /// Creates a new `CharsetValidator`.
    pub fn new(inner: I, allowed: P) -> CharsetValidator<I, P> {
        CharsetValidator { inner, allowed }
    }
}

impl<T, I, P> Validator<T> for CharsetValidator<I, P>
where
    I: Validator<T>,
    T: AsRef<str>,
    P: Fn(char) -> bool,
{
    /// Reports the first disallowed character, scanning left to right.
    fn validate(self) -> Result<T, ValidationError> {
        let field = self.inner.field();
        let value = self.inner.validate()?;

        match value.as_ref().chars().find(|&c| !(self.allowed)(c)) {
            Some(character) => Err(ValidationError::InvalidCharacter { field, character }),
            None => Ok(value),
        }
    }

    fn field(&self) -> Field {
        self.inner.field()
    }
}

/// Shorthand for [`Value::new`].
pub fn value<T>(field: Field, value: T) -> Value<T> {
    Value::new(field, value)
}

/// Search input that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedQuery {
    /// The trimmed card name, possibly wrapped as `!"Name"`. May be empty.
    pub name: String,
    /// The trimmed card type. May be empty.
    pub card_type: String,
}

/// Validates a card name and type filter.
///
/// Both are trimmed first. At least one of them must be non-empty.
pub fn validate_search_input(
    name: &str,
    card_type: &str,
) -> Result<ValidatedQuery, ValidationError> {
    let name = name.trim();
    let card_type = card_type.trim();

    if name.is_empty() && card_type.is_empty() {
        return Err(ValidationError::Empty);
    }

    value(Field::Name, name).max_chars(MAX_LENGTH).validate()?;
    value(Field::Name, strip_exact_marker(name))
        .allowed_chars(is_allowed_char)
        .validate()?;
    value(Field::Type, card_type)
        .max_chars(MAX_LENGTH)
        .allowed_chars(is_allowed_char)
        .validate()?;

    Ok(ValidatedQuery {
        name: name.to_owned(),
        card_type: card_type.to_owned(),
    })
}

/// Checks if a character may appear in search text.
///
/// ASCII letters and digits, space, and `'` `,` `:` `/` `-`.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '\'' | ',' | ':' | '/' | '-')
}

/// Removes the exact-match wrapper `!"…"` from a name, if it has one.
pub fn strip_exact_marker(name: &str) -> &str {
    name.strip_prefix("!\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(name)
}
