use crate::error::{ConfigError, Result};
use indexmap::map::IntoIter;
use indexmap::IndexMap;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A single option value, as passed to the acoustic modeling tools
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    IntList(Vec<i64>),
    StrList(Vec<String>),
}

impl OptionValue {
    fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "a boolean",
            OptionValue::Int(_) => "an integer",
            OptionValue::Float(_) => "a float",
            OptionValue::Str(_) => "a string",
            OptionValue::IntList(_) => "an integer list",
            OptionValue::StrList(_) => "a string list",
        }
    }
}

/// Format a float with a decimal point or a two-digit signed exponent
/// (`1.0`, `0.1`, `1e-05`, `1e+16`), the form other tools in the
/// pipeline write.
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_owned();
    }
    let repr = format!("{:?}", x);
    let scientific = repr
        .split_once('e')
        .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)));
    match scientific {
        Some((mantissa, exponent)) => format!(
            "{}e{}{:02}",
            mantissa,
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        ),
        None => repr.clone(),
    }
}

/// Renders the value the way it appears after `--key=` on a command
/// line.  Booleans are lowercase, floats go through `format_float`
/// and lists are comma-separated.
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Float(x) => f.write_str(&format_float(*x)),
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::IntList(items) => {
                let items: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                f.write_str(&items.join(","))
            }
            OptionValue::StrList(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Parse a value typed by a human: booleans first, then integers,
/// floats, comma-separated lists, and finally plain strings.
impl FromStr for OptionValue {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(b) = s.parse::<bool>() {
            return Ok(OptionValue::Bool(b));
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(OptionValue::Int(i));
        }
        // Rust happily parses "inf" and "NaN", which are more likely names
        if s.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') {
            if let Ok(x) = s.parse::<f64>() {
                return Ok(OptionValue::Float(x));
            }
        }
        if s.contains(',') {
            let items: Vec<&str> = s.split(',').map(str::trim).collect();
            let ints: std::result::Result<Vec<i64>, _> = items.iter().map(|i| i.parse()).collect();
            return Ok(match ints {
                Ok(ints) => OptionValue::IntList(ints),
                Err(_) => OptionValue::StrList(items.into_iter().map(String::from).collect()),
            });
        }
        Ok(OptionValue::Str(s.to_owned()))
    }
}

impl From<&OptionValue> for OptionValue {
    fn from(value: &OptionValue) -> Self {
        value.clone()
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<Vec<i64>> for OptionValue {
    fn from(value: Vec<i64>) -> Self {
        OptionValue::IntList(value)
    }
}

impl From<Vec<u32>> for OptionValue {
    fn from(value: Vec<u32>) -> Self {
        OptionValue::IntList(value.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        OptionValue::StrList(value.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::StrList(value)
    }
}

/// Types that a configuration field can be read back into
pub trait FromOption: Sized {
    /// Description used in error messages
    const EXPECTED: &'static str;
    /// Description of a list of these, used in error messages
    const EXPECTED_LIST: &'static str = "a list";

    fn from_option(value: &OptionValue) -> Option<Self>;
}

impl FromOption for bool {
    const EXPECTED: &'static str = "a boolean";
    const EXPECTED_LIST: &'static str = "a list of booleans";

    fn from_option(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromOption for i64 {
    const EXPECTED: &'static str = "an integer";
    const EXPECTED_LIST: &'static str = "a list of integers";

    fn from_option(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromOption for u32 {
    const EXPECTED: &'static str = "a non-negative integer";
    const EXPECTED_LIST: &'static str = "a list of non-negative integers";

    fn from_option(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromOption for u64 {
    const EXPECTED: &'static str = "a non-negative integer";
    const EXPECTED_LIST: &'static str = "a list of non-negative integers";

    fn from_option(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromOption for f64 {
    const EXPECTED: &'static str = "a number";
    const EXPECTED_LIST: &'static str = "a list of numbers";

    fn from_option(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Float(x) => Some(*x),
            OptionValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromOption for String {
    const EXPECTED: &'static str = "a string";
    const EXPECTED_LIST: &'static str = "a list of strings";

    fn from_option(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl<T: FromOption> FromOption for Vec<T> {
    const EXPECTED: &'static str = T::EXPECTED_LIST;

    fn from_option(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::IntList(items) => items
                .iter()
                .map(|&i| T::from_option(&OptionValue::Int(i)))
                .collect(),
            OptionValue::StrList(items) => items
                .iter()
                .map(|s| T::from_option(&OptionValue::Str(s.clone())))
                .collect(),
            _ => None,
        }
    }
}

/// Setting an optional field always sets it
impl<T: FromOption> FromOption for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;
    const EXPECTED_LIST: &'static str = T::EXPECTED_LIST;

    fn from_option(value: &OptionValue) -> Option<Self> {
        T::from_option(value).map(Some)
    }
}

/// Convert an option value for the field named `key`
pub fn convert<T: FromOption>(key: &str, value: &OptionValue) -> Result<T> {
    T::from_option(value).ok_or_else(|| ConfigError::InvalidOption {
        key: key.to_owned(),
        expected: T::EXPECTED,
        found: format!("{} ({})", value.kind(), value),
    })
}

/// Ordered mapping from option name to value.
///
/// Insertion order is preserved, and setting a key that already exists
/// replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Options(IndexMap<String, OptionValue>);

impl Options {
    pub fn new() -> Options {
        Options(IndexMap::new())
    }

    /// Builder-style `set`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Options {
        self.set(key, value);
        self
    }

    /// Set a value, returning the previous one if there was any
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Option<OptionValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a value, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.0.shift_remove(key)
    }

    /// Merge `other` into this mapping; its values win
    pub fn update(&mut self, other: Options) {
        self.0.extend(other.0);
    }

    /// Merge `other` over these options and return the result
    pub fn merged(mut self, other: Options) -> Options {
        self.update(other);
        self
    }

    /// Remove and convert a value if present
    pub fn take<T: FromOption>(&mut self, key: &str) -> Result<Option<T>> {
        self.remove(key).map(|value| convert(key, &value)).transpose()
    }

    /// Remove and convert a value, falling back to `default`
    pub fn take_or<T: FromOption>(&mut self, key: &str, default: T) -> Result<T> {
        Ok(self.take(key)?.unwrap_or(default))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Options {
    type Item = (String, OptionValue);
    type IntoIter = IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Options(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Store each option in the field of the same name, or in `extra` if
/// there is no such field.
macro_rules! apply_options {
    ($config:ident, $options:expr, [$($field:ident),* $(,)?]) => {
        for (key, value) in $options {
            match key.as_str() {
                $(stringify!($field) => $config.$field = $crate::options::convert(&key, &value)?,)*
                _ => {
                    log::debug!("Keeping unrecognized option {}={}", key, value);
                    $config.extra.set(key, value);
                }
            }
        }
    };
}
pub(crate) use apply_options;
