use tracing::{debug, warn};

use crate::{
    Parameters, Share, ShamirError, ShareDecodeError,
    share::decode_share,
};

/// The kinds of line the share format is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineShape<'a> {
    /// `"n": 4,`
    N(Option<i64>),
    /// `"k": 3`
    K(Option<i64>),
    /// `"1": {`, holding the raw index digits
    OpenShare(&'a str),
    /// `"keys": {`
    OpenOther,
    /// `"base": "10",`
    Base(Option<&'a str>),
    /// `"value": "1234"`
    Value(Option<&'a str>),
    /// `},`
    Close,
    Other,
}

/// Split a leading `"key":` off a trimmed line.
fn split_key(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('"')?;
    let (key, rest) = rest.split_once('"')?;
    let rest = rest.trim_start().strip_prefix(':')?;
    Some((key, rest.trim()))
}

/// The first run of decimal digits in `s`, with a `-` directly in front of
/// it taken as its sign.
fn first_integer(s: &str) -> Option<i64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let end = s[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |end| start + end);
    let start = if s[..start].ends_with('-') { start - 1 } else { start };
    s[start..end].parse().ok()
}

/// The contents of the first quoted string in `s`.
fn first_quoted(s: &str) -> Option<&str> {
    let (_, rest) = s.split_once('"')?;
    let (quoted, _) = rest.split_once('"')?;
    Some(quoted)
}

impl<'a> LineShape<'a> {
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        if line.starts_with('}') {
            return LineShape::Close;
        }
        let Some((key, rest)) = split_key(line) else {
            return LineShape::Other;
        };
        match key {
            "n" => LineShape::N(first_integer(rest)),
            "k" => LineShape::K(first_integer(rest)),
            "base" => LineShape::Base(first_quoted(rest)),
            "value" => LineShape::Value(first_quoted(rest)),
            _ if rest.starts_with('{') => {
                if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
                    LineShape::OpenShare(key)
                } else {
                    LineShape::OpenOther
                }
            }
            _ => LineShape::Other,
        }
    }
}

/// A share entry whose block has been opened but not yet closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PendingShare {
    index: String,
    base: Option<String>,
    value: Option<String>,
}

/// A share entry that could not be decoded, with its raw fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedShare {
    /// The share index as written in the input.
    pub index: String,
    pub base: Option<String>,
    pub value: Option<String>,
    pub reason: ShareDecodeError,
}

impl std::fmt::Display for RejectedShare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Skipping invalid share at x = {} (value = {} in base {}): {}",
            self.index,
            self.value.as_deref().unwrap_or("<missing>"),
            self.base.as_deref().unwrap_or("<missing>"),
            self.reason
        )
    }
}

/// What happened as a result of feeding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    None,
    Accepted(Share),
    Rejected(RejectedShare),
}

/// The shares and parameters found in one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub parameters: Parameters,
    pub shares: Vec<Share>,
    pub rejected: Vec<RejectedShare>,
}

/// Line-at-a-time share scanner.
///
/// The format is flat: opening a share block while another is open replaces
/// it.
#[derive(Debug, Default)]
pub struct ShareScanner {
    n: Option<i64>,
    k: Option<i64>,
    open: Option<PendingShare>,
    shares: Vec<Share>,
    rejected: Vec<RejectedShare>,
}

impl ShareScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_share_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn feed_line(&mut self, line: &str) -> ScanEvent {
        match LineShape::classify(line) {
            LineShape::N(n) => self.n = n,
            LineShape::K(k) => self.k = k,
            LineShape::OpenShare(index) => {
                let pending = PendingShare { index: index.to_owned(), ..Default::default() };
                if let Some(dropped) = self.open.replace(pending) {
                    debug!(index = %dropped.index, "share block replaced before closing");
                }
            }
            LineShape::OpenOther => self.open = None,
            LineShape::Base(base) => {
                if let Some(pending) = self.open.as_mut() {
                    pending.base = base.map(str::to_owned);
                }
            }
            LineShape::Value(value) => {
                if let Some(pending) = self.open.as_mut() {
                    pending.value = value.map(str::to_owned);
                }
            }
            LineShape::Close => {
                if let Some(pending) = self.open.take() {
                    return self.finalize(pending);
                }
            }
            LineShape::Other => {}
        }
        ScanEvent::None
    }

    fn finalize(&mut self, pending: PendingShare) -> ScanEvent {
        let Ok(x) = pending.index.parse::<u64>() else {
            return self.reject(pending, ShareDecodeError::IndexOutOfRange);
        };
        match decode_share(x, pending.base.as_deref(), pending.value.as_deref()) {
            Ok(share) => {
                debug!(x = share.x(), "accepted share");
                self.shares.push(share.clone());
                ScanEvent::Accepted(share)
            }
            Err(reason) => self.reject(pending, reason),
        }
    }

    fn reject(&mut self, pending: PendingShare, reason: ShareDecodeError) -> ScanEvent {
        let rejected = RejectedShare {
            index: pending.index,
            base: pending.base,
            value: pending.value,
            reason,
        };
        warn!(index = %rejected.index, reason = %rejected.reason, "skipping share");
        self.rejected.push(rejected.clone());
        ScanEvent::Rejected(rejected)
    }

    /// End of input. A share block that is still open is reported as
    /// rejected.
    ///
    /// `k` is required and must be positive. `n` is optional; a negative
    /// `n` is dropped.
    pub fn finish(mut self) -> Result<Extraction, ShamirError> {
        if let Some(pending) = self.open.take() {
            self.reject(pending, ShareDecodeError::Unterminated);
        }
        let k = self.k.ok_or(ShamirError::MissingParameter("k"))?;
        let k = usize::try_from(k)
            .ok()
            .filter(|&k| k >= 1)
            .ok_or(ShamirError::InvalidThreshold)?;
        let n = self.n.and_then(|n| usize::try_from(n).ok());
        Ok(Extraction {
            parameters: Parameters { n, k },
            shares: self.shares,
            rejected: self.rejected,
        })
    }
}
