//! Rewrites `[[...]]` link tokens in rendered page output into HTML anchors.
//!
//! Three passes run in a fixed order, each over the output of the previous
//! one:
//!
//! 1. `[[Title]]` where the text has no `.`, `]` or `/` becomes a link to
//!    `/view/Title`.
//! 2. `[[http...]]` becomes a link straight to that URL.
//! 3. Any other `[[text]]` becomes a link to `http://text`.
//!
//! The captured text is inserted without escaping.

use std::borrow::Cow;
use std::io::{self, Write};

use regex::bytes::Regex;

pub struct LinkRewriter {
    article: Regex,
    full: Regex,
    naked: Regex,
}

impl LinkRewriter {
    pub fn new() -> Self {
        Self {
            article: Regex::new(r"\[\[([^.\]/]+)\]\]").expect("Invalid article link regex"),
            full: Regex::new(r"\[\[(http.+?)\]\]").expect("Invalid full link regex"),
            naked: Regex::new(r"\[\[(.+?)\]\]").expect("Invalid naked link regex"),
        }
    }

    /// Rewrite every link token in one chunk of output
    pub fn rewrite<'a>(&self, chunk: &'a [u8]) -> Cow<'a, [u8]> {
        let text = self.article.replace_all(chunk, &br#"<a href="/view/${1}">${1}</a>"#[..]);
        let text = replace_owned(&self.full, text, br#"<a href="${1}">${1}</a>"#);
        replace_owned(&self.naked, text, br#"<a href="http://${1}">${1}</a>"#)
    }

    /// Wrap a sink so everything written through it is rewritten first
    pub fn wrap<'r, W: Write>(&'r self, inner: W) -> LinkWriter<'r, W> {
        LinkWriter { rewriter: self, inner }
    }
}

impl Default for LinkRewriter {
    fn default() -> Self {
        Self::new()
    }
}

fn replace_owned<'a>(re: &Regex, text: Cow<'a, [u8]>, rep: &[u8]) -> Cow<'a, [u8]> {
    match text {
        Cow::Borrowed(b) => re.replace_all(b, rep),
        Cow::Owned(o) => Cow::Owned(re.replace_all(&o, rep).into_owned()),
    }
}

/// A sink decorator that rewrites link tokens in each `write` call.
///
/// Tokens split across two writes are not recognised; renderers should hand
/// a whole rendered page to a single write.
pub struct LinkWriter<'r, W> {
    rewriter: &'r LinkRewriter,
    inner: W,
}

impl<W> LinkWriter<'_, W> {
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for LinkWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let rewritten = self.rewriter.rewrite(buf);
        self.inner.write_all(&rewritten)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
