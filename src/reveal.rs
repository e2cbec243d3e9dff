// src/reveal.rs

use futures::stream::{self, Stream};
use std::iter::FusedIterator;
use std::time::Duration;

/// Word-by-word reveal of a reply.
///
/// Each item is the text up to and including the next word, so the final
/// item is the whole input. Words are separated by single spaces; runs of
/// spaces and embedded newlines are kept as they are. The sequence is lazy,
/// finite and cannot be restarted.
#[derive(Debug, Clone)]
pub struct WordReveal {
    text: String,
    next_start: Option<usize>,
}

impl WordReveal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_start: Some(0),
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// True once the full text has been yielded.
    pub fn is_finished(&self) -> bool {
        self.next_start.is_none()
    }
}

impl Iterator for WordReveal {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let start = self.next_start?;
        let end = match self.text[start..].find(' ') {
            Some(offset) => {
                self.next_start = Some(start + offset + 1);
                start + offset
            }
            None => {
                self.next_start = None;
                self.text.len()
            }
        };
        Some(self.text[..end].to_string())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next_start {
            Some(start) => {
                let remaining = self.text[start..].matches(' ').count() + 1;
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for WordReveal {}

impl FusedIterator for WordReveal {}

/// Yields the reveal's items with `delay` between consecutive items.
///
/// Nothing waits before the first item or after the last. Dropping the
/// stream stops the reveal.
pub fn paced(reveal: WordReveal, delay: Duration) -> impl Stream<Item = String> {
    stream::unfold((reveal, true), move |(mut reveal, first)| async move {
        if reveal.is_finished() {
            return None;
        }
        if !first && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let shown = reveal.next()?;
        Some((shown, (reveal, false)))
    })
}
