//! Work queue of pending continuation tokens
//!
//! Tokens are served strictly first-in first-out. The queue never accepts a
//! token back once it has been handed out, so every token is exchanged once.

use crate::crawler::items::ContinuationToken;
use std::collections::VecDeque;

/// FIFO queue of continuation tokens with running totals
#[derive(Debug, Default)]
pub struct WorkQueue {
    /// Tokens waiting to be exchanged, oldest first
    pending: VecDeque<ContinuationToken>,

    /// Number of tokens ever enqueued
    enqueued: usize,

    /// Number of tokens handed out
    dequeued: usize,
}

impl WorkQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends tokens at the tail, preserving their order
    pub fn extend<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = ContinuationToken>,
    {
        for token in tokens {
            self.push(token);
        }
    }

    /// Appends one token at the tail
    pub fn push(&mut self, token: ContinuationToken) {
        self.enqueued += 1;
        self.pending.push_back(token);
    }

    /// Removes and returns the oldest token
    pub fn pop(&mut self) -> Option<ContinuationToken> {
        let token = self.pending.pop_front()?;
        self.dequeued += 1;
        Some(token)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total number of tokens ever enqueued
    pub fn total_enqueued(&self) -> usize {
        self.enqueued
    }

    /// Total number of tokens handed out
    pub fn total_dequeued(&self) -> usize {
        self.dequeued
    }
}
